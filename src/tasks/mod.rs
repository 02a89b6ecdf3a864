//! Task layer - background work with progress reporting
//!
//! Work runs on blocking worker threads; progress and results come back to the
//! interactive side, which applies them to the status bar and invokes the
//! caller's handlers.

pub mod reporter;
pub mod runner;

pub use reporter::ProgressReporter;
pub use runner::TaskRunner;
