//! # Mami Shell
//!
//! Terminal shell of the Mami membership-management application.
//!
//! ## Features
//! - Page registry with a single visible page
//! - Breadcrumb navigation bar whose buttons free the pages bound to them
//! - Background tasks with progress, spinner and error flash in the status bar
//! - Bounded worker pool
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui) - synchronous
//! - Shell Layer (pages, navigation, status) - owned by the shell actor
//! - Task Layer (Tokio blocking pool)

pub mod config;
pub mod constants;
pub mod models;
pub mod messages;
pub mod pages;
pub mod shell;
pub mod tasks;
pub mod ui;

// Re-export commonly used types
pub use config::ShellConfig;
pub use models::{ButtonAction, NavigationButton, Progress, TaskId, TaskOutcome, TaskState};
pub use messages::{RenderState, TaskEvent, UiEvent};
pub use shell::{MessageTone, NavigationStack, PageTeardown, PanelRegistry, ShellActor, StatusSink, ViewShell};
pub use tasks::{ProgressReporter, TaskRunner};
