//! Message types for inter-layer communication in the actor-based architecture.
//!
//! This module defines all messages that flow between the UI, the shell actor
//! and the task workers.

pub mod ui_events;
pub mod render;
pub mod task;

pub use ui_events::UiEvent;
pub use render::RenderState;
pub use task::TaskEvent;
