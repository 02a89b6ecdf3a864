//! Task messages - communication between worker threads and the interactive side

use crate::models::Progress;

/// Ordered, non-terminal events of a single task.
///
/// The terminal result travels on its own single-fire channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskEvent {
    /// A worker picked the task up
    Started,
    /// The work reported progress
    Progress(Progress),
}
