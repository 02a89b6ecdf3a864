//! Progress reporter handed to background work

use tokio::sync::mpsc;

use crate::messages::TaskEvent;
use crate::models::{Progress, TaskId};

/// Capability to emit ordered progress events from a worker thread
pub struct ProgressReporter {
    id: TaskId,
    events: mpsc::UnboundedSender<TaskEvent>,
    wake: mpsc::UnboundedSender<TaskId>,
}

impl ProgressReporter {
    pub(crate) fn new(
        id: TaskId,
        events: mpsc::UnboundedSender<TaskEvent>,
        wake: mpsc::UnboundedSender<TaskId>,
    ) -> Self {
        ProgressReporter { id, events, wake }
    }

    pub fn task_id(&self) -> TaskId {
        self.id
    }

    /// Report a percentage (clamped to 100)
    pub fn update_progress(&self, percent: u8) {
        self.emit(TaskEvent::Progress(Progress {
            percent: percent.min(100),
            message: None,
        }));
    }

    /// Report a percentage together with a status message
    pub fn update_progress_message(&self, percent: u8, message: impl Into<String>) {
        self.emit(TaskEvent::Progress(Progress {
            percent: percent.min(100),
            message: Some(message.into()),
        }));
    }

    pub(crate) fn started(&self) {
        self.emit(TaskEvent::Started);
    }

    fn emit(&self, event: TaskEvent) {
        // The interactive side may have gone away; nothing left to render to
        if self.events.send(event).is_ok() {
            let _ = self.wake.send(self.id);
        }
    }
}
