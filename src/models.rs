use chrono::{DateTime, Utc};

/// What happens when a displayed navigation button is clicked
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ButtonAction {
    /// Pop the button (and everything above it)
    Back,
    /// Show the named page, then pop the button
    ShowPage(String),
    /// Ask for quit confirmation; the stack is left untouched
    Quit,
}

/// A navigation button: one level of the breadcrumb bar
#[derive(Clone, Debug)]
pub struct NavigationButton {
    pub name: String,
    pub label: String,
    pub icon: String,
    pub action: ButtonAction,
    /// Page torn down when this button is popped
    pub bound_page: Option<String>,
    pub visible: bool,
}

impl NavigationButton {
    pub fn new(name: impl Into<String>, label: impl Into<String>, action: ButtonAction) -> Self {
        NavigationButton {
            name: name.into(),
            label: label.into(),
            icon: String::new(),
            action,
            bound_page: None,
            visible: false,
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }
}

/// Identifier of a submitted task
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(pub u64);

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Lifecycle of a task
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TaskState {
    Pending,
    Running,
    Succeeded,
    Failed,
}

impl TaskState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskState::Succeeded | TaskState::Failed)
    }
}

/// A progress report emitted by running work
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Progress {
    pub percent: u8,
    pub message: Option<String>,
}

/// Summary of a task that reached a terminal state
#[derive(Clone, Debug)]
pub struct TaskOutcome {
    pub id: TaskId,
    pub name: String,
    pub state: TaskState,
    pub finished_at: DateTime<Utc>,
}
