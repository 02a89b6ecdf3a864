//! Shell layer - pages, navigation buttons and the status bar
//!
//! Everything here is owned by the interactive side and mutated only from it.

pub mod registry;
pub mod navigation;
pub mod status;
pub mod timers;
pub mod view;
pub mod actor;

pub use registry::{PageTeardown, PanelRegistry};
pub use navigation::NavigationStack;
pub use status::{MessageTone, StatusSink, UserInfo};
pub use view::ViewShell;
pub use actor::ShellActor;
