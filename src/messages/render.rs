//! Render state - data structure sent from the shell actor to the UI for rendering

use crate::constants::{QUIT_BUTTON, READY_MESSAGE};
use crate::pages::{Page, PageView};
use crate::shell::{MessageTone, UserInfo, ViewShell};

/// A displayed navigation button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonView {
    pub label: String,
    pub icon: String,
    pub is_quit: bool,
}

/// Complete state needed by the UI to render
#[derive(Debug, Clone)]
pub struct RenderState {
    // Top bar
    pub buttons: Vec<ButtonView>,
    pub user: Option<UserInfo>,

    // Centre
    pub page: Option<PageView>,

    // Status bar
    pub status_message: String,
    pub status_tone: MessageTone,
    pub spinner: Option<&'static str>,
    pub progress: Option<u8>,
    pub connection: Option<String>,

    // Popups
    pub show_quit_confirm: bool,
}

impl Default for RenderState {
    fn default() -> Self {
        RenderState {
            buttons: Vec::new(),
            user: None,
            page: None,
            status_message: String::from(READY_MESSAGE),
            status_tone: MessageTone::Normal,
            spinner: None,
            progress: None,
            connection: None,
            show_quit_confirm: false,
        }
    }
}

impl RenderState {
    pub fn from_shell(shell: &ViewShell<Page>) -> Self {
        RenderState {
            buttons: shell
                .navigation
                .displayed()
                .map(|button| ButtonView {
                    label: button.label.clone(),
                    icon: button.icon.clone(),
                    is_quit: button.name == QUIT_BUTTON,
                })
                .collect(),
            user: shell.status.user().cloned(),
            page: shell.pages.visible().map(Page::view),
            status_message: shell.status.message().to_string(),
            status_tone: shell.status.tone(),
            spinner: shell.status.spinner_glyph(),
            progress: shell.status.progress(),
            connection: shell.status.connection().map(str::to_string),
            show_quit_confirm: shell.quit_requested(),
        }
    }
}
