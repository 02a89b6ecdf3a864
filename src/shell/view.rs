//! View shell - the context object business pages talk to
//!
//! Owns the page registry, the navigation stack and the status sink. It is
//! created once and passed by `&mut` to every page handler and task callback.

use std::time::{Duration, Instant};

use crate::constants::ERROR_FLASH_MS;
use crate::models::{ButtonAction, NavigationButton};
use crate::shell::navigation::NavigationStack;
use crate::shell::registry::PanelRegistry;
use crate::shell::status::StatusSink;

pub struct ViewShell<P> {
    pub pages: PanelRegistry<P>,
    pub navigation: NavigationStack,
    pub status: StatusSink,
    error_flash: Duration,
    quit_requested: bool,
}

impl<P> Default for ViewShell<P> {
    fn default() -> Self {
        Self::new(Duration::from_millis(ERROR_FLASH_MS))
    }
}

impl<P> ViewShell<P> {
    pub fn new(error_flash: Duration) -> Self {
        ViewShell {
            pages: PanelRegistry::new(),
            navigation: NavigationStack::new(),
            status: StatusSink::new(),
            error_flash,
            quit_requested: false,
        }
    }

    // Pages

    pub fn add_page(&mut self, handle: P, name: &str) -> bool {
        self.pages.add_page(handle, name)
    }

    pub fn show_page(&mut self, name: &str) -> bool {
        self.pages.show_page(name)
    }

    pub fn add_and_show_page(&mut self, handle: P, name: &str) -> bool {
        self.pages.add_and_show_page(handle, name)
    }

    pub fn remove_page(&mut self, name: &str) {
        self.pages.remove_page(name)
    }

    pub fn has_page(&self, name: &str) -> bool {
        self.pages.has_page(name)
    }

    // Navigation

    pub fn register_button(&mut self, button: NavigationButton) {
        self.navigation.register(button)
    }

    pub fn show_button(&mut self, name: &str, page_to_free: Option<&str>) {
        self.navigation.show(name, page_to_free)
    }

    /// Pop down to `name`, freeing the pages bound to popped buttons
    pub fn hide_button(&mut self, name: &str) -> Vec<String> {
        self.navigation.hide(name, &mut self.pages)
    }

    pub fn has_button(&self, name: &str) -> bool {
        self.navigation.has_button(name)
    }

    pub fn navigation_depth(&self) -> usize {
        self.navigation.depth()
    }

    /// Run the click action of a displayed button. Returns false if the button
    /// is not displayed.
    pub fn click(&mut self, name: &str) -> bool {
        let action = match self.navigation.get(name) {
            Some(button) if button.visible => button.action.clone(),
            _ => {
                tracing::warn!(button = name, "Click on a button that is not displayed");
                return false;
            }
        };

        match action {
            ButtonAction::Back => {
                self.hide_button(name);
            }
            ButtonAction::ShowPage(page) => {
                self.show_page(&page);
                self.hide_button(name);
            }
            ButtonAction::Quit => {
                self.quit_requested = true;
            }
        }
        true
    }

    /// Click the n-th displayed button, counting from the bottom
    pub fn click_at(&mut self, index: usize) -> bool {
        let name = self.navigation.displayed().nth(index).map(|b| b.name.clone());
        match name {
            Some(name) => self.click(&name),
            None => false,
        }
    }

    // Status

    /// Stop the spinner and flash `message` as an error
    pub fn report_error(&mut self, message: &str) {
        self.status.stop_spinner();
        self.status.flash_error(format!("{}{}", crate::constants::ERROR_PREFIX, message), self.error_flash);
    }

    pub fn error_flash(&self) -> Duration {
        self.error_flash
    }

    pub fn tick(&mut self, now: Instant) {
        self.status.tick(now);
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.status.next_deadline()
    }

    // Quit confirmation

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    pub fn cancel_quit(&mut self) {
        self.quit_requested = false;
    }
}
