//! Navigation stack - registered buttons and the LIFO sequence of displayed ones
//!
//! Hiding a button pops everything above it as well. Each popped button tears
//! down the page bound to it, through the [`PageTeardown`] capability the caller
//! passes in.

use std::collections::HashMap;

use crate::models::NavigationButton;
use crate::shell::registry::PageTeardown;

#[derive(Default)]
pub struct NavigationStack {
    buttons: HashMap<String, NavigationButton>,
    // Bottom first, top last
    displayed: Vec<String>,
}

impl NavigationStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a button, replacing any previous entry with the same name.
    ///
    /// If the previous entry is currently displayed, the new one takes its slot
    /// and inherits its bound page.
    pub fn register(&mut self, mut button: NavigationButton) {
        let name = button.name.clone();
        button.visible = self.is_displayed(&name);
        if let Some(previous) = self.buttons.remove(&name) {
            if button.visible && button.bound_page.is_none() {
                button.bound_page = previous.bound_page;
            }
            tracing::debug!(button = %name, "Navigation button replaced");
        }
        self.buttons.insert(name, button);
    }

    /// Remove a button from the registration map and from the display, without
    /// tearing down its bound page.
    pub fn unregister(&mut self, name: &str) -> Option<NavigationButton> {
        self.displayed.retain(|displayed| displayed != name);
        self.buttons.remove(name)
    }

    /// Push a registered button on top of the displayed sequence.
    ///
    /// A given `page_to_free` replaces whatever page the button was bound to.
    /// A button already displayed is moved to the top.
    pub fn show(&mut self, name: &str, page_to_free: Option<&str>) {
        let Some(button) = self.buttons.get_mut(name) else {
            tracing::warn!(button = name, "Navigation button not found");
            return;
        };

        if let Some(page) = page_to_free {
            button.bound_page = Some(page.to_string());
        }
        button.visible = true;

        self.displayed.retain(|displayed| displayed != name);
        self.displayed.push(name.to_string());
        tracing::debug!(button = name, depth = self.displayed.len(), "Navigation button shown");
    }

    /// Pop displayed buttons down to and including `name`, tearing down each
    /// popped button's bound page. Returns the popped names, top first.
    ///
    /// A registered button that is not displayed drains the whole stack.
    /// An unregistered name is ignored.
    pub fn hide<T: PageTeardown + ?Sized>(&mut self, name: &str, teardown: &mut T) -> Vec<String> {
        if !self.buttons.contains_key(name) {
            tracing::warn!(button = name, "Navigation button not found");
            return Vec::new();
        }
        if !self.is_displayed(name) {
            tracing::debug!(button = name, depth = self.displayed.len(), "Button not displayed, draining stack");
        }

        let mut popped = Vec::new();
        while let Some(top) = self.displayed.pop() {
            if let Some(button) = self.buttons.get_mut(&top) {
                button.visible = false;
                if let Some(page) = button.bound_page.take() {
                    teardown.remove_page(&page);
                }
            }

            let reached = top == name;
            popped.push(top);
            if reached {
                break;
            }
        }

        tracing::debug!(button = name, popped = popped.len(), depth = self.displayed.len(), "Navigation buttons hidden");
        popped
    }

    pub fn depth(&self) -> usize {
        self.displayed.len()
    }

    pub fn has_button(&self, name: &str) -> bool {
        self.buttons.contains_key(name)
    }

    pub fn is_displayed(&self, name: &str) -> bool {
        self.displayed.iter().any(|displayed| displayed == name)
    }

    pub fn get(&self, name: &str) -> Option<&NavigationButton> {
        self.buttons.get(name)
    }

    /// Displayed buttons, bottom first
    pub fn displayed(&self) -> impl Iterator<Item = &NavigationButton> {
        self.displayed.iter().filter_map(|name| self.buttons.get(name))
    }

    pub fn top(&self) -> Option<&NavigationButton> {
        self.displayed.last().and_then(|name| self.buttons.get(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ButtonAction;

    #[derive(Default)]
    struct Recorder {
        removed: Vec<String>,
    }

    impl PageTeardown for Recorder {
        fn remove_page(&mut self, name: &str) {
            self.removed.push(name.to_string());
        }
    }

    fn stack_with(names: &[&str]) -> NavigationStack {
        let mut stack = NavigationStack::new();
        for name in names {
            stack.register(NavigationButton::new(*name, name.to_uppercase(), ButtonAction::Back));
        }
        stack
    }

    #[test]
    fn test_hide_cascades_down_to_target() {
        let mut stack = stack_with(&["a", "b", "c"]);
        let mut recorder = Recorder::default();

        stack.show("a", None);
        assert_eq!(stack.depth(), 1);
        stack.show("b", Some("page-b"));
        assert_eq!(stack.depth(), 2);
        stack.show("c", Some("page-c"));
        assert_eq!(stack.depth(), 3);

        let popped = stack.hide("b", &mut recorder);
        assert_eq!(popped, vec!["c", "b"]);
        assert_eq!(recorder.removed, vec!["page-c", "page-b"]);
        assert_eq!(stack.depth(), 1);
        assert_eq!(stack.top().map(|b| b.name.as_str()), Some("a"));
        assert!(stack.get("a").unwrap().visible);
        assert!(!stack.get("b").unwrap().visible);
        assert!(!stack.get("c").unwrap().visible);
    }

    #[test]
    fn test_hide_not_displayed_drains_everything() {
        let mut stack = stack_with(&["a", "b", "c", "never-shown"]);
        let mut recorder = Recorder::default();
        stack.show("a", Some("page-a"));
        stack.show("b", None);
        stack.show("c", Some("page-c"));

        let popped = stack.hide("never-shown", &mut recorder);
        assert_eq!(popped, vec!["c", "b", "a"]);
        assert_eq!(stack.depth(), 0);
        assert_eq!(recorder.removed, vec!["page-c", "page-a"]);

        // Nothing left to free
        stack.hide("never-shown", &mut recorder);
        assert_eq!(recorder.removed.len(), 2);
    }

    #[test]
    fn test_hide_unregistered_name_is_ignored() {
        let mut stack = stack_with(&["a", "b"]);
        let mut recorder = Recorder::default();
        stack.show("a", None);
        stack.show("b", None);

        assert!(stack.hide("ghost", &mut recorder).is_empty());
        assert_eq!(stack.depth(), 2);
    }

    #[test]
    fn test_rebinding_same_page_frees_once() {
        let mut stack = stack_with(&["a", "module"]);
        let mut recorder = Recorder::default();
        stack.show("a", None);
        stack.show("module", Some("page-module"));
        stack.show("module", Some("page-module"));
        assert_eq!(stack.depth(), 2);

        stack.hide("module", &mut recorder);
        assert_eq!(recorder.removed, vec!["page-module"]);

        stack.show("module", None);
        stack.hide("module", &mut recorder);
        assert_eq!(recorder.removed.len(), 1);
    }

    #[test]
    fn test_new_binding_replaces_old_one() {
        let mut stack = stack_with(&["module"]);
        let mut recorder = Recorder::default();
        stack.show("module", Some("first"));
        stack.show("module", Some("second"));
        stack.hide("module", &mut recorder);
        assert_eq!(recorder.removed, vec!["second"]);
    }

    #[test]
    fn test_show_unknown_button_is_noop() {
        let mut stack = stack_with(&["a"]);
        stack.show("missing", Some("page"));
        assert_eq!(stack.depth(), 0);
        assert!(!stack.has_button("missing"));
    }

    #[test]
    fn test_button_cycles_between_states() {
        let mut stack = stack_with(&["a"]);
        let mut recorder = Recorder::default();
        for _ in 0..3 {
            stack.show("a", None);
            assert!(stack.get("a").unwrap().visible);
            stack.hide("a", &mut recorder);
            assert!(!stack.get("a").unwrap().visible);
        }
        assert_eq!(stack.depth(), 0);
    }

    #[test]
    fn test_reregister_displayed_button_keeps_binding() {
        let mut stack = stack_with(&["a"]);
        let mut recorder = Recorder::default();
        stack.show("a", Some("page-a"));

        stack.register(NavigationButton::new("a", "Nouveau", ButtonAction::Back));
        assert_eq!(stack.top().map(|b| b.label.as_str()), Some("Nouveau"));
        assert!(stack.get("a").unwrap().visible);

        stack.hide("a", &mut recorder);
        assert_eq!(recorder.removed, vec!["page-a"]);
    }

    #[test]
    fn test_unregister_removes_from_display() {
        let mut stack = stack_with(&["a", "b"]);
        let mut recorder = Recorder::default();
        stack.show("a", None);
        stack.show("b", Some("page-b"));

        assert!(stack.unregister("b").is_some());
        assert_eq!(stack.depth(), 1);
        assert!(!stack.has_button("b"));

        stack.hide("a", &mut recorder);
        assert!(recorder.removed.is_empty());
    }
}
