//! Page registry - named pages, exactly one of them visible

use std::collections::HashMap;

/// Capability handed to the navigation stack for tearing down pages
pub trait PageTeardown {
    fn remove_page(&mut self, name: &str);
}

/// Registry of opaque page handles keyed by unique name
pub struct PanelRegistry<P> {
    pages: HashMap<String, P>,
    visible: Option<String>,
}

impl<P> Default for PanelRegistry<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> PanelRegistry<P> {
    pub fn new() -> Self {
        PanelRegistry {
            pages: HashMap::new(),
            visible: None,
        }
    }

    /// Register `handle` under `name`. Returns false if the name is taken.
    pub fn add_page(&mut self, handle: P, name: &str) -> bool {
        if self.pages.contains_key(name) {
            tracing::debug!(page = name, "Page already registered");
            return false;
        }
        self.pages.insert(name.to_string(), handle);
        tracing::debug!(page = name, "Page registered");
        true
    }

    /// Make `name` the sole visible page. Returns false if it is unknown.
    pub fn show_page(&mut self, name: &str) -> bool {
        if !self.pages.contains_key(name) {
            tracing::warn!(page = name, "Cannot show unknown page");
            return false;
        }
        self.visible = Some(name.to_string());
        true
    }

    pub fn add_and_show_page(&mut self, handle: P, name: &str) -> bool {
        self.add_page(handle, name) && self.show_page(name)
    }

    /// Unregister and drop the page; no-op if absent
    pub fn remove_page(&mut self, name: &str) {
        if self.pages.remove(name).is_none() {
            return;
        }
        if self.visible.as_deref() == Some(name) {
            self.visible = None;
        }
        tracing::debug!(page = name, "Page removed");
    }

    pub fn has_page(&self, name: &str) -> bool {
        self.pages.contains_key(name)
    }

    pub fn visible_name(&self) -> Option<&str> {
        self.visible.as_deref()
    }

    pub fn visible(&self) -> Option<&P> {
        self.visible.as_ref().and_then(|name| self.pages.get(name))
    }

    pub fn visible_mut(&mut self) -> Option<&mut P> {
        match &self.visible {
            Some(name) => self.pages.get_mut(name),
            None => None,
        }
    }

    pub fn get(&self, name: &str) -> Option<&P> {
        self.pages.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut P> {
        self.pages.get_mut(name)
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

impl<P> PageTeardown for PanelRegistry<P> {
    fn remove_page(&mut self, name: &str) {
        PanelRegistry::remove_page(self, name);
    }
}
