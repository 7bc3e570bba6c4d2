//! In-memory page doubles for exercising the controllers without a browser.

use std::collections::BTreeSet;

use crate::core::theme::{ThemeChoice, ThemeSurface};

/// [`ThemeSurface`] that records every projection it receives.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecordingSurface {
    classes: BTreeSet<String>,
    ready: bool,
    selector: Option<Vec<ThemeChoice>>,
    selected: Option<String>,
    announcements: Vec<u64>,
}

impl RecordingSurface {
    /// Surface for a page without a selector control.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Surface for a page that has a selector control.
    #[must_use]
    pub fn with_selector() -> Self {
        Self {
            selector: Some(Vec::new()),
            ..Self::default()
        }
    }

    /// Whether the target currently carries `class`.
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    /// Classes on the target, sorted.
    #[must_use]
    pub fn classes(&self) -> Vec<String> {
        self.classes.iter().cloned().collect()
    }

    /// Whether the document root was flagged as themed.
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        self.ready
    }

    /// Options currently in the selector, empty when there is no selector.
    #[must_use]
    pub fn selector_choices(&self) -> &[ThemeChoice] {
        self.selector.as_deref().unwrap_or_default()
    }

    /// Value shown by the selector.
    #[must_use]
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Change counts revealed through the status alert, in order.
    #[must_use]
    pub fn announcements(&self) -> &[u64] {
        &self.announcements
    }
}

impl ThemeSurface for RecordingSurface {
    fn add_class(&mut self, class: &str) {
        self.classes.insert(class.to_string());
    }

    fn remove_class(&mut self, class: &str) {
        self.classes.remove(class);
    }

    fn mark_ready(&mut self) {
        self.ready = true;
    }

    fn fill_selector(&mut self, choices: &[ThemeChoice], current: &str) -> bool {
        match self.selector.as_mut() {
            Some(options) => {
                *options = choices.to_vec();
                self.selected = Some(current.to_string());
                true
            }
            None => false,
        }
    }

    fn sync_selector(&mut self, theme: &str) {
        if self.selector.is_some() {
            self.selected = Some(theme.to_string());
        }
    }

    fn announce_change(&mut self, count: u64) {
        self.announcements.push(count);
    }
}
