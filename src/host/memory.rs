use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use super::{Element, Surface, WidgetHost};

/// One capability call, in the order the widget made it
#[derive(Debug, Clone, PartialEq)]
pub enum HostCall {
    Render(Surface, String),
    Visible(Element, bool),
    InputText(String),
    Chip(String, bool),
}

/// Current state of every surface the widget writes to
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HostSnapshot {
    pub suggestions_markup: String,
    pub results_markup: String,
    pub suggestion_panel_visible: bool,
    pub empty_state_visible: bool,
    pub input_text: String,
    /// Chip "active" flags, which double as checkbox state
    pub chips: BTreeMap<String, bool>,
}

/// Headless host that records everything written to it
#[derive(Debug, Default)]
pub struct MemoryHost {
    inner: Mutex<MemoryHostInner>,
}

#[derive(Debug, Default)]
struct MemoryHostInner {
    snapshot: HostSnapshot,
    calls: Vec<HostCall>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> HostSnapshot {
        self.lock().snapshot.clone()
    }

    pub fn calls(&self) -> Vec<HostCall> {
        self.lock().calls.clone()
    }

    /// Number of times `surface` was rendered
    pub fn render_count(&self, surface: Surface) -> usize {
        self.lock()
            .calls
            .iter()
            .filter(|call| matches!(call, HostCall::Render(s, _) if *s == surface))
            .count()
    }

    fn lock(&self) -> MutexGuard<'_, MemoryHostInner> {
        // A panicking test thread must not hide the recorded state from others.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl WidgetHost for MemoryHost {
    fn render_markup(&self, surface: Surface, markup: &str) {
        let mut inner = self.lock();
        match surface {
            Surface::Suggestions => inner.snapshot.suggestions_markup = markup.to_string(),
            Surface::Results => inner.snapshot.results_markup = markup.to_string(),
        }
        inner.calls.push(HostCall::Render(surface, markup.to_string()));
    }

    fn set_visible(&self, element: Element, visible: bool) {
        let mut inner = self.lock();
        match element {
            Element::SuggestionPanel => inner.snapshot.suggestion_panel_visible = visible,
            Element::EmptyState => inner.snapshot.empty_state_visible = visible,
        }
        inner.calls.push(HostCall::Visible(element, visible));
    }

    fn set_input_text(&self, text: &str) {
        let mut inner = self.lock();
        inner.snapshot.input_text = text.to_string();
        inner.calls.push(HostCall::InputText(text.to_string()));
    }

    fn set_chip_active(&self, genre: &str, active: bool) {
        let mut inner = self.lock();
        inner.snapshot.chips.insert(genre.to_string(), active);
        inner.calls.push(HostCall::Chip(genre.to_string(), active));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_state_and_calls() {
        let host = MemoryHost::new();
        host.render_markup(Surface::Results, "<p>x</p>");
        host.set_visible(Element::EmptyState, true);
        host.set_chip_active("Drama", true);

        let snapshot = host.snapshot();
        assert_eq!(snapshot.results_markup, "<p>x</p>");
        assert!(snapshot.empty_state_visible);
        assert_eq!(snapshot.chips.get("Drama"), Some(&true));
        assert_eq!(host.render_count(Surface::Results), 1);
        assert_eq!(host.render_count(Surface::Suggestions), 0);
        assert_eq!(host.calls().len(), 3);
    }
}
