use std::io::Write;

use super::{Element, Surface, WidgetHost};

/// Host for the command-line front end; prints each surface as it changes
#[derive(Debug, Default)]
pub struct TerminalHost;

impl TerminalHost {
    pub fn new() -> Self {
        Self::default()
    }

    fn print(&self, label: &str, body: &str) {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        let result = if body.is_empty() {
            writeln!(handle, "[{label}] (empty)")
        } else {
            writeln!(handle, "[{label}]\n{}", body.trim())
        };
        if let Err(e) = result.and_then(|_| handle.flush()) {
            tracing::warn!(error = %e, "Failed to write to terminal");
        }
    }
}

impl WidgetHost for TerminalHost {
    fn render_markup(&self, surface: Surface, markup: &str) {
        let label = match surface {
            Surface::Suggestions => "suggestions",
            Surface::Results => "results",
        };
        self.print(label, markup);
    }

    fn set_visible(&self, element: Element, visible: bool) {
        let label = match element {
            Element::SuggestionPanel => "suggestion panel",
            Element::EmptyState => "no results message",
        };
        let state = if visible { "shown" } else { "hidden" };
        self.print(label, state);
    }

    fn set_input_text(&self, text: &str) {
        self.print("input", text);
    }

    fn set_chip_active(&self, genre: &str, active: bool) {
        let mark = if active { "[x]" } else { "[ ]" };
        self.print("genre", &format!("{mark} {genre}"));
    }
}
