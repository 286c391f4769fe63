//! The widget's view of its surroundings.
//!
//! Controllers only read events and write escaped markup; they never know
//! whether the host is a browser page, a terminal, or a test double.

pub mod memory;
pub mod terminal;

pub use memory::{HostCall, HostSnapshot, MemoryHost};
pub use terminal::TerminalHost;

/// Regions that receive rendered markup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Surface {
    /// Dropdown under the search input
    Suggestions,
    /// Recommendation list / selected movie area
    Results,
}

/// Elements whose visibility the widget toggles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Element {
    SuggestionPanel,
    /// "No results" message below the results area
    EmptyState,
}

/// Capability interface implemented by every host
pub trait WidgetHost: Send + Sync {
    /// Replaces the content of `surface`; `markup` is already escaped
    fn render_markup(&self, surface: Surface, markup: &str);

    fn set_visible(&self, element: Element, visible: bool);

    /// Overwrites the text shown in the search input
    fn set_input_text(&self, text: &str);

    /// Sets a chip's active state and its checkbox together
    fn set_chip_active(&self, genre: &str, active: bool);
}

/// Where a pointer interaction landed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    Input,
    SuggestionPanel,
    Outside,
}

/// Events a host forwards to the widget
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    /// The search input's text changed
    Input(String),
    /// A suggestion in the panel was clicked, by position
    SuggestionClicked(usize),
    Click(ClickTarget),
    /// A genre chip (or its checkbox) was clicked
    ChipClicked(String),
    SubmitClicked,
}
