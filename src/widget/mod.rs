//! Search-and-recommendation widget core.
//!
//! Typing flows through the [`Debouncer`] and the [`RequestSequencer`] into the
//! suggestion panel; picking a suggestion shows its detail; genre chips and
//! submit drive the recommendation list. All markup comes from [`render`].

pub mod debounce;
pub mod escape;
pub mod genres;
pub mod recommendations;
pub mod render;
pub mod sequencer;
pub mod suggestions;

use std::sync::Arc;

pub use debounce::Debouncer;
pub use escape::{escape, Escapable};
pub use genres::GenreSelectionController;
pub use recommendations::RecommendationController;
pub use sequencer::{RequestKind, RequestSequencer, RequestToken};
pub use suggestions::{SuggestionController, SuggestionState};

use crate::{
    config::WidgetConfig,
    host::{ClickTarget, UiEvent, WidgetHost},
    services::MovieApi,
};

/// The three controllers wired to one host and one request sequencer
#[derive(Clone)]
pub struct Widget {
    suggestions: SuggestionController,
    genres: GenreSelectionController,
    recommendations: RecommendationController,
}

impl Widget {
    pub fn new(api: Arc<dyn MovieApi>, host: Arc<dyn WidgetHost>, config: WidgetConfig) -> Self {
        let sequencer = Arc::new(RequestSequencer::new());

        Self {
            suggestions: SuggestionController::new(
                Arc::clone(&api),
                Arc::clone(&host),
                Arc::clone(&sequencer),
                config.debounce,
            ),
            genres: GenreSelectionController::new(Arc::clone(&host), config.genres),
            recommendations: RecommendationController::new(
                api,
                host,
                sequencer,
                config.default_limit,
            ),
        }
    }

    /// Page-load work: paint the chips and fetch the starter list
    pub async fn start(&self) {
        self.genres.sync_host().await;
        self.recommendations.load_default().await;
    }

    /// Routes one host event to the controller that owns it
    pub async fn dispatch(&self, event: UiEvent) {
        tracing::trace!(event = ?event, "Dispatching UI event");
        match event {
            UiEvent::Input(text) => self.suggestions.on_input_changed(&text).await,
            UiEvent::SuggestionClicked(index) => self.suggestions.select_index(index).await,
            UiEvent::Click(ClickTarget::Outside) => self.suggestions.on_blur_outside().await,
            UiEvent::Click(ClickTarget::Input | ClickTarget::SuggestionPanel) => {}
            UiEvent::ChipClicked(genre) => {
                self.genres.on_chip_toggled(&genre).await;
            }
            UiEvent::SubmitClicked => {
                let selected = self.genres.get_selection().await;
                self.recommendations.submit(selected).await;
            }
        }
    }

    pub fn suggestions(&self) -> &SuggestionController {
        &self.suggestions
    }

    pub fn genres(&self) -> &GenreSelectionController {
        &self.genres
    }

    pub fn recommendations(&self) -> &RecommendationController {
        &self.recommendations
    }
}
