use std::sync::Arc;

use tokio::sync::RwLock;

use crate::{
    host::{Element, Surface, WidgetHost},
    models::RecommendationItem,
    services::MovieApi,
};

use super::{
    render,
    sequencer::{RequestKind, RequestSequencer},
};

pub const DEFAULT_LIMIT: usize = 6;

/// Owns the recommendation list and the results area
#[derive(Clone)]
pub struct RecommendationController {
    api: Arc<dyn MovieApi>,
    host: Arc<dyn WidgetHost>,
    sequencer: Arc<RequestSequencer>,
    items: Arc<RwLock<Vec<RecommendationItem>>>,
    default_limit: usize,
}

impl RecommendationController {
    pub fn new(
        api: Arc<dyn MovieApi>,
        host: Arc<dyn WidgetHost>,
        sequencer: Arc<RequestSequencer>,
        default_limit: usize,
    ) -> Self {
        Self {
            api,
            host,
            sequencer,
            items: Arc::new(RwLock::new(Vec::new())),
            default_limit,
        }
    }

    /// Fetches recommendations for the selected genres and replaces the list
    ///
    /// An empty result shows the "no results" message; a failure leaves the
    /// current list untouched.
    pub async fn submit(&self, selected_genres: Vec<String>) {
        let token = self.sequencer.issue(RequestKind::Recommend);
        tracing::debug!(genres = ?selected_genres, token = %token, "Recommendations issued");

        let result = self.api.recommend(selected_genres.clone()).await;

        let mut items = self.items.write().await;
        if !self.sequencer.is_latest(RequestKind::Recommend, token) {
            tracing::debug!(token = %token, "Discarding stale recommendations");
            return;
        }

        match result {
            Ok(recommendations) => {
                tracing::info!(
                    genres = ?selected_genres,
                    results = recommendations.len(),
                    "Recommendations updated"
                );
                *items = recommendations;
                self.render(&items);
            }
            Err(e) => {
                tracing::error!(error = %e, genres = ?selected_genres, "Recommendation fetch failed");
            }
        }
    }

    /// Loads the unfiltered starter list shown before any submit
    ///
    /// Failures and empty or malformed responses only log a warning; the
    /// results area stays in its initial state.
    pub async fn load_default(&self) {
        let token = self.sequencer.issue(RequestKind::Recommend);
        let result = self.api.default_recommendations().await;

        let mut items = self.items.write().await;
        if !self.sequencer.is_latest(RequestKind::Recommend, token) {
            tracing::debug!(token = %token, "Discarding stale default recommendations");
            return;
        }

        match result {
            Ok(mut recommendations) if !recommendations.is_empty() => {
                recommendations.truncate(self.default_limit);
                tracing::info!(results = recommendations.len(), "Default recommendations loaded");
                *items = recommendations;
                self.render(&items);
            }
            Ok(_) => {
                tracing::warn!("Couldn't load default recommendations: empty response");
            }
            Err(e) => {
                tracing::warn!(error = %e, "Couldn't load default recommendations");
            }
        }
    }

    pub async fn items(&self) -> Vec<RecommendationItem> {
        self.items.read().await.clone()
    }

    fn render(&self, items: &[RecommendationItem]) {
        if items.is_empty() {
            self.host.set_visible(Element::EmptyState, true);
            self.host.render_markup(Surface::Results, "");
            return;
        }

        self.host.set_visible(Element::EmptyState, false);
        self.host.render_markup(Surface::Results, &render::render_list(items));
    }
}
