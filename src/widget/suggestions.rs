use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;

use crate::{
    host::{Element, Surface, WidgetHost},
    models::{MovieDetail, SearchResultItem},
    services::MovieApi,
};

use super::{
    debounce::Debouncer,
    render,
    sequencer::{RequestKind, RequestSequencer},
};

type SearchAction = Box<dyn Fn(String) -> Pin<Box<dyn Future<Output = ()> + Send>> + Send + Sync>;

/// Everything the suggestion dropdown currently shows
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SuggestionState {
    /// Trimmed input text
    pub input_text: String,
    pub suggestions: Vec<SearchResultItem>,
    pub panel_visible: bool,
    /// Last detail record rendered from a selection
    pub detail: Option<MovieDetail>,
}

struct SearchContext {
    api: Arc<dyn MovieApi>,
    host: Arc<dyn WidgetHost>,
    sequencer: Arc<RequestSequencer>,
    state: RwLock<SuggestionState>,
}

impl SearchContext {
    async fn perform_search(&self, text: String) {
        let token = self.sequencer.issue(RequestKind::Search);
        tracing::debug!(query = %text, token = %token, provider = self.api.name(), "Search issued");

        let result = self.api.search(&text).await;

        let mut state = self.state.write().await;
        if !self.sequencer.is_latest(RequestKind::Search, token) {
            tracing::debug!(query = %text, token = %token, "Discarding stale search response");
            return;
        }
        if state.input_text != text {
            tracing::debug!(query = %text, input = %state.input_text, "Discarding search for replaced input");
            return;
        }

        match result {
            Ok(items) => {
                tracing::info!(query = %text, results = items.len(), "Suggestions updated");
                let markup = render::render_suggestions(&items);
                state.suggestions = items;
                state.panel_visible = true;
                self.host.render_markup(Surface::Suggestions, &markup);
                self.host.set_visible(Element::SuggestionPanel, true);
            }
            Err(e) => {
                tracing::error!(error = %e, query = %text, "Search failed");
            }
        }
    }

    /// Hides the panel and makes every in-flight search stale
    fn retire_searches(&self, state: &mut SuggestionState) {
        self.sequencer.issue(RequestKind::Search);
        state.panel_visible = false;
        self.host.set_visible(Element::SuggestionPanel, false);
    }
}

/// Owns the search input, the suggestion panel, and selection-to-detail
#[derive(Clone)]
pub struct SuggestionController {
    context: Arc<SearchContext>,
    debouncer: Arc<Debouncer<String, SearchAction>>,
}

impl SuggestionController {
    pub fn new(
        api: Arc<dyn MovieApi>,
        host: Arc<dyn WidgetHost>,
        sequencer: Arc<RequestSequencer>,
        debounce: Duration,
    ) -> Self {
        let context = Arc::new(SearchContext {
            api,
            host,
            sequencer,
            state: RwLock::new(SuggestionState::default()),
        });

        let search_context = Arc::clone(&context);
        let action: SearchAction = Box::new(
            move |text: String| -> Pin<Box<dyn Future<Output = ()> + Send>> {
                let context = Arc::clone(&search_context);
                Box::pin(async move { context.perform_search(text).await })
            },
        );

        Self {
            context,
            debouncer: Arc::new(Debouncer::new(debounce, action)),
        }
    }

    /// Handles a change of the input text
    ///
    /// Empty (or whitespace-only) text clears and hides the panel right away
    /// without issuing a fetch; anything else schedules a debounced search.
    pub async fn on_input_changed(&self, text: &str) {
        let text = text.trim().to_string();

        if text.is_empty() {
            self.debouncer.cancel().await;
            let mut state = self.context.state.write().await;
            state.input_text.clear();
            state.suggestions.clear();
            self.context.retire_searches(&mut state);
            self.context.host.render_markup(Surface::Suggestions, "");
            return;
        }

        self.context.state.write().await.input_text = text.clone();
        self.debouncer.trigger(text).await;
    }

    /// Runs a search for `text` immediately, skipping the debounce
    ///
    /// The input is set to `text` first, so the result is applied only while
    /// the input still holds it.
    pub async fn perform_search(&self, text: &str) {
        let text = text.trim().to_string();
        self.context.state.write().await.input_text = text.clone();
        self.context.perform_search(text).await;
    }

    /// Selects the suggestion at `index` in the current panel
    pub async fn select_index(&self, index: usize) {
        let item = self.context.state.read().await.suggestions.get(index).cloned();
        match item {
            Some(item) => self.on_suggestion_selected(item).await,
            None => tracing::debug!(index, "Ignoring click on a missing suggestion"),
        }
    }

    /// Hides the panel, copies the title into the input, and shows the
    /// movie's detail once it arrives
    ///
    /// A non-success status from the detail endpoint is a silent no-op.
    pub async fn on_suggestion_selected(&self, item: SearchResultItem) {
        self.debouncer.cancel().await;
        {
            let mut state = self.context.state.write().await;
            self.context.retire_searches(&mut state);
            state.input_text = item.title.clone();
            self.context.host.set_input_text(&item.title);
        }

        let sequencer = &self.context.sequencer;
        let token = sequencer.issue(RequestKind::Detail);
        tracing::debug!(movie_id = %item.movie_id, token = %token, "Detail issued");

        let result = self.context.api.movie_detail(&item.movie_id).await;

        let mut state = self.context.state.write().await;
        if !sequencer.is_latest(RequestKind::Detail, token) {
            tracing::debug!(movie_id = %item.movie_id, token = %token, "Discarding stale detail response");
            return;
        }

        match result {
            Ok(Some(detail)) => {
                tracing::info!(movie_id = %item.movie_id, "Movie detail rendered");
                let markup = render::render_single(&detail);
                self.context.host.set_visible(Element::EmptyState, false);
                self.context.host.render_markup(Surface::Results, &markup);
                state.detail = Some(detail);
            }
            Ok(None) => {
                tracing::debug!(movie_id = %item.movie_id, "Movie detail unavailable");
            }
            Err(e) => {
                tracing::error!(error = %e, movie_id = %item.movie_id, "Movie detail fetch failed");
            }
        }
    }

    /// Pointer interaction outside the input and the panel
    pub async fn on_blur_outside(&self) {
        let mut state = self.context.state.write().await;
        state.panel_visible = false;
        self.context.host.set_visible(Element::SuggestionPanel, false);
    }

    pub async fn state(&self) -> SuggestionState {
        self.context.state.read().await.clone()
    }

    pub async fn has_pending_search(&self) -> bool {
        self.debouncer.is_pending().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::host::MemoryHost;
    use crate::services::providers::MockMovieApi;
    use reqwest::StatusCode;

    const DELAY: Duration = Duration::from_millis(200);

    fn hit(id: &str, title: &str) -> SearchResultItem {
        SearchResultItem {
            movie_id: id.to_string(),
            title: title.to_string(),
        }
    }

    fn controller(api: MockMovieApi) -> (SuggestionController, Arc<MemoryHost>) {
        let host = Arc::new(MemoryHost::new());
        let controller = SuggestionController::new(
            Arc::new(api),
            host.clone(),
            Arc::new(RequestSequencer::new()),
            DELAY,
        );
        (controller, host)
    }

    #[tokio::test(start_paused = true)]
    async fn test_typing_burst_issues_one_search() {
        let mut api = MockMovieApi::new();
        api.expect_name().return_const("mock");
        api.expect_search()
            .withf(|q| q == "cat")
            .times(1)
            .returning(|_| Ok(vec![hit("1", "Cat People")]));
        let (controller, host) = controller(api);

        for text in ["c", "ca", "cat"] {
            controller.on_input_changed(text).await;
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        tokio::time::sleep(Duration::from_millis(300)).await;

        let state = controller.state().await;
        assert_eq!(state.suggestions, vec![hit("1", "Cat People")]);
        assert!(state.panel_visible);
        let snapshot = host.snapshot();
        assert!(snapshot.suggestion_panel_visible);
        assert!(snapshot.suggestions_markup.contains("Cat People"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_input_clears_without_fetching() {
        let mut api = MockMovieApi::new();
        api.expect_search().times(0);
        let (controller, host) = controller(api);

        controller.on_input_changed("ca").await;
        controller.on_input_changed("   ").await;

        let state = controller.state().await;
        assert!(state.suggestions.is_empty());
        assert!(!state.panel_visible);
        assert!(!host.snapshot().suggestion_panel_visible);
        assert_eq!(host.snapshot().suggestions_markup, "");
        assert!(!controller.has_pending_search().await);

        tokio::time::sleep(Duration::from_millis(500)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_input_is_trimmed_before_searching() {
        let mut api = MockMovieApi::new();
        api.expect_name().return_const("mock");
        api.expect_search()
            .withf(|q| q == "heat")
            .times(1)
            .returning(|_| Ok(vec![]));
        let (controller, host) = controller(api);

        controller.on_input_changed("  heat ").await;
        assert_eq!(controller.state().await.input_text, "heat");
        tokio::time::sleep(Duration::from_millis(300)).await;

        assert!(host.snapshot().suggestions_markup.contains(render::NO_RESULTS));
        assert!(controller.state().await.panel_visible);
    }

    #[tokio::test]
    async fn test_search_for_cleared_input_is_discarded() {
        let mut api = MockMovieApi::new();
        api.expect_name().return_const("mock");
        api.expect_search()
            .withf(|q| q == "cat")
            .times(1)
            .returning(|_| Ok(vec![hit("1", "Cat People")]));
        let (controller, host) = controller(api);

        // The debounced action starts after the input has already been
        // cleared, as it can when the two race on a multi-threaded runtime.
        controller.on_input_changed("").await;
        controller.context.perform_search("cat".to_string()).await;

        let state = controller.state().await;
        assert!(!state.panel_visible);
        assert!(state.suggestions.is_empty());
        let snapshot = host.snapshot();
        assert!(!snapshot.suggestion_panel_visible);
        assert_eq!(snapshot.suggestions_markup, "");
    }

    #[tokio::test]
    async fn test_search_failure_keeps_previous_suggestions() {
        let mut api = MockMovieApi::new();
        api.expect_name().return_const("mock");
        api.expect_search()
            .withf(|q| q == "alien")
            .returning(|_| Ok(vec![hit("2", "Alien")]));
        api.expect_search()
            .withf(|q| q == "aliens")
            .returning(|_| Err(AppError::Internal("connection reset".to_string())));
        let (controller, host) = controller(api);

        controller.perform_search("alien").await;
        let before = host.snapshot();
        controller.perform_search("aliens").await;

        assert_eq!(controller.state().await.suggestions, vec![hit("2", "Alien")]);
        assert_eq!(host.snapshot(), before);
        assert_eq!(host.render_count(Surface::Suggestions), 1);
    }

    #[tokio::test]
    async fn test_selection_renders_detail() {
        let mut api = MockMovieApi::new();
        api.expect_name().return_const("mock");
        api.expect_search().returning(|_| Ok(vec![hit("7", "Up")]));
        api.expect_movie_detail()
            .withf(|id| id == "7")
            .times(1)
            .returning(|_| {
                Ok(Some(MovieDetail {
                    title: "Up".to_string(),
                    predicted_genres: vec!["Animation".to_string()],
                    summary: Some("Balloons.".to_string()),
                    score: Some(4.0),
                }))
            });
        let (controller, host) = controller(api);

        controller.perform_search("up").await;
        controller.select_index(0).await;

        let snapshot = host.snapshot();
        assert!(!snapshot.suggestion_panel_visible);
        assert_eq!(snapshot.input_text, "Up");
        assert!(snapshot.results_markup.contains("Balloons."));
        assert!(snapshot.results_markup.contains("★ 4/5"));
        assert!(!snapshot.empty_state_visible);
        assert_eq!(controller.state().await.input_text, "Up");
    }

    #[tokio::test]
    async fn test_detail_not_found_is_silent() {
        let mut api = MockMovieApi::new();
        api.expect_movie_detail().times(1).returning(|_| Ok(None));
        let (controller, host) = controller(api);

        controller.on_suggestion_selected(hit("404", "Missing")).await;

        let snapshot = host.snapshot();
        assert!(!snapshot.suggestion_panel_visible);
        assert_eq!(snapshot.results_markup, "");
        assert_eq!(host.render_count(Surface::Results), 0);
        assert_eq!(controller.state().await.detail, None);
    }

    #[tokio::test]
    async fn test_detail_transport_error_is_swallowed() {
        let mut api = MockMovieApi::new();
        api.expect_movie_detail().returning(|_| {
            Err(AppError::Status {
                endpoint: "/api/movie",
                status: StatusCode::BAD_GATEWAY,
            })
        });
        let (controller, host) = controller(api);

        controller.on_suggestion_selected(hit("1", "Heat")).await;

        assert_eq!(host.render_count(Surface::Results), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_selection_cancels_pending_search() {
        let mut api = MockMovieApi::new();
        api.expect_search().times(0);
        api.expect_movie_detail().returning(|_| Ok(None));
        let (controller, host) = controller(api);

        controller.on_input_changed("he").await;
        controller.on_suggestion_selected(hit("1", "Heat")).await;
        tokio::time::sleep(Duration::from_millis(500)).await;

        assert!(!host.snapshot().suggestion_panel_visible);
    }

    #[tokio::test]
    async fn test_click_outside_hides_panel() {
        let mut api = MockMovieApi::new();
        api.expect_name().return_const("mock");
        api.expect_search().returning(|_| Ok(vec![hit("1", "Heat")]));
        let (controller, host) = controller(api);

        controller.perform_search("heat").await;
        assert!(host.snapshot().suggestion_panel_visible);

        controller.on_blur_outside().await;
        assert!(!host.snapshot().suggestion_panel_visible);
        assert!(!controller.state().await.panel_visible);
        // Content is kept; only visibility changes.
        assert_eq!(controller.state().await.suggestions.len(), 1);
    }
}
