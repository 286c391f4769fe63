/// Movie data provider abstraction
///
/// The widget never talks to the network directly. Every fetch it issues goes
/// through a `MovieApi`, so controllers can be driven by the HTTP client in
/// production and by mocks or gated fakes in tests.
use crate::{
    error::AppResult,
    models::{MovieDetail, RecommendationItem, SearchResultItem},
};

pub mod http;

#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MovieApi: Send + Sync {
    /// Search titles matching the typed text
    ///
    /// An absent (`null`) result is treated as no matches.
    async fn search(&self, query: &str) -> AppResult<Vec<SearchResultItem>>;

    /// Fetch the full record for one movie
    ///
    /// Returns `Ok(None)` when the backend answers with a non-success status;
    /// callers treat that as "not available" rather than as an error.
    async fn movie_detail(&self, movie_id: &str) -> AppResult<Option<MovieDetail>>;

    /// Recommendations filtered by the given genres
    async fn recommend(&self, genres: Vec<String>) -> AppResult<Vec<RecommendationItem>>;

    /// Unfiltered starter recommendations
    ///
    /// Any response that is not a JSON array is an error.
    async fn default_recommendations(&self) -> AppResult<Vec<RecommendationItem>>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
