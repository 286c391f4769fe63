/// HTTP provider for the movie backend
///
/// Endpoints:
/// 1. Suggestions: `GET /api/search?q=<text>`
/// 2. Detail: `GET /api/movie/{id}`
/// 3. Filtered recommendations: `POST /api/recommend` with `{"genres": [...]}`
/// 4. Starter recommendations: `GET /api/recommend`
use crate::{
    error::{AppError, AppResult},
    models::{MovieDetail, RecommendationItem, RecommendationRequest, SearchResultItem},
    services::{
        providers::MovieApi,
        request_id::{RequestId, REQUEST_ID_HEADER},
    },
};
use reqwest::{Client as HttpClient, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use tracing::Instrument;

const SEARCH_ENDPOINT: &str = "/api/search";
const MOVIE_ENDPOINT: &str = "/api/movie";
const RECOMMEND_ENDPOINT: &str = "/api/recommend";

#[derive(Clone)]
pub struct HttpMovieApi {
    http_client: HttpClient,
    api_url: Url,
}

impl HttpMovieApi {
    /// Creates a provider rooted at `api_url` (e.g. `http://127.0.0.1:5000`)
    pub fn new(api_url: &str) -> AppResult<Self> {
        let api_url = Url::parse(api_url)
            .map_err(|e| AppError::InvalidInput(format!("Invalid API base URL {api_url}: {e}")))?;
        if api_url.cannot_be_a_base() {
            return Err(AppError::InvalidInput(format!(
                "API base URL cannot be a base: {api_url}"
            )));
        }

        Ok(Self {
            http_client: HttpClient::new(),
            api_url,
        })
    }

    /// Builds an endpoint URL, percent-encoding each path segment
    fn endpoint(&self, segments: &[&str]) -> AppResult<Url> {
        let mut url = self.api_url.clone();
        url.path_segments_mut()
            .map_err(|_| AppError::Internal("API base URL cannot be a base".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Sends a request tagged with a fresh request id
    async fn send(
        &self,
        method: &str,
        endpoint: &'static str,
        request: RequestBuilder,
    ) -> AppResult<Response> {
        let request_id = RequestId::new();
        let span = request_id.span(method, endpoint);

        async move {
            let response = request
                .header(REQUEST_ID_HEADER, request_id.as_str())
                .send()
                .await?;
            tracing::debug!(status = %response.status(), "Response received");
            Ok::<_, AppError>(response)
        }
        .instrument(span)
        .await
    }

    /// Fails with `AppError::Status` on any non-success status
    fn ensure_success(endpoint: &'static str, response: Response) -> AppResult<Response> {
        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Status { endpoint, status });
        }
        Ok(response)
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> AppResult<T> {
        let response_text = response.text().await?;
        serde_json::from_str(&response_text).map_err(|e| {
            tracing::debug!(error = %e, response = %response_text, "Failed to decode response");
            AppError::Decode(e)
        })
    }
}

#[async_trait::async_trait]
impl MovieApi for HttpMovieApi {
    async fn search(&self, query: &str) -> AppResult<Vec<SearchResultItem>> {
        let url = self.endpoint(&["api", "search"])?;
        let request = self.http_client.get(url).query(&[("q", query)]);
        let response = self.send("GET", SEARCH_ENDPOINT, request).await?;
        let response = Self::ensure_success(SEARCH_ENDPOINT, response)?;

        let items: Option<Vec<SearchResultItem>> = Self::read_json(response).await?;
        let items = items.unwrap_or_default();

        tracing::debug!(query = %query, results = items.len(), "Search completed");
        Ok(items)
    }

    async fn movie_detail(&self, movie_id: &str) -> AppResult<Option<MovieDetail>> {
        let url = self.endpoint(&["api", "movie", movie_id])?;
        let request = self.http_client.get(url);
        let response = self.send("GET", MOVIE_ENDPOINT, request).await?;

        if !response.status().is_success() {
            tracing::debug!(
                movie_id = %movie_id,
                status = %response.status(),
                "Movie detail unavailable"
            );
            return Ok(None);
        }

        let detail: MovieDetail = Self::read_json(response).await?;
        Ok(Some(detail))
    }

    async fn recommend(&self, genres: Vec<String>) -> AppResult<Vec<RecommendationItem>> {
        let url = self.endpoint(&["api", "recommend"])?;
        let body = RecommendationRequest { genres };
        let request = self.http_client.post(url).json(&body);
        let response = self.send("POST", RECOMMEND_ENDPOINT, request).await?;
        let response = Self::ensure_success(RECOMMEND_ENDPOINT, response)?;

        let items: Option<Vec<RecommendationItem>> = Self::read_json(response).await?;
        Ok(items.unwrap_or_default())
    }

    async fn default_recommendations(&self) -> AppResult<Vec<RecommendationItem>> {
        let url = self.endpoint(&["api", "recommend"])?;
        let request = self.http_client.get(url);
        let response = self.send("GET", RECOMMEND_ENDPOINT, request).await?;
        let response = Self::ensure_success(RECOMMEND_ENDPOINT, response)?;

        let value: serde_json::Value = Self::read_json(response).await?;
        if !value.is_array() {
            return Err(AppError::UnexpectedResponse(
                "default recommendations are not a JSON array".to_string(),
            ));
        }

        Ok(serde_json::from_value(value)?)
    }

    fn name(&self) -> &'static str {
        "http"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_segments() {
        let api = HttpMovieApi::new("http://movies.local").unwrap();
        let url = api.endpoint(&["api", "movie", "42"]).unwrap();
        assert_eq!(url.as_str(), "http://movies.local/api/movie/42");
    }

    #[test]
    fn test_endpoint_keeps_base_path_and_encodes_ids() {
        let api = HttpMovieApi::new("http://movies.local/widget/").unwrap();
        let url = api.endpoint(&["api", "movie", "a/b c"]).unwrap();
        assert_eq!(url.as_str(), "http://movies.local/widget/api/movie/a%2Fb%20c");
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            HttpMovieApi::new("not a url"),
            Err(AppError::InvalidInput(_))
        ));
        assert!(matches!(
            HttpMovieApi::new("mailto:someone@example.com"),
            Err(AppError::InvalidInput(_))
        ));
    }
}
