pub mod movie;

pub use movie::{MovieDetail, RecommendationItem, SearchResultItem};

use serde::Serialize;

/// Body sent to `POST /api/recommend`
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RecommendationRequest {
    pub genres: Vec<String>,
}
