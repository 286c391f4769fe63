use std::time::Duration;

use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Origin serving the search, movie and recommend endpoints
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Quiet period before a typed query is sent, in milliseconds
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Number of starter recommendations shown on load
    #[serde(default = "default_recommendation_limit")]
    pub default_recommendation_limit: usize,

    /// Genre chips offered to the user (comma separated in the environment)
    #[serde(default = "default_genres")]
    pub genres: Vec<String>,
}

fn default_api_base_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_debounce_ms() -> u64 {
    200
}

fn default_recommendation_limit() -> usize {
    6
}

fn default_genres() -> Vec<String> {
    [
        "Action",
        "Adventure",
        "Animation",
        "Comedy",
        "Crime",
        "Drama",
        "Family",
        "Fantasy",
        "Horror",
        "Mystery",
        "Romance",
        "Science Fiction",
        "Thriller",
    ]
    .iter()
    .map(|g| g.to_string())
    .collect()
}

/// Settings the widget itself needs, independent of where they came from
#[derive(Debug, Clone)]
pub struct WidgetConfig {
    pub debounce: Duration,
    pub default_limit: usize,
    pub genres: Vec<String>,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(default_debounce_ms()),
            default_limit: default_recommendation_limit(),
            genres: default_genres(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    pub fn widget(&self) -> WidgetConfig {
        WidgetConfig {
            debounce: Duration::from_millis(self.debounce_ms),
            default_limit: self.default_recommendation_limit,
            genres: self
                .genres
                .iter()
                .map(|g| g.trim().to_string())
                .filter(|g| !g.is_empty())
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_environment() {
        let config: Config = envy::from_iter(Vec::<(String, String)>::new()).unwrap();
        assert_eq!(config.api_base_url, "http://127.0.0.1:5000");
        assert_eq!(config.debounce_ms, 200);
        assert_eq!(config.default_recommendation_limit, 6);
        assert!(config.genres.contains(&"Comedy".to_string()));
    }

    #[test]
    fn test_overrides_and_genre_list() {
        let vars = vec![
            ("API_BASE_URL".to_string(), "http://movies.local".to_string()),
            ("DEBOUNCE_MS".to_string(), "50".to_string()),
            ("GENRES".to_string(), "Drama, Horror,,Comedy".to_string()),
        ];
        let config: Config = envy::from_iter(vars).unwrap();
        let widget = config.widget();

        assert_eq!(config.api_base_url, "http://movies.local");
        assert_eq!(widget.debounce, Duration::from_millis(50));
        assert_eq!(widget.genres, vec!["Drama", "Horror", "Comedy"]);
    }
}
