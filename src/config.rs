use dotenvy::dotenv;
use once_cell::sync::Lazy;
use std::env;

pub const DEFAULT_SEARCH_API_BASE_URL: &str = "http://localhost:5050";
pub const DEFAULT_ML_API_BASE_URL: &str = "http://localhost:5070";

pub static CONFIG: Lazy<Config> = Lazy::new(Config::from_env);

/// How responses of overlapping searches are applied to the view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResponseOrdering {
    /// Every response renders when it arrives; the last one to resolve wins.
    #[default]
    ArrivalOrder,
    /// Responses older than the newest submission are dropped.
    LatestSubmission,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub search_api_base_url: String,
    pub ml_api_base_url: String,
    pub ordering: ResponseOrdering,
}

impl Config {
    pub fn new(search_api_base_url: impl Into<String>, ml_api_base_url: impl Into<String>) -> Self {
        Config {
            search_api_base_url: trim_base_url(search_api_base_url.into()),
            ml_api_base_url: trim_base_url(ml_api_base_url.into()),
            ordering: ResponseOrdering::default(),
        }
    }

    pub fn from_env() -> Self {
        dotenv().ok(); // Load .env file if present
        Config::new(
            get_env_or_default("SEARCH_API_BASE_URL", DEFAULT_SEARCH_API_BASE_URL),
            get_env_or_default("ML_API_BASE_URL", DEFAULT_ML_API_BASE_URL),
        )
    }

    pub fn with_ordering(mut self, ordering: ResponseOrdering) -> Self {
        self.ordering = ordering;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::new(DEFAULT_SEARCH_API_BASE_URL, DEFAULT_ML_API_BASE_URL)
    }
}

fn get_env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn trim_base_url(url: String) -> String {
    url.trim_end_matches('/').to_string()
}

#[test]
fn test_base_urls_lose_trailing_slashes() {
    let config = Config::new("http://search.local:5050/", "http://ml.local//");
    assert_eq!(config.search_api_base_url, "http://search.local:5050");
    assert_eq!(config.ml_api_base_url, "http://ml.local");
    assert_eq!(config.ordering, ResponseOrdering::ArrivalOrder);
}
