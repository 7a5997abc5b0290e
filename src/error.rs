use thiserror::Error;

/// The only message a failed search ever shows.
pub const SEARCH_FAILED_MESSAGE: &str =
    "An error occurred while fetching search results. Please try again later.";

/// Why a search failed. Every variant surfaces as [`SEARCH_FAILED_MESSAGE`];
/// the distinction only reaches the logs.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("search request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("search response is not JSON: {0}")]
    Json(#[source] serde_json::Error),
    #[error("search response is not a result set: {0}")]
    Decode(#[source] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("visited url report failed: {0}")]
    Request(#[from] reqwest::Error),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClickError {
    #[error("no results are shown")]
    NoResults,
    #[error("no result link #{0}")]
    NoSuchLink(usize),
}
