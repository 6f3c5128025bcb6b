//! SearXNG client error types.

use std::sync::Arc;

/// Errors from the SearXNG search client.
#[derive(Debug, thiserror::Error)]
pub enum SearxngError {
    /// No SearXNG base URL configured.
    #[error("SEARXNG_URL is not configured")]
    MissingBaseUrl,

    /// Invalid search query.
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// Page numbers start at 1.
    #[error("invalid pageno: must be at least 1")]
    InvalidPage,

    /// Unknown time range.
    #[error("invalid time_range: {0} (expected day, month, or year)")]
    InvalidTimeRange(String),

    /// Unknown safe search level.
    #[error("invalid safesearch: {0} (expected 0, 1, or 2)")]
    InvalidSafeSearch(String),

    /// Non-success response from SearXNG.
    #[error("SearXNG returned status {status}: {body}")]
    HttpError { status: u16, body: String },

    /// Request timeout.
    #[error("request timeout")]
    Timeout,

    /// Network error.
    #[error("search request failed: {0}")]
    Network(Arc<reqwest::Error>),

    /// Response parse error.
    #[error("failed to parse response: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for SearxngError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() { SearxngError::Timeout } else { SearxngError::Network(Arc::new(err)) }
    }
}

impl SearxngError {
    /// Whether the caller supplied bad parameters (as opposed to a backend failure).
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            SearxngError::InvalidQuery(_)
                | SearxngError::InvalidPage
                | SearxngError::InvalidTimeRange(_)
                | SearxngError::InvalidSafeSearch(_)
        )
    }
}

impl From<SearxngError> for searxng_mcp_core::Error {
    fn from(err: SearxngError) -> Self {
        use searxng_mcp_core::Error;

        match err {
            SearxngError::Timeout => Error::FetchTimeout(err.to_string()),
            SearxngError::Parse(_) => Error::SearchFailed(err.to_string()),
            SearxngError::HttpError { .. } | SearxngError::Network(_) => Error::HttpError(err.to_string()),
            _ => Error::InvalidInput(err.to_string()),
        }
    }
}
