//! SearXNG JSON response types.

use serde::{Deserialize, Serialize};

/// Response from `/search?format=json`.
///
/// SearXNG returns many more fields (infoboxes, suggestions, answers); only
/// the result list is used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<SearchResult>,
}

/// A single search hit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: Option<String>,
    pub url: String,
    #[serde(default)]
    pub score: f64,
}

impl SearchResult {
    /// Snippet text, empty when the engine sent none.
    pub fn snippet(&self) -> &str {
        self.content.as_deref().unwrap_or("")
    }
}

impl SearchResponse {
    pub fn result_count(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}
