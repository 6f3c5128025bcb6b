//! searxng_web_search tool implementation.
//!
//! Runs a query against the configured SearXNG instance and renders the hits
//! as Markdown.

use std::fmt::Write as _;
use std::time::Instant;

use rmcp::{ErrorData as McpError, model::*};
use schemars::JsonSchema;
use searxng_mcp_client::{SafeSearch, SearchRequest, SearchResponse, SearxngClient, TimeRange};
use serde::{Deserialize, Serialize};

/// Input parameters for searxng_web_search tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct WebSearchParams {
    /// The search query.
    #[serde(default)]
    pub query: String,

    /// Search page number (starts at 1).
    #[serde(default)]
    pub pageno: Option<u32>,

    /// Time range of search: "day", "month", or "year".
    #[serde(default)]
    pub time_range: Option<String>,

    /// Language code for search results (e.g., "en", "fr", "de"); "all" for no filter.
    #[serde(default)]
    pub language: Option<String>,

    /// Safe search filter level ("0": none, "1": moderate, "2": strict).
    #[serde(default)]
    pub safesearch: Option<String>,
}

impl WebSearchParams {
    /// Build a client request. Unknown `time_range`/`safesearch` values are dropped.
    fn to_request(&self) -> SearchRequest {
        let time_range = self.time_range.as_deref().filter(|s| !s.is_empty()).and_then(|s| {
            s.parse::<TimeRange>()
                .inspect_err(|e| tracing::warn!("ignoring {}", e))
                .ok()
        });

        let safesearch = self.safesearch.as_deref().filter(|s| !s.is_empty()).and_then(|s| {
            s.parse::<SafeSearch>()
                .inspect_err(|e| tracing::warn!("ignoring {}", e))
                .ok()
        });

        SearchRequest {
            query: self.query.clone(),
            pageno: self.pageno,
            time_range,
            language: self.language.clone(),
            safesearch,
        }
    }
}

/// Implementation of the searxng_web_search tool.
///
/// Failures become `is_error` tool results rather than protocol errors.
pub async fn search_impl(client: &SearxngClient, params: WebSearchParams) -> Result<CallToolResult, McpError> {
    if params.query.trim().is_empty() {
        return Ok(CallToolResult::error(vec![Content::text("query parameter is required")]));
    }

    let request = params.to_request();
    let start = Instant::now();

    match client.search(&request).await {
        Ok(response) => {
            let elapsed_ms = start.elapsed().as_millis();
            Ok(CallToolResult::success(vec![Content::text(format_results(
                &request.query,
                request.get_pageno(),
                elapsed_ms,
                &response,
            ))]))
        }
        Err(e) => {
            tracing::warn!("search for {:?} failed: {}", request.query, e);
            Ok(CallToolResult::error(vec![Content::text(format!("Search failed: {e}"))]))
        }
    }
}

/// Render a search response as Markdown.
pub fn format_results(query: &str, pageno: u32, elapsed_ms: u128, response: &SearchResponse) -> String {
    if response.is_empty() {
        return format!(
            "# No Results Found\n\nNo results found for query: \"{query}\"\n\nTry:\n- Different keywords\n- Broader search terms\n- Checking spelling"
        );
    }

    let mut output = format!("# Search Results for \"{query}\"\n\n");
    let _ = write!(output, "Found {} results (page {pageno}) in {elapsed_ms}ms\n\n", response.result_count());

    for (i, result) in response.results.iter().enumerate() {
        let _ = write!(
            output,
            "## {}. {}\n\n**URL:** {}\n\n{}\n\n---\n\n",
            i + 1,
            result.title,
            result.url,
            result.snippet()
        );
    }

    output
}
