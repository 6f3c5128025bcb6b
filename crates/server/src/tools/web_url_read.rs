//! web_url_read tool implementation.
//!
//! Fetches a URL through the shared [`UrlReader`] and returns its Markdown,
//! optionally sliced by headings, section, paragraphs, or characters.

use rmcp::{ErrorData as McpError, model::*};
use schemars::JsonSchema;
use searxng_mcp_client::{SelectionRequest, UrlReader};
use searxng_mcp_core::Error;
use serde::{Deserialize, Serialize};

/// Input parameters for web_url_read tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct WebUrlReadParams {
    /// URL to read.
    #[serde(default)]
    pub url: String,

    /// Starting character position for content extraction (default: 0).
    #[serde(default)]
    pub start_char: Option<i64>,

    /// Maximum number of characters to return (default: 0, no limit).
    #[serde(default)]
    pub max_length: Option<i64>,

    /// Extract content under a specific heading.
    #[serde(default)]
    pub section: Option<String>,

    /// Return specific paragraph ranges (e.g., "1-5", "3", "10-").
    #[serde(default)]
    pub paragraph_range: Option<String>,

    /// Return only a list of headings instead of full content.
    #[serde(default)]
    pub read_headings: Option<bool>,
}

fn non_negative(value: Option<i64>) -> usize {
    value.map_or(0, |v| usize::try_from(v.max(0)).unwrap_or(usize::MAX))
}

fn non_empty(value: Option<&String>) -> Option<String> {
    value.filter(|s| !s.is_empty()).cloned()
}

impl WebUrlReadParams {
    pub fn selection(&self) -> SelectionRequest {
        SelectionRequest {
            start_char: non_negative(self.start_char),
            max_length: non_negative(self.max_length),
            section: non_empty(self.section.as_ref()),
            paragraph_range: non_empty(self.paragraph_range.as_ref()),
            read_headings: self.read_headings.unwrap_or(false),
        }
    }
}

/// Implementation of the web_url_read tool.
pub async fn read_impl(reader: &UrlReader, params: WebUrlReadParams) -> Result<CallToolResult, McpError> {
    if params.url.trim().is_empty() {
        return Ok(CallToolResult::error(vec![Content::text("url parameter is required")]));
    }

    match reader.read(&params.url, &params.selection()).await {
        Ok(text) => Ok(CallToolResult::success(vec![Content::text(text)])),
        Err(e) => {
            if matches!(e, Error::Internal(_)) {
                tracing::error!("reading {} failed: {}", params.url, e);
            } else {
                tracing::warn!("reading {} failed: {}", params.url, e);
            }
            Ok(CallToolResult::error(vec![Content::text(format!("Failed to read URL: {e}"))]))
        }
    }
}
