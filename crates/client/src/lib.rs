//! Client code for mcp-searxng.
//!
//! This crate provides the SearXNG search client, the URL fetch pipeline,
//! and HTML to Markdown conversion with content selection.

pub mod extract;
pub mod fetch;
pub mod reader;
pub mod searxng;

pub use extract::{SelectionRequest, convert, select};
pub use fetch::{FetchClient, FetchConfig, FetchResponse, Fetcher, ProxyConfig, UrlError, parse_http_url};
pub use reader::UrlReader;
pub use searxng::{
    SafeSearch, SearchRequest, SearchResponse, SearchResult, SearxngClient, SearxngConfig, SearxngError, TimeRange,
};
