//! MCP tool implementations.
//!
//! This module contains all tools exposed by the mcp-searxng server.

pub mod web_search;
pub mod web_url_read;

pub use web_search::WebSearchParams;
pub use web_url_read::WebUrlReadParams;
