//! MCP resources: the live server configuration and a usage guide.

use rmcp::model::{AnnotateAble, RawResource, Resource, ResourceContents};
use searxng_mcp_core::{AppConfig, CacheStats};
use serde::Serialize;

pub const CONFIG_URI: &str = "config://mcp-searxng";
pub const HELP_URI: &str = "help://mcp-searxng";

#[derive(Debug, Serialize)]
struct ConfigView<'a> {
    version: &'static str,
    searxng_url: &'a str,
    proxy: ProxyView<'a>,
    cache: CacheView,
}

#[derive(Debug, Serialize)]
struct ProxyView<'a> {
    http: &'a str,
    https: &'a str,
}

#[derive(Debug, Serialize)]
struct CacheView {
    enabled: bool,
    ttl: u64,
    size: usize,
}

/// Resources advertised by the server.
pub fn list() -> Vec<Resource> {
    vec![
        resource(CONFIG_URI, "Server Configuration", "Current server configuration", "application/json"),
        resource(HELP_URI, "Usage Guide", "MCP SearXNG usage guide", "text/markdown"),
    ]
}

fn resource(uri: &str, name: &str, description: &str, mime_type: &str) -> Resource {
    let mut raw = RawResource::new(uri, name);
    raw.description = Some(description.to_string());
    raw.mime_type = Some(mime_type.to_string());
    raw.no_annotation()
}

/// Pretty JSON view of the configuration. Credentials are never included.
pub fn config_json(config: &AppConfig, stats: &CacheStats) -> String {
    let view = ConfigView {
        version: env!("CARGO_PKG_VERSION"),
        searxng_url: config.searxng_url.as_deref().unwrap_or_default(),
        proxy: ProxyView {
            http: config.http_proxy.as_deref().unwrap_or_default(),
            https: config.https_proxy.as_deref().unwrap_or_default(),
        },
        cache: CacheView { enabled: true, ttl: stats.ttl_seconds, size: stats.size },
    };

    serde_json::to_string_pretty(&view).unwrap_or_default()
}

pub fn config_contents(config: &AppConfig, stats: &CacheStats) -> ResourceContents {
    ResourceContents::text(config_json(config, stats), CONFIG_URI)
}

pub fn help_contents() -> ResourceContents {
    ResourceContents::text(HELP_TEXT, HELP_URI)
}

const HELP_TEXT: &str = r#"# MCP SearXNG Server - Usage Guide

## Overview

This MCP server provides web search through a SearXNG instance and reads web pages as Markdown.

## Available Tools

### 1. searxng_web_search

Performs web searches using the SearXNG metasearch engine.

**Parameters:**
- `query` (required): Search query string
- `pageno` (optional): Page number (default: 1)
- `time_range` (optional): Filter by time ("day", "month", "year")
- `language` (optional): Language code (e.g., "en", "fr", "de"; default: "all")
- `safesearch` (optional): Safe search level ("0", "1", "2"; default: "0")

**Example:**
```
query: "rust async runtime comparison"
pageno: 1
language: "en"
```

### 2. web_url_read

Reads a web page and converts it to Markdown.

**Parameters:**
- `url` (required): http or https URL to read
- `startChar` (optional): Starting character position (default: 0)
- `maxLength` (optional): Maximum characters to return (default: no limit)
- `section` (optional): Return the section under the first heading containing this text
- `paragraphRange` (optional): Paragraph range (e.g., "1-5", "3", "10-")
- `readHeadings` (optional): Return only headings (boolean)

Options apply in order: `readHeadings` (which ignores all others), `section`,
`paragraphRange`, then `startChar`/`maxLength`.

**Example:**
```
url: "https://example.com/article"
maxLength: 5000
```

## Configuration

- `SEARXNG_URL`: SearXNG instance URL (required)
- `AUTH_USERNAME`: Basic auth username (optional)
- `AUTH_PASSWORD`: Basic auth password (optional)
- `HTTP_PROXY`: Proxy for http requests (optional)
- `HTTPS_PROXY`: Proxy for https requests (optional)
- `MCP_SEARXNG_CONFIG_FILE`: TOML configuration file (optional)

Every setting can also be given as `MCP_SEARXNG_<FIELD>`, e.g.
`MCP_SEARXNG_CACHE_TTL_SECS=120`, which takes precedence. A `.env` file in
the working directory is also read.

## Features

- **Caching**: Page content is cached (60 seconds by default) to reduce load
- **Proxy Support**: Separate proxies for http and https traffic
- **Privacy**: All searches go through your own SearXNG instance
- **Markdown Conversion**: HTML content is converted to Markdown
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_resources() {
        let resources = list();
        let uris: Vec<&str> = resources.iter().map(|r| r.uri.as_str()).collect();
        assert_eq!(uris, vec![CONFIG_URI, HELP_URI]);
        assert_eq!(resources[0].mime_type.as_deref(), Some("application/json"));
    }

    #[test]
    fn test_config_json() {
        let config = AppConfig {
            searxng_url: Some("http://searx.local".into()),
            https_proxy: Some("http://proxy:3128".into()),
            auth_password: Some("secret".into()),
            ..Default::default()
        };
        let stats = CacheStats { size: 3, ttl_seconds: 60 };

        let json = config_json(&config, &stats);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["searxng_url"], "http://searx.local");
        assert_eq!(value["proxy"]["http"], "");
        assert_eq!(value["proxy"]["https"], "http://proxy:3128");
        assert_eq!(value["cache"]["enabled"], true);
        assert_eq!(value["cache"]["ttl"], 60);
        assert_eq!(value["cache"]["size"], 3);
        assert_eq!(value["version"], env!("CARGO_PKG_VERSION"));
        assert!(!json.contains("secret"));
    }

    #[test]
    fn test_help_mentions_both_tools() {
        assert!(HELP_TEXT.contains("### 1. searxng_web_search"));
        assert!(HELP_TEXT.contains("### 2. web_url_read"));
        assert!(HELP_TEXT.contains("SEARXNG_URL"));
    }
}
