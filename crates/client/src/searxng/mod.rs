//! SearXNG metasearch client.
//!
//! ### Specification
//!
//! - **Endpoint**: `<base_url>/search?q=..&format=json&pageno=N`
//! - **Authentication**: optional HTTP basic auth.
//! - **Headers**: `X-Forwarded-For` / `X-Real-IP` set to loopback so the
//!   instance's bot detection treats the server as a local client.
//! - **Transport**: timeout, user agent, and proxies from configuration.

pub mod error;
pub mod request;
pub mod response;

pub use error::SearxngError;
pub use request::{SafeSearch, SearchRequest, TimeRange};
pub use response::{SearchResponse, SearchResult};

use reqwest::header;
use searxng_mcp_core::AppConfig;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::fetch::ProxyConfig;

/// SearXNG client configuration.
#[derive(Debug, Clone)]
pub struct SearxngConfig {
    /// Instance base URL, e.g. `http://localhost:8080`.
    pub base_url: String,
    /// Basic auth `(username, password)`.
    pub auth: Option<(String, String)>,
    /// Request timeout (default: 30s).
    pub timeout: Duration,
    /// User-agent string.
    pub user_agent: String,
    /// Outbound proxies.
    pub proxy: ProxyConfig,
}

impl Default for SearxngConfig {
    fn default() -> Self {
        let app = AppConfig::default();
        Self {
            base_url: String::new(),
            auth: None,
            timeout: app.timeout(),
            user_agent: app.user_agent,
            proxy: ProxyConfig::default(),
        }
    }
}

impl SearxngConfig {
    /// Build from application configuration. Fails when no instance URL is set.
    pub fn from_app_config(config: &AppConfig) -> Result<Self, SearxngError> {
        let base_url = config
            .require_searxng_url()
            .map_err(|_| SearxngError::MissingBaseUrl)?;

        Ok(Self {
            base_url: base_url.to_string(),
            auth: config
                .basic_auth()
                .map(|(user, pass)| (user.to_string(), pass.to_string())),
            timeout: config.timeout(),
            user_agent: config.user_agent.clone(),
            proxy: ProxyConfig::from_app_config(config),
        })
    }
}

/// SearXNG search client.
#[derive(Debug, Clone)]
pub struct SearxngClient {
    http: reqwest::Client,
    config: SearxngConfig,
}

impl SearxngClient {
    /// Create a new SearXNG client with the given configuration.
    pub fn new(config: SearxngConfig) -> Result<Self, SearxngError> {
        if config.base_url.trim().is_empty() {
            return Err(SearxngError::MissingBaseUrl);
        }

        let builder = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent);

        let http = config
            .proxy
            .apply(builder)
            .and_then(|b| b.build())
            .map_err(|e| SearxngError::Network(Arc::new(e)))?;

        Ok(Self { http, config })
    }

    /// Get reference to the configuration.
    pub fn config(&self) -> &SearxngConfig {
        &self.config
    }

    fn endpoint(&self) -> String {
        format!("{}/search", self.config.base_url.trim_end_matches('/'))
    }

    /// Execute a web search query.
    pub async fn search(&self, req: &SearchRequest) -> Result<SearchResponse, SearxngError> {
        req.validate()?;

        let start = Instant::now();
        tracing::debug!("searching SearXNG: query={} pageno={}", req.query, req.get_pageno());

        let mut request = self
            .http
            .get(self.endpoint())
            .header(header::ACCEPT, "application/json")
            .header("X-Forwarded-For", "127.0.0.1")
            .header("X-Real-IP", "127.0.0.1")
            .query(&req.query_pairs());

        if let Some((user, pass)) = &self.config.auth {
            request = request.basic_auth(user, Some(pass));
        }

        let http_response = request.send().await?;

        let status = http_response.status();
        tracing::debug!("SearXNG response status: {}", status);

        if !status.is_success() {
            let body = http_response.text().await.unwrap_or_default();
            return Err(SearxngError::HttpError { status: status.as_u16(), body });
        }

        let bytes = http_response.bytes().await?;
        let response: SearchResponse =
            serde_json::from_slice(&bytes).map_err(|e| SearxngError::Parse(e.to_string()))?;

        tracing::debug!("search completed in {:?}, {} results", start.elapsed(), response.result_count());

        Ok(response)
    }
}
