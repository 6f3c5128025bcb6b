//! HTTP fetch for the URL reader.
//!
//! ### URL Validation
//! - Trim whitespace, require an `http` or `https` scheme
//!
//! ### Limits
//! - Request timeout: 30s (configurable)
//! - Max redirects: 10
//! - Max body bytes: 10MiB (configurable); longer bodies are silently truncated
//!
//! ### Transport
//! - Optional per-scheme proxies from configuration
//!
//! The [`Fetcher`] trait is the seam between the reader pipeline and the network.

pub mod proxy;
pub mod url;

use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use reqwest::Url;
use reqwest::{Client, StatusCode, header};
use std::time::{Duration, Instant};

pub use proxy::ProxyConfig;
pub use url::{UrlError, parse_http_url};

use searxng_mcp_core::{AppConfig, Error};

/// Configuration for the fetch client.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// User agent string
    pub user_agent: String,

    /// Body ceiling in bytes (default: 10MiB)
    pub max_bytes: usize,

    /// Request timeout (default: 30s)
    pub timeout: Duration,

    /// Maximum number of redirects to follow (default: 10)
    pub max_redirects: usize,

    /// Outbound proxies
    pub proxy: ProxyConfig,
}

impl Default for FetchConfig {
    fn default() -> Self {
        let app = AppConfig::default();
        Self {
            user_agent: app.user_agent,
            max_bytes: app.max_bytes,
            timeout: Duration::from_millis(app.timeout_ms),
            max_redirects: 10,
            proxy: ProxyConfig::default(),
        }
    }
}

impl FetchConfig {
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            user_agent: config.user_agent.clone(),
            max_bytes: config.max_bytes,
            timeout: config.timeout(),
            proxy: ProxyConfig::from_app_config(config),
            ..Default::default()
        }
    }
}

/// Response from a fetch operation.
#[derive(Debug, Clone)]
pub struct FetchResponse {
    /// The URL requested
    pub url: Url,
    /// The final URL after redirects
    pub final_url: Url,
    /// HTTP status code
    pub status: StatusCode,
    /// Content-Type header
    pub content_type: Option<String>,
    /// Response body, at most `max_bytes` long
    pub bytes: Bytes,
    /// Whether the body was cut at the size ceiling
    pub truncated: bool,
    /// Time taken to fetch in milliseconds
    pub fetch_ms: u64,
}

impl FetchResponse {
    /// Body decoded as UTF-8, replacing invalid sequences.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.bytes).into_owned()
    }
}

/// Retrieves the raw body behind a URL.
///
/// Implementations report network failures and non-success statuses as
/// errors, and must never return more than their configured byte ceiling.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &Url) -> Result<FetchResponse, Error>;
}

/// reqwest-backed [`Fetcher`].
pub struct FetchClient {
    http: Client,
    config: FetchConfig,
}

impl FetchClient {
    /// Create a new fetch client with the given configuration.
    pub fn new(config: FetchConfig) -> Result<Self, Error> {
        let builder = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .use_rustls_tls()
            .gzip(true)
            .brotli(true)
            .deflate(true);

        let http = config
            .proxy
            .apply(builder)
            .and_then(|b| b.build())
            .map_err(|e| Error::HttpError(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { http, config })
    }

    /// Get reference to the configuration.
    pub fn config(&self) -> &FetchConfig {
        &self.config
    }
}

fn transport_error(err: reqwest::Error) -> Error {
    if err.is_timeout() {
        Error::FetchTimeout(err.to_string())
    } else {
        Error::HttpError(format!("failed to fetch URL: {}", err))
    }
}

#[async_trait]
impl Fetcher for FetchClient {
    async fn fetch(&self, url: &Url) -> Result<FetchResponse, Error> {
        let start = Instant::now();

        let mut response = self
            .http
            .get(url.clone())
            .header(header::ACCEPT, "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8")
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::HttpError(format!(
                "HTTP {}: {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("unknown status")
            )));
        }

        let final_url = response.url().clone();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());

        let max_bytes = self.config.max_bytes;
        let capacity = response
            .content_length()
            .map_or(0, |len| (len as usize).min(max_bytes));
        let mut body = BytesMut::with_capacity(capacity);
        let mut truncated = false;

        while let Some(chunk) = response.chunk().await.map_err(transport_error)? {
            let remaining = max_bytes - body.len();
            if chunk.len() > remaining {
                body.extend_from_slice(&chunk[..remaining]);
                truncated = true;
                break;
            }
            body.extend_from_slice(&chunk);
        }

        let fetch_ms = start.elapsed().as_millis() as u64;

        if truncated {
            tracing::debug!("truncated body of {} at {} bytes", url, max_bytes);
        }

        tracing::debug!("fetched {} -> {} in {}ms ({} bytes)", url, final_url, fetch_ms, body.len());

        Ok(FetchResponse {
            url: url.clone(),
            final_url,
            status,
            content_type,
            bytes: body.freeze(),
            truncated,
            fetch_ms,
        })
    }
}
