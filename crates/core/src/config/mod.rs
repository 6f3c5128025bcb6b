//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (MCP_SEARXNG_*)
//! 2. Conventional variables (SEARXNG_URL, AUTH_USERNAME, AUTH_PASSWORD, HTTP_PROXY, HTTPS_PROXY)
//! 3. TOML config file (if MCP_SEARXNG_CONFIG_FILE set)
//! 4. Built-in defaults
//!
//! Variables from a `.env` file are added to the process environment before
//! loading, without overriding variables that are already set.

use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

/// Unprefixed environment variables honoured for compatibility with
/// existing SearXNG MCP deployments.
const CONVENTIONAL_VARS: &[&str] = &["SEARXNG_URL", "AUTH_USERNAME", "AUTH_PASSWORD", "HTTP_PROXY", "HTTPS_PROXY"];

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (MCP_SEARXNG_*)
/// 2. Conventional unprefixed variables
/// 3. TOML config file (if MCP_SEARXNG_CONFIG_FILE set)
/// 4. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Base URL of the SearXNG instance.
    ///
    /// Set via SEARXNG_URL or MCP_SEARXNG_SEARXNG_URL.
    #[serde(default)]
    pub searxng_url: Option<String>,

    /// Basic auth username for the SearXNG instance.
    #[serde(default)]
    pub auth_username: Option<String>,

    /// Basic auth password for the SearXNG instance.
    #[serde(default)]
    pub auth_password: Option<String>,

    /// Proxy for plain-http requests.
    #[serde(default)]
    pub http_proxy: Option<String>,

    /// Proxy for https requests.
    #[serde(default)]
    pub https_proxy: Option<String>,

    /// User-Agent string for HTTP requests.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Response body ceiling for URL reads; larger bodies are truncated.
    #[serde(default = "default_max_bytes")]
    pub max_bytes: usize,

    /// HTTP request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Lifetime of a cached page.
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,

    /// How often expired cache entries are reclaimed.
    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,
}

fn default_user_agent() -> String {
    format!("Mozilla/5.0 (compatible; MCP-SearXNG-Rust/{})", env!("CARGO_PKG_VERSION"))
}

fn default_max_bytes() -> usize {
    10 * 1024 * 1024 // 10MiB
}

fn default_timeout_ms() -> u64 {
    30_000
}

fn default_cache_ttl_secs() -> u64 {
    60
}

fn default_sweep_interval_secs() -> u64 {
    30
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            searxng_url: None,
            auth_username: None,
            auth_password: None,
            http_proxy: None,
            https_proxy: None,
            user_agent: default_user_agent(),
            max_bytes: default_max_bytes(),
            timeout_ms: default_timeout_ms(),
            cache_ttl_secs: default_cache_ttl_secs(),
            sweep_interval_secs: default_sweep_interval_secs(),
        }
    }
}

impl AppConfig {
    /// Timeout as Duration for use with reqwest/tokio.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    ///
    /// A `.env` file in the working directory (or a parent) is read first;
    /// variables already set in the process environment win over it.
    pub fn load() -> Result<Self, ConfigError> {
        if let Ok(path) = dotenv::dotenv() {
            tracing::debug!("loaded environment from {}", path.display());
        }

        let config: Self = Self::figment()
            .extract()
            .map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }

    /// The layered figment, exposed so callers can add providers of their own.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("MCP_SEARXNG_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment
            .merge(
                Env::raw()
                    .only(CONVENTIONAL_VARS)
                    .map(|key| key.as_str().to_lowercase().into()),
            )
            .merge(
                Env::prefixed("MCP_SEARXNG_")
                    .ignore(&["CONFIG_FILE"])
                    .map(|key| key.as_str().to_lowercase().into()),
            )
    }

    /// The SearXNG base URL, required before any search can run.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` if no URL was configured.
    pub fn require_searxng_url(&self) -> Result<&str, ConfigError> {
        self.searxng_url
            .as_deref()
            .filter(|u| !u.trim().is_empty())
            .ok_or_else(|| ConfigError::Missing {
                field: "searxng_url".into(),
                hint: "Set the SEARXNG_URL environment variable".into(),
            })
    }

    /// Basic auth credentials, only when both halves are present.
    pub fn basic_auth(&self) -> Option<(&str, &str)> {
        match (self.auth_username.as_deref(), self.auth_password.as_deref()) {
            (Some(user), Some(pass)) if !user.is_empty() && !pass.is_empty() => Some((user, pass)),
            _ => None,
        }
    }
}
