//! Configuration validation rules.
//!
//! This module provides validation logic for `AppConfig` values
//! after they have been loaded from environment, files, or defaults.

use crate::config::AppConfig;
use thiserror::Error;

/// Upper bound for `cache_ttl_secs` and `sweep_interval_secs`.
const MAX_CACHE_INTERVAL_SECS: u64 = 86_400;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },

    #[error("missing required configuration: {field} ({hint})")]
    Missing { field: String, hint: String },
}

impl AppConfig {
    /// Validate configuration values after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` if `searxng_url` is unset, and
    /// `ConfigError::Invalid` if:
    /// - `searxng_url` or a proxy is not an http(s) URL
    /// - `max_bytes` is 0 or exceeds 50MiB
    /// - `timeout_ms` is less than 100ms or exceeds 5 minutes
    /// - `cache_ttl_secs` or `sweep_interval_secs` is 0 or exceeds one day
    /// - `user_agent` is empty
    pub fn validate(&self) -> Result<(), ConfigError> {
        let searxng_url = self.require_searxng_url()?;
        check_http_url("searxng_url", searxng_url)?;

        for (field, proxy) in [("http_proxy", &self.http_proxy), ("https_proxy", &self.https_proxy)] {
            if let Some(proxy) = proxy.as_deref().filter(|p| !p.is_empty()) {
                check_http_url(field, proxy)?;
            }
        }

        if self.max_bytes == 0 {
            return Err(ConfigError::Invalid { field: "max_bytes".into(), reason: "must be greater than 0".into() });
        }
        if self.max_bytes > 50 * 1024 * 1024 {
            return Err(ConfigError::Invalid { field: "max_bytes".into(), reason: "must not exceed 50MiB".into() });
        }

        if self.timeout_ms < 100 {
            return Err(ConfigError::Invalid { field: "timeout_ms".into(), reason: "must be at least 100ms".into() });
        }
        if self.timeout_ms > 300_000 {
            return Err(ConfigError::Invalid {
                field: "timeout_ms".into(),
                reason: "must not exceed 5 minutes (300000ms)".into(),
            });
        }

        if self.cache_ttl_secs == 0 {
            return Err(ConfigError::Invalid { field: "cache_ttl_secs".into(), reason: "must be at least 1s".into() });
        }
        if self.sweep_interval_secs == 0 {
            return Err(ConfigError::Invalid {
                field: "sweep_interval_secs".into(),
                reason: "must be at least 1s".into(),
            });
        }

        for (field, secs) in [("cache_ttl_secs", self.cache_ttl_secs), ("sweep_interval_secs", self.sweep_interval_secs)] {
            if secs > MAX_CACHE_INTERVAL_SECS {
                return Err(ConfigError::Invalid {
                    field: field.into(),
                    reason: format!("must not exceed 1 day ({MAX_CACHE_INTERVAL_SECS}s)"),
                });
            }
        }

        if self.user_agent.is_empty() {
            return Err(ConfigError::Invalid { field: "user_agent".into(), reason: "must not be empty".into() });
        }

        if self.auth_username.is_some() != self.auth_password.is_some() {
            tracing::warn!(
                username_set = self.auth_username.is_some(),
                password_set = self.auth_password.is_some(),
                "Only one of auth_username and auth_password is set; \
                 basic auth will not be sent"
            );
        }

        Ok(())
    }
}

fn check_http_url(field: &str, value: &str) -> Result<(), ConfigError> {
    let parsed = url::Url::parse(value)
        .map_err(|e| ConfigError::Invalid { field: field.into(), reason: format!("not a valid URL: {e}") })?;

    match parsed.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(ConfigError::Invalid { field: field.into(), reason: format!("unsupported scheme: {scheme}") }),
    }
}
