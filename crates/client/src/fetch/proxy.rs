//! Per-scheme proxy routing for outbound HTTP clients.

use reqwest::{ClientBuilder, Proxy};
use searxng_mcp_core::AppConfig;

/// Proxies for plain-http and https requests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProxyConfig {
    pub http: Option<String>,
    pub https: Option<String>,
}

impl ProxyConfig {
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self { http: non_empty(&config.http_proxy), https: non_empty(&config.https_proxy) }
    }

    pub fn is_empty(&self) -> bool {
        self.http.is_none() && self.https.is_none()
    }

    /// Route requests of each scheme through its configured proxy.
    pub fn apply(&self, mut builder: ClientBuilder) -> Result<ClientBuilder, reqwest::Error> {
        if let Some(http) = &self.http {
            builder = builder.proxy(Proxy::http(http)?);
        }
        if let Some(https) = &self.https {
            builder = builder.proxy(Proxy::https(https)?);
        }
        Ok(builder)
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty()).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_app_config() {
        let config = AppConfig {
            http_proxy: Some("http://proxy.local:3128".into()),
            https_proxy: Some("  ".into()),
            ..Default::default()
        };
        let proxy = ProxyConfig::from_app_config(&config);
        assert_eq!(proxy.http.as_deref(), Some("http://proxy.local:3128"));
        assert!(proxy.https.is_none());
        assert!(!proxy.is_empty());
    }

    #[test]
    fn test_empty_by_default() {
        assert!(ProxyConfig::from_app_config(&AppConfig::default()).is_empty());
    }

    #[test]
    fn test_apply_builds_client() {
        let proxy = ProxyConfig { http: Some("http://proxy.local:3128".into()), https: None };
        let builder = proxy.apply(reqwest::Client::builder()).unwrap();
        assert!(builder.build().is_ok());
    }
}
