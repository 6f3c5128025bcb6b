//! Fetch, convert, cache, and slice a web page.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use searxng_mcp_core::{Error, TtlCache};

use crate::extract::{SelectionRequest, convert, select};
use crate::fetch::{Fetcher, UrlError, parse_http_url};

/// Reads URLs as Markdown, caching the converted text by URL.
///
/// The cache holds the full converted page; selection is applied on every
/// call, so differently sliced reads of one URL share a single fetch.
#[derive(Clone)]
pub struct UrlReader {
    cache: Arc<TtlCache>,
    fetcher: Arc<dyn Fetcher>,
}

impl UrlReader {
    pub fn new(cache: Arc<TtlCache>, fetcher: Arc<dyn Fetcher>) -> Self {
        Self { cache, fetcher }
    }

    pub fn cache(&self) -> &TtlCache {
        &self.cache
    }

    /// Read `url` and apply `selection` to its Markdown.
    ///
    /// Invalid URLs are rejected before the cache or network is touched.
    /// Failed fetches are never cached. Dropping the returned future before
    /// it completes leaves the cache untouched.
    pub async fn read(&self, url: &str, selection: &SelectionRequest) -> Result<String, Error> {
        let parsed = parse_http_url(url).map_err(|e| match e {
            UrlError::InvalidUrl(_) => Error::InvalidUrl(e.to_string()),
            _ => Error::InvalidInput(e.to_string()),
        })?;
        let key = url.trim();

        if let Some(markdown) = self.cache.get(key).await {
            tracing::debug!("cache hit for {}", key);
            return guarded("select", || select(&markdown, selection));
        }

        let response = self.fetcher.fetch(&parsed).await?;
        let html = response.text();
        let markdown = guarded("convert", || convert(&html))?;

        self.cache.set(key, markdown.clone()).await;
        tracing::debug!("cached {} ({} chars)", key, markdown.len());

        guarded("select", || select(&markdown, selection))
    }
}

/// Run a pure transform, turning a panic into [`Error::Internal`].
fn guarded<F>(stage: &str, f: F) -> Result<String, Error>
where
    F: FnOnce() -> String,
{
    catch_unwind(AssertUnwindSafe(f)).map_err(|_| {
        tracing::error!("{} stage panicked", stage);
        Error::Internal(format!("{stage} failed"))
    })
}
