//! mcp-searxng server entry point.
//!
//! This is the main binary that boots the MCP server on stdio transport.
//! Logging goes to stderr to avoid interfering with the JSON-RPC protocol on stdout.

use std::sync::Arc;

use anyhow::Result;
use rmcp::service::serve_server;
use rmcp::transport::io::stdio;
use searxng_mcp_client::{FetchClient, FetchConfig, SearxngClient, SearxngConfig, UrlReader};
use searxng_mcp_core::{AppConfig, TtlCache};
use tracing_subscriber::EnvFilter;

mod handler;
mod resources;
mod tools;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    let config = Arc::new(AppConfig::load()?);

    tracing::info!(
        searxng_url = config.searxng_url.as_deref().unwrap_or_default(),
        "Starting mcp-searxng server on stdio transport"
    );

    let search = SearxngClient::new(SearxngConfig::from_app_config(&config)?)?;
    let fetcher = Arc::new(FetchClient::new(FetchConfig::from_app_config(&config))?);
    let cache = Arc::new(TtlCache::new(config.cache_ttl(), config.sweep_interval()));
    let reader = UrlReader::new(Arc::clone(&cache), fetcher);

    let handler = handler::SearxngServer::new(Arc::clone(&config), search, reader);
    let transport = stdio();
    let server = serve_server(handler, transport).await?;

    let quit_reason = server.waiting().await;

    cache.destroy().await;
    tracing::info!("mcp-searxng server stopped");

    quit_reason?;
    Ok(())
}
