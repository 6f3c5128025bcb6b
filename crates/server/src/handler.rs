//! MCP server handler implementation.
//!
//! This module defines the main server handler that routes tool calls and
//! resource reads to the appropriate implementations.
use std::sync::Arc;

use crate::resources;
use crate::tools::web_search::{WebSearchParams, search_impl};
use crate::tools::web_url_read::{WebUrlReadParams, read_impl};

use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::{
        tool::{ToolCallContext, ToolRouter},
        wrapper::Parameters,
    },
    model::{
        CallToolRequestParam, CallToolResult, Implementation, ListResourcesResult, ListToolsResult,
        PaginatedRequestParam, ProtocolVersion, ReadResourceRequestParam, ReadResourceResult, ServerCapabilities,
        ServerInfo,
    },
    service::{RequestContext, RoleServer},
    tool, tool_router,
};
use searxng_mcp_client::{SearxngClient, UrlReader};
use searxng_mcp_core::AppConfig;

/// The main MCP server handler for mcp-searxng.
#[derive(Clone)]
pub struct SearxngServer {
    tool_router: ToolRouter<Self>,
    config: Arc<AppConfig>,
    search: Arc<SearxngClient>,
    reader: UrlReader,
}

/// Tool router implementation using the #[tool_router] macro.
///
/// This macro generates the routing logic that maps tool names to handler methods.
#[tool_router]
impl SearxngServer {
    /// Create a new server handler.
    pub fn new(config: Arc<AppConfig>, search: SearxngClient, reader: UrlReader) -> Self {
        Self { tool_router: Self::tool_router(), config, search: Arc::new(search), reader }
    }

    /// Search the web through SearXNG.
    #[tool(
        description = "Performs a web search using the SearXNG API, ideal for general queries, news, articles, and online content."
    )]
    async fn searxng_web_search(&self, params: Parameters<WebSearchParams>) -> Result<CallToolResult, McpError> {
        search_impl(&self.search, params.0).await
    }

    /// Read a URL as Markdown.
    #[tool(description = "Read the content from a URL. Use this for further information retrieving.")]
    async fn web_url_read(&self, params: Parameters<WebUrlReadParams>) -> Result<CallToolResult, McpError> {
        read_impl(&self.reader, params.0).await
    }
}

impl ServerHandler for SearxngServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: "mcp-searxng".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().enable_resources().build(),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self, _request: Option<PaginatedRequestParam>, _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult { meta: None, tools: self.tool_router.list_all(), next_cursor: None })
    }

    async fn call_tool(
        &self, request: CallToolRequestParam, context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        self.tool_router
            .call(ToolCallContext::new(self, request, context))
            .await
    }

    async fn list_resources(
        &self, _request: Option<PaginatedRequestParam>, _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        Ok(ListResourcesResult { meta: None, resources: resources::list(), next_cursor: None })
    }

    async fn read_resource(
        &self, request: ReadResourceRequestParam, _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        let contents = match request.uri.as_str() {
            resources::CONFIG_URI => {
                let stats = self.reader.cache().stats().await;
                resources::config_contents(&self.config, &stats)
            }
            resources::HELP_URI => resources::help_contents(),
            other => {
                return Err(McpError::resource_not_found(format!("unknown resource: {other}"), None));
            }
        };

        Ok(ReadResourceResult { contents: vec![contents] })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use searxng_mcp_client::{FetchClient, FetchConfig, SearxngConfig};
    use searxng_mcp_core::TtlCache;
    use std::time::Duration;

    fn server() -> SearxngServer {
        let config = Arc::new(AppConfig { searxng_url: Some("http://searx.local".into()), ..Default::default() });
        let search = SearxngClient::new(SearxngConfig::from_app_config(&config).unwrap()).unwrap();
        let cache = Arc::new(TtlCache::new(Duration::from_secs(60), Duration::from_secs(30)));
        let fetcher = Arc::new(FetchClient::new(FetchConfig::default()).unwrap());
        SearxngServer::new(config, search, UrlReader::new(cache, fetcher))
    }

    #[tokio::test]
    async fn test_registers_both_tools() {
        let server = server();
        let mut names: Vec<String> = server
            .tool_router
            .list_all()
            .into_iter()
            .map(|t| t.name.to_string())
            .collect();
        names.sort();

        assert_eq!(names, vec!["searxng_web_search", "web_url_read"]);
    }

    #[tokio::test]
    async fn test_server_info_capabilities() {
        let info = server().get_info();
        assert_eq!(info.server_info.name, "mcp-searxng");
        assert!(info.capabilities.tools.is_some());
        assert!(info.capabilities.resources.is_some());
    }

    #[tokio::test]
    async fn test_url_read_schema_is_camel_case() {
        let tools = server().tool_router.list_all();
        let tool = tools.iter().find(|t| t.name == "web_url_read").unwrap();
        let properties = tool.input_schema.get("properties").unwrap();

        assert!(properties.get("startChar").is_some());
        assert!(properties.get("paragraphRange").is_some());
        assert!(properties.get("readHeadings").is_some());
    }
}
