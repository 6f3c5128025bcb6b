//! Unified error types for mcp-searxng.
//!
//! Every variant renders as a short, human-readable message so tool handlers
//! can hand it straight back to the calling agent.

use rmcp::model::{ErrorCode, ErrorData as McpError};

/// Unified error types for the mcp-searxng server.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid input parameters (e.g., missing url or query).
    #[error("{0}")]
    InvalidInput(String),

    /// Unparseable URL or unsupported scheme.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// Network failure or non-success HTTP status.
    #[error("{0}")]
    HttpError(String),

    /// Request exceeded the configured timeout.
    #[error("request timed out: {0}")]
    FetchTimeout(String),

    /// SearXNG answered with something we could not understand.
    #[error("{0}")]
    SearchFailed(String),

    /// Unexpected failure while converting or selecting content.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<Error> for McpError {
    fn from(err: Error) -> Self {
        let code = match &err {
            Error::InvalidInput(_) => -32602,
            Error::InvalidUrl(_) => -32003,
            Error::HttpError(_) => -32008,
            Error::FetchTimeout(_) => -32006,
            Error::SearchFailed(_) => -32009,
            Error::Internal(_) => -32603,
        };

        McpError { code: ErrorCode(code), message: err.to_string().into(), data: None }
    }
}
