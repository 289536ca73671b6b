//! Error types for the MCP server

use thiserror::Error;

/// Result type for MCP operations
pub type Result<T> = std::result::Result<T, McpError>;

/// Errors that can occur in the MCP server
#[derive(Error, Debug)]
pub enum McpError {
    /// Project analysis failed
    #[error("Analysis failed: {0}")]
    Analysis(String),

    /// Invalid parameters provided
    #[error("Invalid parameters: {0}")]
    InvalidParams(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<compo_core::AnalyzeError> for McpError {
    fn from(e: compo_core::AnalyzeError) -> Self {
        McpError::Analysis(e.to_string())
    }
}
