//! Error types and JSON-RPC error codes.

use super::message::{JsonRpcError, RequestId, Response};

/// Standard JSON-RPC 2.0 error codes.
pub mod error_codes {
    /// Unknown method or unknown tool.
    pub const METHOD_NOT_FOUND: i32 = -32601;
    /// Parameters have the wrong shape.
    pub const INVALID_PARAMS: i32 = -32602;
    /// Unexpected failure inside the engine.
    pub const INTERNAL_ERROR: i32 = -32603;
}

/// Tool-level error codes from the implementation-defined range.
pub mod tool_error_codes {
    /// A tool handler signalled a failure.
    pub const TOOL_EXECUTION_ERROR: i32 = -32000;
}

/// Engine-level error that maps onto a JSON-RPC error response.
#[derive(Debug, thiserror::Error)]
pub enum McpError {
    /// No handler exists for the method.
    #[error("Method not found: {0}")]
    MethodNotFound(String),

    /// No tool is registered under the name.
    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    /// Parameters have the wrong shape.
    #[error("Invalid params: {0}")]
    InvalidParams(String),

    /// A tool handler failed.
    #[error("Tool execution error: {0}")]
    ToolExecution(String),

    /// Unexpected engine failure.
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl McpError {
    /// JSON-RPC error code for this error.
    pub fn code(&self) -> i32 {
        match self {
            McpError::MethodNotFound(_) | McpError::ToolNotFound(_) => {
                error_codes::METHOD_NOT_FOUND
            }
            McpError::InvalidParams(_) => error_codes::INVALID_PARAMS,
            McpError::ToolExecution(_) => tool_error_codes::TOOL_EXECUTION_ERROR,
            McpError::InternalError(_) => error_codes::INTERNAL_ERROR,
        }
    }

    /// Convert into a JSON-RPC error message answering `id`.
    pub fn to_json_rpc_error(&self, id: RequestId) -> JsonRpcError {
        JsonRpcError::new(id, self.code(), self.to_string())
    }

    /// Convert into an outbound error response answering `id`.
    pub fn into_response(self, id: RequestId) -> Response {
        Response::Error(self.to_json_rpc_error(id))
    }
}

/// Convenience result alias.
pub type McpResult<T> = Result<T, McpError>;
