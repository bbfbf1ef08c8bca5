//! `fail` tool: Always fails; exercises the error path end to end.

use async_trait::async_trait;
use serde_json::{Map, Value};

use toolwire::types::ToolDescriptor;
use toolwire::{ToolError, ToolHandler};

/// Message carried by every failure.
pub const FAILURE_MESSAGE: &str = "This tool failed intentionally!";

/// Return the tool definition for fail.
pub fn definition() -> ToolDescriptor {
    ToolDescriptor::new("fail", "A tool designed to fail")
}

/// Handler for fail.
pub struct Fail;

#[async_trait]
impl ToolHandler for Fail {
    async fn invoke(&self, _arguments: Map<String, Value>) -> Result<Value, ToolError> {
        Err(ToolError::failed(FAILURE_MESSAGE))
    }
}
