//! `echo` tool: Echo the input text back.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Map, Value};

use toolwire::tools::parse_arguments;
use toolwire::types::ToolDescriptor;
use toolwire::{ToolError, ToolHandler};

#[derive(Debug, Deserialize)]
struct EchoParams {
    text: Option<String>,
}

/// Return the tool definition for echo.
pub fn definition() -> ToolDescriptor {
    ToolDescriptor::new("echo", "Echoes back the input").with_schema(json!({
        "type": "object",
        "properties": {
            "text": { "type": "string", "description": "Text to echo back" }
        }
    }))
}

/// Handler for echo.
pub struct Echo;

#[async_trait]
impl ToolHandler for Echo {
    async fn invoke(&self, arguments: Map<String, Value>) -> Result<Value, ToolError> {
        let params: EchoParams = parse_arguments(arguments)?;
        let text = params
            .text
            .unwrap_or_else(|| "No text provided".to_string());
        Ok(json!({ "message": format!("Echo: {text}") }))
    }
}
