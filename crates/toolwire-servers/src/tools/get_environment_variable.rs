//! `get_environment_variable` tool: Read one environment variable.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Map, Value};

use toolwire::tools::parse_arguments;
use toolwire::types::ToolDescriptor;
use toolwire::{ToolError, ToolHandler};

#[derive(Debug, Deserialize)]
struct EnvParams {
    name: String,
}

/// Return the tool definition for get_environment_variable.
pub fn definition() -> ToolDescriptor {
    ToolDescriptor::new(
        "get_environment_variable",
        "Gets the value of an environment variable",
    )
    .with_schema(json!({
        "type": "object",
        "properties": {
            "name": { "type": "string", "description": "Variable name" }
        },
        "required": ["name"]
    }))
}

/// Handler for get_environment_variable.
pub struct GetEnvironmentVariable;

#[async_trait]
impl ToolHandler for GetEnvironmentVariable {
    async fn invoke(&self, arguments: Map<String, Value>) -> Result<Value, ToolError> {
        let params: EnvParams = parse_arguments(arguments)?;
        if params.name.is_empty() || params.name.contains('=') || params.name.contains('\0') {
            return Err(ToolError::invalid(format!(
                "Invalid environment variable name: {:?}",
                params.name
            )));
        }

        let value = std::env::var_os(&params.name).map(|v| v.to_string_lossy().into_owned());
        Ok(json!({
            "exists": value.is_some(),
            "value": value,
        }))
    }
}
