//! Parameter types for recognized methods.

use serde_json::{Map, Value};

use super::error::{McpError, McpResult};

/// Parameters of `tool/execute`.
///
/// Accepts `tool_name`, falling back to the legacy `name` field. A missing or
/// null `arguments` value becomes an empty object.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolExecuteParams {
    /// Requested tool, if any name was given.
    pub tool_name: Option<String>,
    /// Arguments passed to the handler.
    pub arguments: Map<String, Value>,
}

impl ToolExecuteParams {
    /// Extract parameters from the raw `params` value of a request.
    pub fn from_params(params: Option<&Value>) -> McpResult<Self> {
        let Some(Value::Object(map)) = params else {
            // Non-object params carry neither a name nor arguments.
            return Ok(Self {
                tool_name: None,
                arguments: Map::new(),
            });
        };

        let tool_name = map
            .get("tool_name")
            .and_then(Value::as_str)
            .or_else(|| map.get("name").and_then(Value::as_str))
            .map(str::to_string);

        let arguments = match map.get("arguments") {
            None | Some(Value::Null) => Map::new(),
            Some(Value::Object(args)) => args.clone(),
            Some(other) => {
                return Err(McpError::InvalidParams(format!(
                    "arguments must be an object, got {}",
                    json_type_name(other)
                )))
            }
        };

        Ok(Self {
            tool_name,
            arguments,
        })
    }
}

/// JSON type name used in diagnostics.
pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
