//! `get_current_dir` tool: Report the directory relative paths resolve against.

use async_trait::async_trait;
use serde_json::{json, Map, Value};

use toolwire::types::ToolDescriptor;
use toolwire::{ToolError, ToolHandler};

use super::PathResolver;

/// Return the tool definition for get_current_dir.
pub fn definition() -> ToolDescriptor {
    ToolDescriptor::new("get_current_dir", "Gets the current working directory").with_schema(
        json!({
            "type": "object",
            "properties": {}
        }),
    )
}

/// Handler for get_current_dir.
pub struct GetCurrentDir {
    paths: PathResolver,
}

impl GetCurrentDir {
    /// Create the handler.
    pub fn new(paths: PathResolver) -> Self {
        Self { paths }
    }
}

#[async_trait]
impl ToolHandler for GetCurrentDir {
    async fn invoke(&self, _arguments: Map<String, Value>) -> Result<Value, ToolError> {
        let dir = self.paths.base_dir()?;
        Ok(json!({ "path": dir.display().to_string() }))
    }
}
