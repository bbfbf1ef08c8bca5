//! `write_file` tool: Write text to a file.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Map, Value};

use toolwire::tools::parse_arguments;
use toolwire::types::ToolDescriptor;
use toolwire::{ToolError, ToolHandler};

use super::PathResolver;

#[derive(Debug, Deserialize)]
struct WriteParams {
    path: String,
    content: String,
    #[serde(default)]
    create_dirs: bool,
}

/// Return the tool definition for write_file.
pub fn definition() -> ToolDescriptor {
    ToolDescriptor::new("write_file", "Writes content to a file").with_schema(json!({
        "type": "object",
        "properties": {
            "path": { "type": "string", "description": "File to write" },
            "content": { "type": "string", "description": "Text to write" },
            "create_dirs": { "type": "boolean", "description": "Create missing parent directories" }
        },
        "required": ["path", "content"]
    }))
}

/// Handler for write_file.
pub struct WriteFile {
    paths: PathResolver,
}

impl WriteFile {
    /// Create the handler.
    pub fn new(paths: PathResolver) -> Self {
        Self { paths }
    }
}

#[async_trait]
impl ToolHandler for WriteFile {
    async fn invoke(&self, arguments: Map<String, Value>) -> Result<Value, ToolError> {
        let params: WriteParams = parse_arguments(arguments)?;
        let path = self.paths.resolve(&params.path)?;
        tracing::info!("Writing file: {} (create_dirs: {})", path.display(), params.create_dirs);

        if tokio::fs::metadata(&path)
            .await
            .map(|meta| meta.is_dir())
            .unwrap_or(false)
        {
            return Err(ToolError::failed(format!(
                "Path exists and is a directory: {}",
                path.display()
            )));
        }

        if params.create_dirs {
            if let Some(parent) = path.parent() {
                tokio::fs::create_dir_all(parent).await.map_err(|e| {
                    ToolError::failed(format!(
                        "Could not create directory {}: {e}",
                        parent.display()
                    ))
                })?;
            }
        }

        tokio::fs::write(&path, params.content.as_bytes())
            .await
            .map_err(|e| {
                ToolError::failed(format!("Could not write file {}: {e}", path.display()))
            })?;

        tracing::info!(
            "Wrote {} characters to {}",
            params.content.chars().count(),
            path.display()
        );
        Ok(json!({ "success": true }))
    }
}
