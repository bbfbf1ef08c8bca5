//! `delete_file` tool: Delete a file, or a directory recursively.

use std::io::ErrorKind;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Map, Value};

use toolwire::tools::parse_arguments;
use toolwire::types::ToolDescriptor;
use toolwire::{ToolError, ToolHandler};

use super::PathResolver;

#[derive(Debug, Deserialize)]
struct DeleteParams {
    path: String,
}

/// Return the tool definition for delete_file.
pub fn definition() -> ToolDescriptor {
    ToolDescriptor::new("delete_file", "Deletes a file or directory").with_schema(json!({
        "type": "object",
        "properties": {
            "path": { "type": "string", "description": "File or directory to delete" }
        },
        "required": ["path"]
    }))
}

/// Handler for delete_file.
pub struct DeleteFile {
    paths: PathResolver,
}

impl DeleteFile {
    /// Create the handler.
    pub fn new(paths: PathResolver) -> Self {
        Self { paths }
    }
}

#[async_trait]
impl ToolHandler for DeleteFile {
    async fn invoke(&self, arguments: Map<String, Value>) -> Result<Value, ToolError> {
        let params: DeleteParams = parse_arguments(arguments)?;
        let path = self.paths.resolve(&params.path)?;
        tracing::info!("Deleting: {}", path.display());

        let meta = match tokio::fs::symlink_metadata(&path).await {
            Ok(meta) => meta,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(ToolError::failed(format!(
                    "File or directory not found: {}",
                    path.display()
                )))
            }
            Err(e) => return Err(e.into()),
        };

        let removed = if meta.is_dir() {
            tokio::fs::remove_dir_all(&path).await
        } else {
            tokio::fs::remove_file(&path).await
        };
        removed.map_err(|e| {
            ToolError::failed(format!("Could not delete {}: {e}", path.display()))
        })?;

        tracing::info!("Deleted: {}", path.display());
        Ok(json!({ "success": true }))
    }
}
