//! `read_file` tool: Read a UTF-8 text file.

use std::io::ErrorKind;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Map, Value};

use toolwire::tools::parse_arguments;
use toolwire::types::ToolDescriptor;
use toolwire::{ToolError, ToolHandler};

use super::PathResolver;

#[derive(Debug, Deserialize)]
struct ReadParams {
    path: String,
    /// Character limit; negative means no limit.
    max_size: Option<i64>,
}

/// Return the tool definition for read_file.
pub fn definition() -> ToolDescriptor {
    ToolDescriptor::new("read_file", "Reads the content of a file").with_schema(json!({
        "type": "object",
        "properties": {
            "path": { "type": "string", "description": "File to read" },
            "max_size": { "type": "integer", "description": "Maximum number of characters to return" }
        },
        "required": ["path"]
    }))
}

/// Handler for read_file.
pub struct ReadFile {
    paths: PathResolver,
}

impl ReadFile {
    /// Create the handler.
    pub fn new(paths: PathResolver) -> Self {
        Self { paths }
    }
}

#[async_trait]
impl ToolHandler for ReadFile {
    async fn invoke(&self, arguments: Map<String, Value>) -> Result<Value, ToolError> {
        let params: ReadParams = parse_arguments(arguments)?;
        let path = self.paths.resolve(&params.path)?;
        tracing::info!("Reading file: {} (max_size: {:?})", path.display(), params.max_size);

        match tokio::fs::metadata(&path).await {
            Ok(meta) if meta.is_dir() => {
                return Err(ToolError::failed(format!(
                    "Path is a directory, not a file: {}",
                    path.display()
                )))
            }
            Ok(_) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(ToolError::failed(format!(
                    "File not found: {}",
                    path.display()
                )))
            }
            Err(e) => return Err(e.into()),
        }

        let bytes = tokio::fs::read(&path).await.map_err(|e| {
            ToolError::failed(format!("Could not read file {}: {e}", path.display()))
        })?;
        let content = String::from_utf8(bytes).map_err(|e| {
            ToolError::failed(format!("File {} is not valid UTF-8: {e}", path.display()))
        })?;

        let content = match params.max_size.and_then(|n| usize::try_from(n).ok()) {
            Some(limit) => content.chars().take(limit).collect(),
            None => content,
        };

        Ok(json!({ "content": content }))
    }
}
