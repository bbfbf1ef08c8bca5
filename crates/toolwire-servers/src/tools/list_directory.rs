//! `list_directory` tool: List the entries of a directory.

use std::io::ErrorKind;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Map, Value};

use toolwire::tools::parse_arguments;
use toolwire::types::ToolDescriptor;
use toolwire::{ToolError, ToolHandler};

use super::PathResolver;

#[derive(Debug, Deserialize)]
struct ListParams {
    path: String,
}

/// Return the tool definition for list_directory.
pub fn definition() -> ToolDescriptor {
    ToolDescriptor::new("list_directory", "Lists files in a directory").with_schema(json!({
        "type": "object",
        "properties": {
            "path": { "type": "string", "description": "Directory to list" }
        },
        "required": ["path"]
    }))
}

/// Handler for list_directory.
pub struct ListDirectory {
    paths: PathResolver,
}

impl ListDirectory {
    /// Create the handler.
    pub fn new(paths: PathResolver) -> Self {
        Self { paths }
    }
}

#[async_trait]
impl ToolHandler for ListDirectory {
    async fn invoke(&self, arguments: Map<String, Value>) -> Result<Value, ToolError> {
        let params: ListParams = parse_arguments(arguments)?;
        let dir = self.paths.resolve(&params.path)?;
        tracing::info!("Listing directory: {}", dir.display());

        let meta = match tokio::fs::metadata(&dir).await {
            Ok(meta) => meta,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(ToolError::failed(format!(
                    "Directory not found: {}",
                    dir.display()
                )))
            }
            Err(e) => return Err(e.into()),
        };
        if !meta.is_dir() {
            return Err(ToolError::failed(format!(
                "Path is not a directory: {}",
                dir.display()
            )));
        }

        let mut entries = tokio::fs::read_dir(&dir).await.map_err(|e| {
            ToolError::failed(format!("Could not list directory {}: {e}", dir.display()))
        })?;

        let mut files = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name().to_string_lossy().into_owned();
            let path = entry.path();
            // Follow symlinks so a link to a directory reports as one.
            let info = match tokio::fs::metadata(&path).await {
                Ok(meta) => {
                    let size = meta.is_file().then(|| meta.len());
                    json!({
                        "name": name,
                        "path": path.display().to_string(),
                        "is_directory": meta.is_dir(),
                        "size": size,
                    })
                }
                Err(e) => {
                    tracing::warn!("Could not stat entry {}: {e}", path.display());
                    json!({
                        "name": name,
                        "path": path.display().to_string(),
                        "is_directory": null,
                        "size": null,
                        "error": e.to_string(),
                    })
                }
            };
            files.push((name, info));
        }
        files.sort_by(|a, b| a.0.cmp(&b.0));

        tracing::info!("Found {} entries in {}", files.len(), dir.display());
        Ok(json!({
            "files": files.into_iter().map(|(_, info)| info).collect::<Vec<_>>(),
        }))
    }
}
