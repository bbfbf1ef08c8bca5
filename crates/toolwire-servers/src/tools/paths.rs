//! Resolution of tool path arguments.

use std::path::{Path, PathBuf};

use toolwire::ToolError;

/// Turns path arguments into absolute paths.
///
/// Relative paths are joined onto the configured root, or onto the process
/// working directory when no root is configured.
#[derive(Debug, Clone, Default)]
pub struct PathResolver {
    root: Option<PathBuf>,
}

impl PathResolver {
    /// Create a resolver with an optional root.
    pub fn new(root: Option<PathBuf>) -> Self {
        Self { root }
    }

    /// Directory that relative paths are resolved against.
    pub fn base_dir(&self) -> Result<PathBuf, ToolError> {
        match &self.root {
            Some(root) => Ok(root.clone()),
            None => Ok(std::env::current_dir()?),
        }
    }

    /// Resolve a path argument, rejecting an empty one.
    pub fn resolve(&self, raw: &str) -> Result<PathBuf, ToolError> {
        if raw.is_empty() {
            return Err(ToolError::invalid(
                "Missing or invalid required field: path (string)",
            ));
        }
        let path = Path::new(raw);
        if path.is_absolute() {
            return Ok(path.to_path_buf());
        }
        Ok(self.base_dir()?.join(path))
    }
}
