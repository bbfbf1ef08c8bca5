//! Server identity, tool descriptors and the `initialize` result.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Value of the `status` field in the `initialize` result.
pub const STATUS_INITIALIZED: &str = "initialized";

/// Name and version a worker advertises to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerIdentity {
    /// Name of the worker, e.g. `filesystem-mcp`.
    pub name: String,
    /// Version string.
    pub version: String,
}

impl ServerIdentity {
    /// Create a new identity.
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

/// Static metadata for one tool, advertised at initialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    /// Tool name (unique within a registry).
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// Optional JSON Schema for the arguments; `null` when absent.
    #[serde(default)]
    pub schema: Option<Value>,
}

impl ToolDescriptor {
    /// Descriptor without a schema.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            schema: None,
        }
    }

    /// Attach an argument schema.
    pub fn with_schema(mut self, schema: Value) -> Self {
        self.schema = Some(schema);
        self
    }
}

/// Capabilities advertised in the `initialize` result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServerCapabilities {
    /// Every registered tool.
    pub tools: Vec<ToolDescriptor>,
    /// Always empty; workers expose no resources.
    pub resources: Vec<Value>,
}

/// Result of a successful `initialize` request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeResult {
    /// Worker identity.
    pub server_info: ServerIdentity,
    /// Advertised capabilities.
    pub capabilities: ServerCapabilities,
    /// Always `"initialized"`.
    pub status: String,
}

impl InitializeResult {
    /// Build the result for a worker with the given tools.
    pub fn new(server_info: ServerIdentity, tools: Vec<ToolDescriptor>) -> Self {
        Self {
            server_info,
            capabilities: ServerCapabilities {
                tools,
                resources: Vec::new(),
            },
            status: STATUS_INITIALIZED.to_string(),
        }
    }
}
