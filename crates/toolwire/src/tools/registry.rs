//! Tool registration and lookup.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::types::ToolDescriptor;

/// Failure signalled by a tool handler.
///
/// The `Display` text is what the host sees after `Tool execution error: `.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    /// Arguments are missing or have the wrong shape.
    #[error("{0}")]
    InvalidArguments(String),

    /// An I/O operation failed.
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Any other described failure.
    #[error("{0}")]
    Failed(String),
}

impl ToolError {
    /// Build an [`ToolError::InvalidArguments`].
    pub fn invalid(message: impl Into<String>) -> Self {
        ToolError::InvalidArguments(message.into())
    }

    /// Build a [`ToolError::Failed`].
    pub fn failed(message: impl Into<String>) -> Self {
        ToolError::Failed(message.into())
    }
}

/// Deserialize handler arguments into a typed parameter struct.
pub fn parse_arguments<T: serde::de::DeserializeOwned>(
    arguments: Map<String, Value>,
) -> Result<T, ToolError> {
    serde_json::from_value(Value::Object(arguments)).map_err(|e| ToolError::invalid(e.to_string()))
}

/// A named operation the host can invoke.
///
/// Invocations never overlap: the engine awaits each one before reading the
/// next message, and imposes no timeout of its own.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    /// Run the tool with the decoded `arguments` object.
    async fn invoke(&self, arguments: Map<String, Value>) -> Result<Value, ToolError>;
}

/// Adapts a synchronous closure into a [`ToolHandler`].
pub struct FnTool<F>(pub F);

#[async_trait]
impl<F> ToolHandler for FnTool<F>
where
    F: Fn(Map<String, Value>) -> Result<Value, ToolError> + Send + Sync,
{
    async fn invoke(&self, arguments: Map<String, Value>) -> Result<Value, ToolError> {
        (self.0)(arguments)
    }
}

/// Registration failure.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// A tool with this name is already registered.
    #[error("duplicate tool name: {0}")]
    DuplicateTool(String),
}

struct RegisteredTool {
    descriptor: ToolDescriptor,
    handler: Arc<dyn ToolHandler>,
}

/// Immutable map from tool name to handler.
///
/// Built once with [`ToolRegistry::builder`] and then handed to the protocol
/// handler; there is no way to add tools afterwards.
pub struct ToolRegistry {
    tools: BTreeMap<String, RegisteredTool>,
}

impl ToolRegistry {
    /// Start building a registry.
    pub fn builder() -> ToolRegistryBuilder {
        ToolRegistryBuilder::default()
    }

    /// A registry with no tools.
    pub fn empty() -> Self {
        Self {
            tools: BTreeMap::new(),
        }
    }

    /// Look up a handler by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn ToolHandler>> {
        self.tools.get(name).map(|tool| Arc::clone(&tool.handler))
    }

    /// Whether a tool with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// All descriptors, sorted by name.
    pub fn descriptors(&self) -> Vec<ToolDescriptor> {
        self.tools
            .values()
            .map(|tool| tool.descriptor.clone())
            .collect()
    }

    /// Number of registered tools.
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Whether no tools are registered.
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

/// Collects tools before the registry is frozen.
#[derive(Default)]
pub struct ToolRegistryBuilder {
    tools: BTreeMap<String, RegisteredTool>,
}

impl ToolRegistryBuilder {
    /// Register a handler under its descriptor's name.
    pub fn register<H>(mut self, descriptor: ToolDescriptor, handler: H) -> Result<Self, RegistryError>
    where
        H: ToolHandler + 'static,
    {
        if self.tools.contains_key(&descriptor.name) {
            return Err(RegistryError::DuplicateTool(descriptor.name));
        }
        tracing::debug!(tool = %descriptor.name, "Registering tool");
        self.tools.insert(
            descriptor.name.clone(),
            RegisteredTool {
                descriptor,
                handler: Arc::new(handler),
            },
        );
        Ok(self)
    }

    /// Freeze the registry.
    pub fn build(self) -> ToolRegistry {
        ToolRegistry { tools: self.tools }
    }
}
