//! Tool handler contract and registry.

pub mod registry;

pub use registry::{
    parse_arguments, FnTool, RegistryError, ToolError, ToolHandler, ToolRegistry,
    ToolRegistryBuilder,
};
