//! The closed set of methods the engine understands.

/// Method name that opens a connection.
pub const INITIALIZE: &str = "initialize";
/// Method name that requests an orderly shutdown.
pub const SHUTDOWN: &str = "shutdown";
/// Method name that terminates the loop.
pub const EXIT: &str = "exit";
/// Method name that runs a tool.
pub const TOOL_EXECUTE: &str = "tool/execute";
/// Older spelling of [`TOOL_EXECUTE`] still sent by some hosts.
pub const TOOL_EXECUTE_ALIAS: &str = "mcp/tool/execute";
/// Prefix of progress and trace notifications, which are ignored.
pub const IGNORED_PREFIX: &str = "$/";

/// A decoded method name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    /// `initialize`.
    Initialize,
    /// `shutdown`.
    Shutdown,
    /// `exit`.
    Exit,
    /// `tool/execute` or its alias.
    ToolExecute,
    /// A `$/`-prefixed method.
    Ignored(String),
    /// Anything else.
    Unhandled(String),
}

impl Method {
    /// Classify a method name.
    pub fn parse(name: &str) -> Self {
        match name {
            INITIALIZE => Method::Initialize,
            SHUTDOWN => Method::Shutdown,
            EXIT => Method::Exit,
            TOOL_EXECUTE | TOOL_EXECUTE_ALIAS => Method::ToolExecute,
            other if other.starts_with(IGNORED_PREFIX) => Method::Ignored(other.to_string()),
            other => Method::Unhandled(other.to_string()),
        }
    }
}
