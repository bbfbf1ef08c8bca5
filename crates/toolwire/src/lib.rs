//! toolwire: the protocol engine behind small stdio tool workers.
//!
//! A worker reads `Content-Length` framed JSON-RPC messages from its input
//! stream, answers `initialize`, `shutdown`, `exit` and `tool/execute`, and
//! writes framed responses back. Everything a worker actually does lives in
//! [`tools::ToolHandler`] implementations registered before the loop starts.

pub mod config;
pub mod framing;
pub mod protocol;
pub mod signal;
pub mod tools;
pub mod transport;
pub mod types;

pub use config::ServerConfig;
pub use protocol::ProtocolHandler;
pub use signal::ShutdownFlag;
pub use tools::{ToolError, ToolHandler, ToolRegistry};
pub use transport::{ExitReason, StdioTransport};
