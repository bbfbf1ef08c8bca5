//! Transport layer: the serving loop and outbound framing.

pub mod stdio;
pub mod writer;

pub use stdio::{ExitReason, StdioTransport};
pub use writer::{frame_header, ResponseWriter, WritePath};
