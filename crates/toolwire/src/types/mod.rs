//! All protocol data types used by the engine.

pub mod capabilities;
pub mod error;
pub mod message;
pub mod request;

// Re-export commonly used types for convenience.
pub use capabilities::*;
pub use error::*;
pub use message::*;
pub use request::*;
