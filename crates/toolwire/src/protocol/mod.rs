//! Protocol layer: codec, method set, lifecycle and dispatch.

pub mod codec;
pub mod handler;
pub mod lifecycle;
pub mod method;

pub use codec::{decode, encode, CodecError};
pub use handler::ProtocolHandler;
pub use lifecycle::{Lifecycle, LifecycleState};
pub use method::Method;
