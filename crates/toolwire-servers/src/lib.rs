//! The stock tool workers: filesystem, command, echo and the handshake-only memory store.
//!
//! Each worker is a [`toolwire::types::ServerIdentity`] plus a tool registry;
//! [`servers::Worker::build_handler`] turns one into a ready protocol handler.

pub mod servers;
pub mod tools;

pub use servers::Worker;
