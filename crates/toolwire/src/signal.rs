//! Termination signals mapped onto a cooperative shutdown flag.
//!
//! The flag is only looked at between messages. A read that is already
//! blocked stays blocked until the host closes the stream.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use signal_hook::consts::signal::{SIGINT, SIGTERM};

/// Signals that request shutdown.
pub const SHUTDOWN_SIGNALS: [i32; 2] = [SIGINT, SIGTERM];

/// Errors reported while installing signal handlers.
#[derive(Debug, thiserror::Error)]
pub enum SignalError {
    /// Registering a handler failed.
    #[error("failed to install handler for signal {signal}: {source}")]
    Install {
        /// Signal number.
        signal: i32,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
}

/// Shared flag set by a termination signal or by [`ShutdownFlag::request`].
#[derive(Debug, Clone, Default)]
pub struct ShutdownFlag {
    requested: Arc<AtomicBool>,
}

impl ShutdownFlag {
    /// A flag that is not yet set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the flag.
    pub fn request(&self) {
        self.requested.store(true, Ordering::SeqCst);
    }

    /// Whether shutdown has been requested.
    pub fn is_requested(&self) -> bool {
        self.requested.load(Ordering::SeqCst)
    }

    /// Route SIGINT and SIGTERM to this flag.
    pub fn register_signals(&self) -> Result<(), SignalError> {
        for signal in SHUTDOWN_SIGNALS {
            signal_hook::flag::register(signal, Arc::clone(&self.requested))
                .map_err(|source| SignalError::Install { signal, source })?;
        }
        Ok(())
    }

    /// Like [`ShutdownFlag::register_signals`], but a failure is only logged.
    ///
    /// Returns whether the handlers are in place.
    pub fn install(&self) -> bool {
        match self.register_signals() {
            Ok(()) => {
                tracing::info!("Registered signal handlers for SIGINT and SIGTERM");
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "Could not install signal handlers; continuing without them");
                false
            }
        }
    }
}
