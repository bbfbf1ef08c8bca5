//! Connection lifecycle state machine.

use std::fmt;

/// Connection state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LifecycleState {
    /// No `initialize` seen yet.
    #[default]
    Uninitialized,
    /// `initialize` answered.
    Initialized,
    /// `shutdown` received or a termination signal observed.
    ShuttingDown,
    /// `exit` received; the loop stops after the current message.
    Terminated,
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LifecycleState::Uninitialized => "uninitialized",
            LifecycleState::Initialized => "initialized",
            LifecycleState::ShuttingDown => "shutting-down",
            LifecycleState::Terminated => "terminated",
        };
        f.write_str(name)
    }
}

/// Tracks the lifecycle of one connection.
///
/// Owned by the protocol handler; every transition is logged.
#[derive(Debug, Default)]
pub struct Lifecycle {
    state: LifecycleState,
}

impl Lifecycle {
    /// Start in [`LifecycleState::Uninitialized`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// Whether the loop must stop.
    pub fn is_terminated(&self) -> bool {
        self.state == LifecycleState::Terminated
    }

    /// Apply a valid `initialize` request.
    ///
    /// Only `Uninitialized` moves forward; a repeated or late `initialize` is
    /// answered by the caller but leaves the state alone.
    pub fn initialize(&mut self) {
        if self.state == LifecycleState::Uninitialized {
            self.transition(LifecycleState::Initialized, "initialize");
        } else {
            tracing::warn!(state = %self.state, "initialize received again; state unchanged");
        }
    }

    /// Apply `shutdown`.
    pub fn shutdown(&mut self) {
        match self.state {
            LifecycleState::Terminated | LifecycleState::ShuttingDown => {}
            _ => self.transition(LifecycleState::ShuttingDown, "shutdown"),
        }
    }

    /// Apply a termination signal.
    pub fn signal_shutdown(&mut self) {
        match self.state {
            LifecycleState::Terminated | LifecycleState::ShuttingDown => {}
            _ => self.transition(LifecycleState::ShuttingDown, "signal"),
        }
    }

    /// Apply `exit`. Valid from any state.
    pub fn exit(&mut self) {
        if self.state != LifecycleState::Terminated {
            self.transition(LifecycleState::Terminated, "exit");
        }
    }

    fn transition(&mut self, next: LifecycleState, cause: &str) {
        tracing::info!(from = %self.state, to = %next, cause, "Lifecycle transition");
        self.state = next;
    }
}
