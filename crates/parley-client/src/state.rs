//! Session lifecycle state.
//!
//! ```text
//! Disconnected ──connect──> Connecting ──handshake──> Connected
//!                                                      │     │
//!                              read or write failure   │     │ close()
//!                                                      ↓     ↓
//!                                                  Failed   Closing
//!                                                      │     │
//!                                      close() ────────┴─────┴──> Disconnected
//! ```

use std::{
    fmt,
    sync::{
        Mutex, PoisonError,
        atomic::{AtomicBool, Ordering},
    },
};

/// Connection state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// No socket held.
    Disconnected,
    /// Resolving and connecting.
    Connecting,
    /// Handshake sent; sends are accepted.
    Connected,
    /// `close()` in progress.
    Closing,
    /// The transport failed; the session no longer sends or receives.
    Failed,
}

impl ConnectionState {
    /// True for states a session never leaves without a new `connect`.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Disconnected | Self::Failed)
    }

    /// True if `send` is valid in this state.
    pub fn can_send(self) -> bool {
        self == Self::Connected
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Disconnected => "disconnected",
            Self::Connecting => "connecting",
            Self::Connected => "connected",
            Self::Closing => "closing",
            Self::Failed => "failed",
        };
        f.write_str(label)
    }
}

/// State shared between the session handle and its reader thread.
#[derive(Debug)]
pub(crate) struct SharedState {
    state: Mutex<ConnectionState>,
    /// Cleared exactly once. Whoever clears it reports the shutdown.
    running: AtomicBool,
}

impl SharedState {
    pub(crate) fn new(state: ConnectionState) -> Self {
        Self { state: Mutex::new(state), running: AtomicBool::new(true) }
    }

    pub(crate) fn get(&self) -> ConnectionState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn set(&self, next: ConnectionState) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if *state != next {
            tracing::debug!(from = %*state, to = %next, "connection state");
            *state = next;
        }
    }

    /// Move to `next` only if currently in `from`.
    pub(crate) fn transition(&self, from: ConnectionState, next: ConnectionState) -> bool {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if *state != from {
            return false;
        }
        tracing::debug!(from = %from, to = %next, "connection state");
        *state = next;
        true
    }

    /// Clear the running flag. Returns `true` for the first caller only.
    pub(crate) fn stop(&self) -> bool {
        self.running.swap(false, Ordering::AcqRel)
    }

    pub(crate) fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }
}
