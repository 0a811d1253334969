//! Error types for the session layer.
//!
//! [`ConnectError`] and [`SendError`] are returned to the caller.
//! [`ReadFailure`] only exists inside the reader thread, which has no caller
//! to return to; it reaches the consumer as a system [`crate::ChatMessage`].

use std::io;

use parley_proto::ProtocolError;
use thiserror::Error;

use crate::ConnectionState;

/// Errors from [`crate::Session::connect`].
#[derive(Error, Debug)]
pub enum ConnectError {
    /// Port text is not a number in 1..=65535. Raised before any I/O.
    #[error("invalid port {input:?}: expected a number between 1 and 65535")]
    InvalidPort {
        /// Port text as given
        input: String,
    },

    /// Host name resolution failed
    #[error("failed to resolve {host}: {source}")]
    Resolve {
        /// Host as given
        host: String,
        /// Resolver error
        source: io::Error,
    },

    /// Resolution succeeded but produced no addresses
    #[error("no addresses found for {host}")]
    NoAddress {
        /// Host as given
        host: String,
    },

    /// Every resolved address refused or timed out. Carries the last attempt.
    #[error("failed to connect to {addr}: {source}")]
    Connect {
        /// Address of the last attempt
        addr: String,
        /// Socket error
        source: io::Error,
    },

    /// Writing the nickname handshake failed
    #[error("handshake failed: {0}")]
    Handshake(#[source] io::Error),

    /// Socket clone or reader thread creation failed
    #[error("failed to start read loop: {0}")]
    Spawn(#[source] io::Error),
}

impl ConnectError {
    /// Returns true if the same parameters may succeed on another attempt.
    ///
    /// Refusals, timeouts and resolver failures depend on the network.
    /// An invalid port never will.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Resolve { .. } | Self::Connect { .. } | Self::Handshake(_))
    }
}

/// Errors from [`crate::Session::send`].
#[derive(Error, Debug)]
pub enum SendError {
    /// The session is not in [`ConnectionState::Connected`]
    #[error("cannot send while {state}")]
    NotConnected {
        /// State at the time of the call
        state: ConnectionState,
    },

    /// Socket write failed; the session is now failed
    #[error("write failed: {0}")]
    Write(#[from] io::Error),
}

/// Why the reader thread stopped.
#[derive(Error, Debug)]
pub enum ReadFailure {
    /// Peer closed the stream
    #[error("connection closed by server")]
    PeerClosed,

    /// Socket receive failed
    #[error("receive error: {0}")]
    Transport(#[from] io::Error),

    /// Inbound stream violated the framing limits
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),
}

impl ReadFailure {
    /// State the session moves to after this failure.
    pub fn resulting_state(&self) -> ConnectionState {
        match self {
            Self::PeerClosed => ConnectionState::Disconnected,
            Self::Transport(_) | Self::Protocol(_) => ConnectionState::Failed,
        }
    }
}
