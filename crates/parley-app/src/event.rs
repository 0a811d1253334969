//! Application input events.
//!
//! [`AppEvent`] is the full set of inputs that drive the [`crate::App`]
//! state machine. They come from two places:
//! - the front end (keys, resize, ticks)
//! - the runtime, reporting on the session it owns

use parley_client::{ConnectionState, Event};

use crate::KeyInput;

/// Events processed by the App state machine.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Keyboard input not consumed by the front end's line editor.
    Key(KeyInput),

    /// Periodic tick.
    Tick,

    /// Terminal resize (columns, rows).
    Resize(u16, u16),

    /// Connection attempt started.
    Connecting,

    /// Session established and handshake sent.
    Connected {
        /// Address that accepted the connection.
        peer_addr: String,
    },

    /// Connection attempt failed.
    ConnectFailed {
        /// Display form of the connect error.
        message: String,
    },

    /// The session's state changed since the last drain.
    StateChanged(ConnectionState),

    /// Event drained from the session.
    Inbound(Event),

    /// A send was rejected or the write failed.
    SendFailed {
        /// Display form of the send error.
        message: String,
    },
}
