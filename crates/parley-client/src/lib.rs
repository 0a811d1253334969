//! Network protocol bridge for Parley
//!
//! Owns the TCP connection, decodes the inbound stream on a dedicated
//! reader thread, and hands typed events to a consumer that polls.
//!
//! # Components
//!
//! - [`Session`]: connect, handshake, send, close; owns the socket
//! - [`Dispatcher`]: turns decoded frames into [`Event`]s
//! - [`EventQueue`]: FIFO hand-off from the reader thread to the consumer
//! - [`ConnectionState`]: lifecycle of a session
//!
//! # Threads
//!
//! ```text
//! socket ──read──> [reader thread] FrameDecoder → Dispatcher → EventSender
//!                                                                  │
//! consumer <──────────────── Session::poll() ◄── EventQueue ◄──────┘
//! consumer ──Session::send()──> socket
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod dispatcher;
mod error;
mod event;
mod queue;
mod reader;
mod session;
mod state;

pub use dispatcher::{Dispatcher, SYSTEM_MARKERS};
pub use error::{ConnectError, ReadFailure, SendError};
pub use event::{ChatMessage, Event, PresenceSnapshot};
pub use queue::{EventQueue, EventSender, event_queue};
pub use session::{
    DEFAULT_CONNECT_TIMEOUT, DEFAULT_READ_BUFFER_SIZE, Session, SessionConfig, parse_port,
};
pub use state::ConnectionState;
