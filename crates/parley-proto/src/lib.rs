//! Parley wire protocol
//!
//! Text frames over a byte stream, each terminated by the literal sequence
//! `"\nEND\n"`. There is no length prefix and no escaping: a payload that
//! contains the delimiter is split at it.
//!
//! # Components
//!
//! - [`FrameDecoder`]: reassembles frames from arbitrary read boundaries
//! - [`RawFrame`]: one delimited unit, not yet classified
//! - [`Frame`]: a classified frame (`MSG:` chat text or `USERS:` roster)
//! - [`encode_handshake`]: the unframed nickname sent right after connecting

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod decoder;
pub mod errors;
mod frame;

pub use decoder::{DEFAULT_MAX_FRAME_SIZE, FrameDecoder};
pub use errors::{ProtocolError, Result};
pub use frame::{
    DELIMITER, Frame, MESSAGE_PREFIX, RawFrame, USER_SEPARATOR, USERS_PREFIX, contains_delimiter,
    encode_handshake,
};
