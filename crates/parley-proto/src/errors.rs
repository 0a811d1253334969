//! Protocol errors.

use thiserror::Error;

/// Result alias for protocol operations.
pub type Result<T> = std::result::Result<T, ProtocolError>;

/// Errors raised while reassembling the byte stream.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// Buffered, undelimited input exceeded the decoder's cap.
    #[error("frame too large: {size} bytes buffered without a delimiter (max {max})")]
    FrameTooLarge {
        /// Bytes currently buffered
        size: usize,
        /// Configured cap
        max: usize,
    },
}
