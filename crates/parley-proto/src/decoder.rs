//! Stream reassembly.
//!
//! The transport delivers bytes at arbitrary boundaries: a read may hold
//! half a frame, several frames, or the first bytes of a delimiter.
//! [`FrameDecoder`] buffers across reads and yields a [`RawFrame`] only
//! once its full delimiter has arrived.

use bytes::{Buf, BytesMut};

use crate::{
    DELIMITER, RawFrame,
    errors::{ProtocolError, Result},
    frame::find_delimiter,
};

/// Default cap on buffered, undelimited input (1 MiB).
pub const DEFAULT_MAX_FRAME_SIZE: usize = 1024 * 1024;

/// Incremental frame reassembler.
///
/// # Invariants
///
/// - No frame is emitted before its complete delimiter has been buffered.
/// - Frames are emitted in stream order.
/// - The buffer never holds more than `max_frame_size` undelimited bytes
///   without [`FrameDecoder::next_frame`] reporting
///   [`ProtocolError::FrameTooLarge`].
#[derive(Debug)]
pub struct FrameDecoder {
    buffer: BytesMut,
    /// Prefix of `buffer` already searched without a hit.
    scanned: usize,
    max_frame_size: usize,
}

impl Default for FrameDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameDecoder {
    /// Create a decoder with [`DEFAULT_MAX_FRAME_SIZE`].
    pub fn new() -> Self {
        Self::with_max_frame_size(DEFAULT_MAX_FRAME_SIZE)
    }

    /// Create a decoder with a custom buffer cap.
    pub fn with_max_frame_size(max_frame_size: usize) -> Self {
        Self { buffer: BytesMut::new(), scanned: 0, max_frame_size }
    }

    /// Buffer cap in bytes.
    pub fn max_frame_size(&self) -> usize {
        self.max_frame_size
    }

    /// Bytes buffered but not yet emitted.
    pub fn buffered_len(&self) -> usize {
        self.buffer.len()
    }

    /// Append bytes from the transport.
    pub fn extend(&mut self, bytes: &[u8]) {
        self.buffer.extend_from_slice(bytes);
    }

    /// Take the next complete frame, if one is buffered.
    ///
    /// Returns `Ok(None)` when more input is needed.
    ///
    /// # Errors
    ///
    /// - `ProtocolError::FrameTooLarge` if no delimiter is buffered and the
    ///   remainder exceeds the cap. Every complete frame ahead of the
    ///   oversized one has already been returned by earlier calls.
    pub fn next_frame(&mut self) -> Result<Option<RawFrame>> {
        // A delimiter may straddle the end of the previous search
        let start = self.scanned.saturating_sub(DELIMITER.len() - 1);

        match self.buffer.get(start..).and_then(find_delimiter) {
            Some(offset) => {
                let frame = self.buffer.split_to(start + offset).freeze();
                self.buffer.advance(DELIMITER.len());
                self.scanned = 0;

                let trimmed = frame.slice_ref(frame.trim_ascii());
                Ok(Some(RawFrame::new(trimmed)))
            },
            None => {
                self.scanned = self.buffer.len();

                if self.buffer.len() > self.max_frame_size {
                    return Err(ProtocolError::FrameTooLarge {
                        size: self.buffer.len(),
                        max: self.max_frame_size,
                    });
                }

                Ok(None)
            },
        }
    }

    /// Append bytes and return every frame they complete.
    ///
    /// # Errors
    ///
    /// - `ProtocolError::FrameTooLarge` as for [`FrameDecoder::next_frame`].
    ///   Frames completed by this call are lost; the read loop uses
    ///   [`FrameDecoder::extend`] and [`FrameDecoder::next_frame`] instead.
    pub fn feed(&mut self, bytes: &[u8]) -> Result<Vec<RawFrame>> {
        self.extend(bytes);

        let mut frames = Vec::new();
        while let Some(frame) = self.next_frame()? {
            frames.push(frame);
        }
        Ok(frames)
    }
}
