//! Frame types and encoding.
//!
//! Layout on the wire:
//! `[prefix] + [payload text] + "\nEND\n"`
//!
//! A [`RawFrame`] is what the decoder yields: the bytes between two
//! delimiters, whitespace-trimmed. [`Frame::parse`] classifies it.

use std::borrow::Cow;

use bytes::{BufMut, Bytes, BytesMut};

/// Frame terminator. Not escaped inside payloads.
pub const DELIMITER: &[u8] = b"\nEND\n";

/// Prefix of a chat frame.
pub const MESSAGE_PREFIX: &str = "MSG:";

/// Prefix of a presence frame.
pub const USERS_PREFIX: &str = "USERS:";

/// Separator between names in a presence frame.
pub const USER_SEPARATOR: char = ',';

/// One delimited unit of the stream, before classification.
///
/// Holds the bytes between two delimiters with leading and trailing ASCII
/// whitespace removed. The content is untrusted and may not be valid UTF-8.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFrame {
    bytes: Bytes,
}

impl RawFrame {
    /// Wrap already-delimited bytes.
    pub fn new(bytes: impl Into<Bytes>) -> Self {
        Self { bytes: bytes.into() }
    }

    /// Raw frame bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Frame content as text, replacing invalid UTF-8 sequences.
    pub fn to_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.bytes)
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// True if the frame carried nothing but whitespace.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// A classified protocol frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    /// `MSG:` chat text, trimmed.
    Message(String),

    /// `USERS:` roster in wire order. Empty entries are dropped, duplicates
    /// are kept.
    Users(Vec<String>),
}

impl Frame {
    /// Classify a raw frame.
    ///
    /// Returns `None` for content that carries neither known prefix.
    pub fn parse(raw: &RawFrame) -> Option<Self> {
        let text = raw.to_text();

        if let Some(body) = text.strip_prefix(MESSAGE_PREFIX) {
            return Some(Self::Message(body.trim().to_string()));
        }

        text.strip_prefix(USERS_PREFIX).map(|body| {
            Self::Users(
                body.split(USER_SEPARATOR)
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .map(str::to_string)
                    .collect(),
            )
        })
    }

    /// Encode frame into buffer, delimiter included.
    ///
    /// Payloads are written verbatim. A payload containing [`DELIMITER`]
    /// will be read back as more than one frame.
    pub fn encode(&self, dst: &mut impl BufMut) {
        match self {
            Self::Message(text) => {
                dst.put_slice(MESSAGE_PREFIX.as_bytes());
                dst.put_slice(text.as_bytes());
            },
            Self::Users(names) => {
                dst.put_slice(USERS_PREFIX.as_bytes());
                for (i, name) in names.iter().enumerate() {
                    if i > 0 {
                        dst.put_u8(USER_SEPARATOR as u8);
                    }
                    dst.put_slice(name.as_bytes());
                }
            },
        }
        dst.put_slice(DELIMITER);
    }

    /// Encode into a fresh buffer.
    pub fn to_bytes(&self) -> Bytes {
        let mut buf = BytesMut::new();
        self.encode(&mut buf);
        buf.freeze()
    }
}

/// Handshake payload: the nickname, unframed and unprefixed.
pub fn encode_handshake(nickname: &str) -> Bytes {
    Bytes::copy_from_slice(nickname.as_bytes())
}

/// True if `text` would be split by the decoder.
pub fn contains_delimiter(text: &str) -> bool {
    find_delimiter(text.as_bytes()).is_some()
}

/// Offset of the first delimiter in `haystack`.
pub(crate) fn find_delimiter(haystack: &[u8]) -> Option<usize> {
    haystack.windows(DELIMITER.len()).position(|window| window == DELIMITER)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(text: &str) -> RawFrame {
        RawFrame::new(text.as_bytes().to_vec())
    }

    #[test]
    fn message_encodes_with_prefix_and_delimiter() {
        let bytes = Frame::Message("hello".into()).to_bytes();
        assert_eq!(&bytes[..], b"MSG:hello\nEND\n");
    }

    #[test]
    fn users_encode_comma_separated() {
        let bytes = Frame::Users(vec!["alice".into(), "bob".into()]).to_bytes();
        assert_eq!(&bytes[..], b"USERS:alice,bob\nEND\n");
    }

    #[test]
    fn parse_message_trims_body() {
        assert_eq!(Frame::parse(&raw("MSG:  hi there ")), Some(Frame::Message("hi there".into())));
    }

    #[test]
    fn parse_users_drops_empty_entries() {
        assert_eq!(
            Frame::parse(&raw("USERS: alice ,bob,, carol ")),
            Some(Frame::Users(vec!["alice".into(), "bob".into(), "carol".into()]))
        );
    }

    #[test]
    fn parse_users_keeps_duplicates() {
        assert_eq!(
            Frame::parse(&raw("USERS:bob,bob")),
            Some(Frame::Users(vec!["bob".into(), "bob".into()]))
        );
    }

    #[test]
    fn parse_empty_roster() {
        assert_eq!(Frame::parse(&raw("USERS:")), Some(Frame::Users(vec![])));
    }

    #[test]
    fn unknown_prefix_is_unclassified() {
        assert_eq!(Frame::parse(&raw("PING")), None);
        assert_eq!(Frame::parse(&raw("")), None);
        assert_eq!(Frame::parse(&raw("msg:lowercase")), None);
    }

    #[test]
    fn invalid_utf8_is_replaced() {
        let frame = RawFrame::new(vec![b'M', b'S', b'G', b':', 0xff, b'o', b'k']);
        assert_eq!(Frame::parse(&frame), Some(Frame::Message("\u{fffd}ok".into())));
    }

    #[test]
    fn handshake_is_unframed() {
        assert_eq!(&encode_handshake("alice")[..], b"alice");
    }

    #[test]
    fn delimiter_detection() {
        assert!(contains_delimiter("a\nEND\nb"));
        assert!(!contains_delimiter("a\nEND b"));
        assert!(!contains_delimiter(""));
    }
}
