//! Events delivered to the consumer.

use chrono::{DateTime, Local};

/// A line for the message log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    /// Text began with `"<own nickname>:"`. Derived from wire content, so a
    /// peer using a lookalike prefix is also marked as self.
    pub sender_is_self: bool,
    /// Notice synthesized by the client or a server announcement, rather
    /// than a line typed by a user.
    pub system: bool,
    /// Display text. The own-nickname prefix is already stripped.
    pub text: String,
    /// Local time the frame was classified.
    pub received_at: DateTime<Local>,
}

impl ChatMessage {
    /// Build a system notice.
    pub fn system(text: impl Into<String>, received_at: DateTime<Local>) -> Self {
        Self { sender_is_self: false, system: true, text: text.into(), received_at }
    }
}

/// Authoritative roster of online users.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PresenceSnapshot {
    /// Names in wire order.
    pub users: Vec<String>,
}

/// Event handed from the reader thread to the consumer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Chat line or system notice.
    Chat(ChatMessage),
    /// Replacement roster.
    Presence(PresenceSnapshot),
}
