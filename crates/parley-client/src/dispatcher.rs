//! Frame classification.
//!
//! The [`Dispatcher`] converts decoded [`RawFrame`]s into consumer
//! [`Event`]s. It runs on the reader thread, once per frame.

use chrono::{DateTime, Local};
use parley_proto::{Frame, RawFrame};

use crate::{ChatMessage, Event, PresenceSnapshot};

/// Leading glyphs the server uses for join/leave and other announcements.
pub const SYSTEM_MARKERS: [&str; 4] = ["🔵", "🔴", "⚠️", "🎨"];

/// Classifies frames for one nickname.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    /// `"<nickname>:"`
    self_prefix: String,
}

impl Dispatcher {
    /// Create a dispatcher for the local nickname.
    pub fn new(nickname: &str) -> Self {
        Self { self_prefix: format!("{nickname}:") }
    }

    /// Classify a frame received now.
    pub fn classify(&self, raw: &RawFrame) -> Option<Event> {
        self.classify_at(raw, Local::now())
    }

    /// Classify a frame with an explicit receive time.
    ///
    /// Returns `None` for frames with no known prefix; the reader skips them.
    pub fn classify_at(&self, raw: &RawFrame, received_at: DateTime<Local>) -> Option<Event> {
        match Frame::parse(raw)? {
            Frame::Message(text) => Some(Event::Chat(self.chat(text, received_at))),
            Frame::Users(users) => Some(Event::Presence(PresenceSnapshot { users })),
        }
    }

    /// Build a chat message from `MSG:` text.
    ///
    /// A leading `"<nickname>:"` marks the line as our own and is stripped.
    pub fn chat(&self, text: String, received_at: DateTime<Local>) -> ChatMessage {
        if let Some(own) = text.strip_prefix(&self.self_prefix) {
            return ChatMessage {
                sender_is_self: true,
                system: false,
                text: own.trim().to_string(),
                received_at,
            };
        }

        let system = SYSTEM_MARKERS.iter().any(|marker| text.starts_with(marker));
        ChatMessage { sender_is_self: false, system, text, received_at }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(text: &str) -> RawFrame {
        RawFrame::new(text.as_bytes().to_vec())
    }

    fn chat(dispatcher: &Dispatcher, text: &str) -> ChatMessage {
        match dispatcher.classify(&raw(text)) {
            Some(Event::Chat(message)) => message,
            other => panic!("expected chat event, got {other:?}"),
        }
    }

    #[test]
    fn own_prefix_is_detected_and_stripped() {
        let dispatcher = Dispatcher::new("alice");

        let message = chat(&dispatcher, "MSG:alice: hi");

        assert!(message.sender_is_self);
        assert_eq!(message.text, "hi");
    }

    #[test]
    fn other_sender_keeps_full_text() {
        let dispatcher = Dispatcher::new("alice");

        let message = chat(&dispatcher, "MSG:bob: hi");

        assert!(!message.sender_is_self);
        assert!(!message.system);
        assert_eq!(message.text, "bob: hi");
    }

    #[test]
    fn lookalike_prefix_is_misattributed() {
        // Self-detection is textual: a peer echoing "alice:" looks like us.
        let dispatcher = Dispatcher::new("alice");

        assert!(chat(&dispatcher, "MSG:alice: not really").sender_is_self);
        assert!(!chat(&dispatcher, "MSG:alice2: someone else").sender_is_self);
    }

    #[test]
    fn presence_frame_becomes_snapshot() {
        let dispatcher = Dispatcher::new("alice");

        let event = dispatcher.classify(&raw("USERS: alice ,bob,, carol "));

        assert_eq!(
            event,
            Some(Event::Presence(PresenceSnapshot {
                users: vec!["alice".into(), "bob".into(), "carol".into()],
            }))
        );
    }

    #[test]
    fn unknown_frames_are_ignored() {
        let dispatcher = Dispatcher::new("alice");

        assert_eq!(dispatcher.classify(&raw("HELLO")), None);
        assert_eq!(dispatcher.classify(&raw("")), None);
    }

    #[test]
    fn server_announcements_are_system() {
        let dispatcher = Dispatcher::new("alice");

        let message = chat(&dispatcher, "MSG:🔵 bob joined the chat");

        assert!(message.system);
        assert!(!message.sender_is_self);
    }

    #[test]
    fn receive_time_is_kept() {
        let dispatcher = Dispatcher::new("alice");
        let at = Local::now();

        let event = dispatcher.classify_at(&raw("MSG:hello"), at);

        assert!(matches!(event, Some(Event::Chat(ChatMessage { received_at, .. })) if received_at == at));
    }
}
