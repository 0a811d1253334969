//! Application state machine.
//!
//! [`App`] holds everything the UI shows and nothing that does I/O. It
//! consumes [`crate::AppEvent`] inputs and produces [`crate::AppAction`]
//! instructions for the runtime to execute.
//!
//! # Responsibilities
//!
//! - Mirrors the session's connection state for the status bar.
//! - Keeps the message log and the online-users roster.
//! - Decides which user intents are valid in the current state.

use std::collections::VecDeque;

use chrono::Local;
use parley_client::{ChatMessage, ConnectionState, Event};

use crate::{AppAction, AppEvent, KeyInput, PresenceTracker};

/// Messages kept before the oldest are dropped.
pub const DEFAULT_MESSAGE_LIMIT: usize = 1000;

/// Application state machine.
#[derive(Debug, Clone)]
pub struct App {
    state: ConnectionState,
    nickname: String,
    host: String,
    /// Port text as given; validated when the session connects.
    port: String,
    /// Address that accepted the current session. `None` when not connected.
    peer_addr: Option<String>,
    /// Oldest first, at most `message_limit` entries.
    messages: VecDeque<ChatMessage>,
    message_limit: usize,
    presence: PresenceTracker,
    /// Terminal dimensions (columns, rows).
    terminal_size: (u16, u16),
    /// Transient status message. `None` if no message.
    status_message: Option<String>,
}

impl App {
    /// Create a disconnected App for the given endpoint and nickname.
    pub fn new(
        nickname: impl Into<String>,
        host: impl Into<String>,
        port: impl Into<String>,
    ) -> Self {
        Self {
            state: ConnectionState::Disconnected,
            nickname: nickname.into(),
            host: host.into(),
            port: port.into(),
            peer_addr: None,
            messages: VecDeque::new(),
            message_limit: DEFAULT_MESSAGE_LIMIT,
            presence: PresenceTracker::new(),
            terminal_size: (80, 24),
            status_message: None,
        }
    }

    /// Keep at most `limit` messages (minimum one), dropping the oldest.
    #[must_use]
    pub fn with_message_limit(mut self, limit: usize) -> Self {
        self.message_limit = limit.max(1);
        while self.messages.len() > self.message_limit {
            self.messages.pop_front();
        }
        self
    }

    /// Process an event and return actions.
    pub fn handle(&mut self, event: AppEvent) -> Vec<AppAction> {
        match event {
            AppEvent::Key(KeyInput::Esc) => self.quit(),
            AppEvent::Key(_) | AppEvent::Tick => vec![],
            AppEvent::Resize(cols, rows) => {
                self.terminal_size = (cols, rows);
                vec![AppAction::Render]
            },
            AppEvent::Connecting => {
                self.state = ConnectionState::Connecting;
                self.status_message = Some(format!("Connecting to {}...", self.endpoint()));
                vec![AppAction::Render]
            },
            AppEvent::Connected { peer_addr } => {
                self.state = ConnectionState::Connected;
                self.status_message = Some(format!("Connected as {}", self.nickname));
                self.peer_addr = Some(peer_addr);
                vec![AppAction::Render]
            },
            AppEvent::ConnectFailed { message } => {
                self.state = ConnectionState::Failed;
                self.peer_addr = None;
                self.notice(format!("Could not connect: {message}"));
                self.status_message = Some("Connect failed, /reconnect to retry".to_string());
                vec![AppAction::Render]
            },
            AppEvent::StateChanged(state) => {
                if state == self.state {
                    return vec![];
                }
                self.state = state;
                if state.is_terminal() {
                    self.peer_addr = None;
                    self.presence.clear();
                    self.status_message = Some(match state {
                        ConnectionState::Failed => "Connection lost, /reconnect to retry".into(),
                        _ => "Disconnected".into(),
                    });
                }
                vec![AppAction::Render]
            },
            AppEvent::Inbound(Event::Chat(message)) => {
                self.push_message(message);
                vec![AppAction::Render]
            },
            AppEvent::Inbound(Event::Presence(snapshot)) => {
                self.presence.apply(snapshot);
                vec![AppAction::Render]
            },
            AppEvent::SendFailed { message } => {
                self.notice(format!("Send failed: {message}"));
                vec![AppAction::Render]
            },
        }
    }

    /// Set a status message to display to the user.
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// Start a connection attempt.
    ///
    /// Refused while a session is live or already being opened.
    pub fn connect(&mut self) -> Vec<AppAction> {
        if matches!(self.state, ConnectionState::Connecting | ConnectionState::Connected) {
            self.status_message = Some(format!("Already {}", self.state));
            return vec![AppAction::Render];
        }

        self.state = ConnectionState::Connecting;
        vec![AppAction::Connect, AppAction::Render]
    }

    /// Drop the current session, if any, and connect again.
    pub fn reconnect(&mut self) -> Vec<AppAction> {
        let mut actions = vec![AppAction::Disconnect];
        self.state = ConnectionState::Disconnected;
        self.peer_addr = None;
        self.presence.clear();
        actions.extend(self.connect());
        actions
    }

    /// Close the current session.
    pub fn disconnect(&mut self) -> Vec<AppAction> {
        if self.state.is_terminal() {
            self.status_message = Some("Not connected".to_string());
            return vec![AppAction::Render];
        }
        vec![AppAction::Disconnect, AppAction::Render]
    }

    /// Send a chat line.
    ///
    /// The text is trimmed; blank input is ignored. Nothing is echoed
    /// locally: the line appears when the server broadcasts it back.
    pub fn send_message(&mut self, text: &str) -> Vec<AppAction> {
        let text = text.trim();
        if text.is_empty() {
            return vec![];
        }

        if !self.state.can_send() {
            self.status_message = Some(format!("Cannot send while {}", self.state));
            return vec![AppAction::Render];
        }

        vec![AppAction::SendMessage { text: text.to_string() }]
    }

    /// Quit the application.
    pub fn quit(&self) -> Vec<AppAction> {
        vec![AppAction::Quit]
    }

    fn notice(&mut self, text: String) {
        self.push_message(ChatMessage::system(text, Local::now()));
    }

    fn push_message(&mut self, message: ChatMessage) {
        if self.messages.len() == self.message_limit {
            self.messages.pop_front();
        }
        self.messages.push_back(message);
    }

    /// Mirrored connection state.
    pub fn connection_state(&self) -> ConnectionState {
        self.state
    }

    /// Local nickname.
    pub fn nickname(&self) -> &str {
        &self.nickname
    }

    /// Server host.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Server port text.
    pub fn port(&self) -> &str {
        &self.port
    }

    /// `host:port` for display.
    pub fn endpoint(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Address of the live session. `None` when not connected.
    pub fn peer_addr(&self) -> Option<&str> {
        self.peer_addr.as_deref()
    }

    /// Message log, oldest first.
    pub fn messages(&self) -> &VecDeque<ChatMessage> {
        &self.messages
    }

    /// Online-users roster.
    pub fn presence(&self) -> &PresenceTracker {
        &self.presence
    }

    /// Terminal dimensions (columns, rows).
    pub fn terminal_size(&self) -> (u16, u16) {
        self.terminal_size
    }

    /// Transient status message. `None` if no message.
    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use parley_client::PresenceSnapshot;

    use super::*;

    fn connected_app() -> App {
        let mut app = App::new("alice", "127.0.0.1", "12345");
        app.handle(AppEvent::Connected { peer_addr: "127.0.0.1:12345".into() });
        app
    }

    fn chat(text: &str) -> Event {
        Event::Chat(ChatMessage {
            sender_is_self: false,
            system: false,
            text: text.into(),
            received_at: Local::now(),
        })
    }

    #[test]
    fn message_log_drops_oldest_at_limit() {
        let mut app = connected_app().with_message_limit(3);
        for text in ["a", "b", "c", "d", "e"] {
            app.handle(AppEvent::Inbound(chat(text)));
        }

        let texts: Vec<&str> = app.messages().iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, ["c", "d", "e"]);
    }

    #[test]
    fn api_connect() {
        let mut app = App::new("alice", "127.0.0.1", "12345");
        let actions = app.connect();

        assert_eq!(actions, [AppAction::Connect, AppAction::Render]);
        assert_eq!(app.connection_state(), ConnectionState::Connecting);
    }

    #[test]
    fn connect_refused_while_connected() {
        let mut app = connected_app();
        let actions = app.connect();

        assert_eq!(actions, [AppAction::Render]);
        assert_eq!(app.status_message(), Some("Already connected"));
    }

    #[test]
    fn api_reconnect_disconnects_first() {
        let mut app = connected_app();
        let actions = app.reconnect();

        assert_eq!(actions, [AppAction::Disconnect, AppAction::Connect, AppAction::Render]);
        assert_eq!(app.connection_state(), ConnectionState::Connecting);
    }

    #[test]
    fn api_send_message_trims() {
        let mut app = connected_app();
        let actions = app.send_message("  hello  ");

        assert_eq!(actions, [AppAction::SendMessage { text: "hello".into() }]);
        assert!(app.messages().is_empty(), "no local echo");
    }

    #[test]
    fn blank_message_is_ignored() {
        let mut app = connected_app();

        assert!(app.send_message("   ").is_empty());
    }

    #[test]
    fn send_refused_when_not_connected() {
        let mut app = App::new("alice", "127.0.0.1", "12345");
        let actions = app.send_message("hello");

        assert_eq!(actions, [AppAction::Render]);
        assert_eq!(app.status_message(), Some("Cannot send while disconnected"));
    }

    #[test]
    fn api_disconnect() {
        let mut app = connected_app();
        assert_eq!(app.disconnect(), [AppAction::Disconnect, AppAction::Render]);

        let mut idle = App::new("alice", "127.0.0.1", "12345");
        assert_eq!(idle.disconnect(), [AppAction::Render]);
    }

    #[test]
    fn esc_quits() {
        let mut app = connected_app();

        assert_eq!(app.handle(AppEvent::Key(KeyInput::Esc)), [AppAction::Quit]);
        assert!(app.handle(AppEvent::Key(KeyInput::Char('x'))).is_empty());
    }

    #[test]
    fn inbound_events_update_log_and_roster() {
        let mut app = connected_app();

        app.handle(AppEvent::Inbound(chat("bob: hi")));
        app.handle(AppEvent::Inbound(Event::Presence(PresenceSnapshot {
            users: vec!["alice".into(), "bob".into()],
        })));

        assert_eq!(app.messages().len(), 1);
        assert_eq!(app.messages()[0].text, "bob: hi");
        assert!(app.presence().contains("bob"));
    }

    #[test]
    fn terminal_state_clears_roster_and_keeps_log() {
        let mut app = connected_app();
        app.handle(AppEvent::Inbound(chat("one")));
        app.handle(AppEvent::Inbound(Event::Presence(PresenceSnapshot {
            users: vec!["alice".into()],
        })));

        let actions = app.handle(AppEvent::StateChanged(ConnectionState::Failed));

        assert_eq!(actions, [AppAction::Render]);
        assert!(app.presence().is_empty());
        assert_eq!(app.messages().len(), 1);
        assert_eq!(app.peer_addr(), None);
    }

    #[test]
    fn unchanged_state_does_not_render() {
        let mut app = connected_app();

        assert!(app.handle(AppEvent::StateChanged(ConnectionState::Connected)).is_empty());
    }

    #[test]
    fn connect_failure_is_logged_as_system_notice() {
        let mut app = App::new("alice", "127.0.0.1", "12345");
        app.connect();

        app.handle(AppEvent::ConnectFailed { message: "refused".into() });

        assert_eq!(app.connection_state(), ConnectionState::Failed);
        let last = app.messages().back().unwrap();
        assert!(last.system);
        assert_eq!(last.text, "Could not connect: refused");

        // Failed is terminal, so a new attempt is allowed.
        assert_eq!(app.connect(), [AppAction::Connect, AppAction::Render]);
    }

    #[test]
    fn send_failure_is_logged() {
        let mut app = connected_app();

        app.handle(AppEvent::SendFailed { message: "broken pipe".into() });

        assert!(app.messages().back().is_some_and(|m| m.system && m.text.contains("broken pipe")));
    }

    #[test]
    fn resize_tracks_dimensions() {
        let mut app = connected_app();
        app.handle(AppEvent::Resize(120, 40));

        assert_eq!(app.terminal_size(), (120, 40));
    }
}
