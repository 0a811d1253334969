//! Application side-effects.
//!
//! [`AppAction`] values are instructions produced by the [`crate::App`]
//! state machine for the runtime to execute.

/// Actions produced by the App state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    /// Render the UI.
    Render,

    /// Quit the application.
    Quit,

    /// Open a session using the App's host, port and nickname.
    Connect,

    /// Close the current session, if any.
    Disconnect,

    /// Send one chat line.
    SendMessage {
        /// Trimmed, non-empty message text.
        text: String,
    },
}
