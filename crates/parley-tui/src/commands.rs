//! Slash-command parsing for the input line.

/// A parsed line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `/quit`
    Quit,
    /// `/reconnect`: drop the session and connect again.
    Reconnect,
    /// `/disconnect`
    Disconnect,
    /// Anything not starting with `/`.
    Message {
        /// Line as typed.
        text: String,
    },
    /// A `/` line that names no known command.
    Unknown {
        /// Line as typed, trimmed.
        input: String,
    },
}

/// Parse one line of input.
///
/// Command names are matched on the first word; trailing words are ignored.
pub fn parse(input: &str) -> Command {
    let trimmed = input.trim();
    let Some(rest) = trimmed.strip_prefix('/') else {
        return Command::Message { text: input.to_string() };
    };

    match rest.split_whitespace().next() {
        Some("quit" | "q" | "exit") => Command::Quit,
        Some("reconnect") => Command::Reconnect,
        Some("disconnect") => Command::Disconnect,
        _ => Command::Unknown { input: trimmed.to_string() },
    }
}
