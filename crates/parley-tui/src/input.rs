//! Input state and key handling for the TUI.
//!
//! This module owns the editable input line (buffer, cursor) and handles
//! character-level key events. Command parsing happens here on Enter.

use parley_app::{App, AppAction, AppEvent, KeyInput};

use crate::commands::{self, Command};

/// Editable input line.
///
/// The cursor counts characters, not bytes, so editing never splits a
/// multi-byte character.
#[derive(Debug, Default)]
pub struct InputState {
    buffer: String,
    /// Cursor position in characters, `0..=char_count`.
    cursor: usize,
}

impl InputState {
    /// Create a new empty input state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current text in the input buffer.
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Cursor position in characters.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Handle a key input event.
    ///
    /// Editing keys only change the buffer; Enter turns the line into App
    /// intents and Esc is forwarded to the App.
    pub fn handle_key(&mut self, key: KeyInput, app: &mut App) -> Vec<AppAction> {
        match key {
            KeyInput::Char(c) => {
                let at = self.byte_index(self.cursor);
                self.buffer.insert(at, c);
                self.cursor += 1;
            },
            KeyInput::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    let at = self.byte_index(self.cursor);
                    self.buffer.remove(at);
                }
            },
            KeyInput::Delete => {
                if self.cursor < self.char_count() {
                    let at = self.byte_index(self.cursor);
                    self.buffer.remove(at);
                }
            },
            KeyInput::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyInput::Right => self.cursor = (self.cursor + 1).min(self.char_count()),
            KeyInput::Home => self.cursor = 0,
            KeyInput::End => self.cursor = self.char_count(),
            KeyInput::Enter => return self.handle_enter(app),
            KeyInput::Esc => return app.handle(AppEvent::Key(key)),
        }
        vec![AppAction::Render]
    }

    /// Handle Enter: parse the line and call the App API.
    fn handle_enter(&mut self, app: &mut App) -> Vec<AppAction> {
        let text = std::mem::take(&mut self.buffer);
        self.cursor = 0;

        if text.trim().is_empty() {
            return vec![AppAction::Render];
        }

        let mut actions = match commands::parse(&text) {
            Command::Quit => return app.quit(),
            Command::Reconnect => app.reconnect(),
            Command::Disconnect => app.disconnect(),
            Command::Message { text } => app.send_message(&text),
            Command::Unknown { input } => {
                app.set_status(format!("Unknown command: {input}"));
                vec![]
            },
        };
        actions.push(AppAction::Render);
        actions
    }

    fn char_count(&self) -> usize {
        self.buffer.chars().count()
    }

    /// Byte offset of the `chars`-th character.
    fn byte_index(&self, chars: usize) -> usize {
        self.buffer.char_indices().nth(chars).map_or(self.buffer.len(), |(i, _)| i)
    }
}
