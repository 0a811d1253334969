//! UI rendering
//!
//! Rendering functions that convert App state into terminal output using
//! ratatui widgets. All functions are pure (no I/O).

mod chat;
mod input;
mod status;
mod users;

use parley_app::App;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
};

use crate::InputState;

/// Render the entire UI.
pub fn render(frame: &mut Frame, app: &App, input: &InputState) {
    const MAIN_AREA_MIN_HEIGHT: u16 = 3;
    const INPUT_HEIGHT: u16 = 3;
    const STATUS_HEIGHT: u16 = 1;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(MAIN_AREA_MIN_HEIGHT),
            Constraint::Length(INPUT_HEIGHT),
            Constraint::Length(STATUS_HEIGHT),
        ])
        .split(frame.area());

    let [main_area, input_area, status_area] = chunks.as_ref() else {
        return;
    };

    render_main_area(frame, app, *main_area);
    input::render(frame, app, input, *input_area);
    status::render(frame, app, *status_area);
}

/// Render the main area (chat + users sidebar).
fn render_main_area(frame: &mut Frame, app: &App, area: Rect) {
    const CHAT_AREA_MIN_WIDTH: u16 = 20;
    const USERS_SIDEBAR_WIDTH: u16 = 22;

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(CHAT_AREA_MIN_WIDTH), Constraint::Length(USERS_SIDEBAR_WIDTH)])
        .split(area);

    let [chat_area, users_area] = chunks.as_ref() else {
        return;
    };

    chat::render(frame, app, *chat_area);
    users::render(frame, app, *users_area);
}

#[cfg(test)]
mod tests {
    use chrono::{Local, TimeZone};
    use parley_app::{AppEvent, KeyInput};
    use parley_client::{ChatMessage, Event, PresenceSnapshot};
    use ratatui::{Terminal, backend::TestBackend};

    use super::*;

    const WIDTH: u16 = 80;
    const HEIGHT: u16 = 16;

    fn draw(app: &App, input: &InputState) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(WIDTH, HEIGHT)).unwrap();
        terminal.draw(|frame| render(frame, app, input)).unwrap();

        let buffer = terminal.backend().buffer();
        (0..HEIGHT)
            .map(|y| (0..WIDTH).map(|x| buffer[(x, y)].symbol()).collect::<String>())
            .collect()
    }

    fn screen_contains(screen: &[String], needle: &str) -> bool {
        screen.iter().any(|line| line.contains(needle))
    }

    fn message(text: &str, sender_is_self: bool, system: bool) -> Event {
        let received_at = Local.with_ymd_and_hms(2024, 5, 1, 9, 7, 0).unwrap();
        Event::Chat(ChatMessage { sender_is_self, system, text: text.into(), received_at })
    }

    fn connected_app() -> App {
        let mut app = App::new("alice", "127.0.0.1", "12345");
        app.handle(AppEvent::Connected { peer_addr: "127.0.0.1:12345".into() });
        app
    }

    #[test]
    fn renders_messages_by_origin() {
        let mut app = connected_app();
        app.handle(AppEvent::Inbound(message("hello", true, false)));
        app.handle(AppEvent::Inbound(message("bob: hey", false, false)));
        app.handle(AppEvent::Inbound(message("connection closed by server", false, true)));

        let screen = draw(&app, &InputState::new());

        assert!(screen_contains(&screen, "[09:07] You: hello"));
        assert!(screen_contains(&screen, "[09:07] bob: hey"));
        assert!(screen_contains(&screen, "connection closed by server"));
        assert!(!screen_contains(&screen, "[09:07] connection closed"));
    }

    #[test]
    fn renders_roster_with_self_marker() {
        let mut app = connected_app();
        app.handle(AppEvent::Inbound(Event::Presence(PresenceSnapshot {
            users: vec!["alice".into(), "bob".into()],
        })));

        let screen = draw(&app, &InputState::new());

        assert!(screen_contains(&screen, "Online (2)"));
        assert!(screen_contains(&screen, "alice (you)"));
        assert!(screen_contains(&screen, "bob"));
        assert!(!screen_contains(&screen, "bob (you)"));
    }

    #[test]
    fn renders_status_and_input() {
        let mut app = connected_app();
        let mut input = InputState::new();
        for c in "draft".chars() {
            input.handle_key(KeyInput::Char(c), &mut app);
        }

        let screen = draw(&app, &input);

        assert!(screen_contains(&screen, "> draft"));
        let status = &screen[usize::from(HEIGHT) - 1];
        assert!(status.contains("Connected"), "{status}");
        assert!(status.contains("alice@127.0.0.1:12345"), "{status}");
    }

    #[test]
    fn long_draft_scrolls_to_keep_cursor_visible() {
        let mut app = connected_app();
        let mut input = InputState::new();
        let draft = format!("start{}end", "x".repeat(112));
        for c in draft.chars() {
            input.handle_key(KeyInput::Char(c), &mut app);
        }

        let mut terminal = Terminal::new(TestBackend::new(WIDTH, HEIGHT)).unwrap();
        terminal.draw(|frame| render(frame, &app, &input)).unwrap();
        let cursor = terminal.get_cursor_position().unwrap();

        let input_row: String = {
            let buffer = terminal.backend().buffer();
            (0..WIDTH).map(|x| buffer[(x, HEIGHT - 3)].symbol()).collect()
        };
        assert!(input_row.contains("< "), "{input_row}");
        assert!(input_row.contains("xxend"), "{input_row}");
        assert!(!input_row.contains("start"), "{input_row}");

        // Cursor sits after the last character, inside the right border.
        assert_eq!(cursor.y, HEIGHT - 3);
        assert_eq!(cursor.x, WIDTH - 2);
    }

    #[test]
    fn newest_messages_stay_visible() {
        let mut app = connected_app();
        for i in 0..40 {
            app.handle(AppEvent::Inbound(message(&format!("line {i}"), false, false)));
        }

        let screen = draw(&app, &InputState::new());

        assert!(screen_contains(&screen, "line 39"));
        assert!(!screen_contains(&screen, "line 0 "));
    }
}
