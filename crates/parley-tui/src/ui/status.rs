//! Status bar
//!
//! Connection state, identity and the latest status message.

use parley_app::App;
use parley_client::ConnectionState;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

/// Render the status bar.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let connection_status = match app.connection_state() {
        ConnectionState::Connected => Span::styled(
            "Connected",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ),
        ConnectionState::Connecting => {
            Span::styled("Connecting...", Style::default().fg(Color::Yellow))
        },
        ConnectionState::Closing => Span::styled("Closing...", Style::default().fg(Color::Yellow)),
        ConnectionState::Disconnected => {
            Span::styled("Disconnected", Style::default().fg(Color::Red))
        },
        ConnectionState::Failed => Span::styled("Failed", Style::default().fg(Color::Red)),
    };

    let identity = format!(" | {}@{}", app.nickname(), app.endpoint());
    let message = app.status_message().map(|m| format!(" | {m}")).unwrap_or_default();

    let status_line = Line::from(vec![
        Span::raw(" "),
        connection_status,
        Span::raw(identity),
        Span::styled(message, Style::default().fg(Color::Gray)),
    ]);

    let paragraph =
        Paragraph::new(status_line).style(Style::default().bg(Color::DarkGray).fg(Color::White));

    frame.render_widget(paragraph, area);
}
