//! Message log
//!
//! Own lines as `[HH:MM] You: text`, everyone else as `[HH:MM] text`,
//! system notices verbatim.

use parley_app::App;
use parley_client::ChatMessage;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};

const BORDER_SIZE: u16 = 2;
const TIME_FORMAT: &str = "%H:%M";

/// Render the message log, newest at the bottom.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(" Chat ");

    let items: Vec<ListItem> = if app.messages().is_empty() {
        vec![ListItem::new(Line::from(Span::styled(
            "No messages yet",
            Style::default().fg(Color::DarkGray),
        )))]
    } else {
        app.messages().iter().map(|msg| ListItem::new(message_line(msg))).collect()
    };

    let visible_height = usize::from(area.height.saturating_sub(BORDER_SIZE));
    let skip = items.len().saturating_sub(visible_height);
    let visible_items: Vec<_> = items.into_iter().skip(skip).collect();

    frame.render_widget(List::new(visible_items).block(block), area);
}

fn message_line(msg: &ChatMessage) -> Line<'static> {
    if msg.system {
        return Line::from(Span::styled(msg.text.clone(), Style::default().fg(Color::Yellow)));
    }

    let stamp = format!("[{}] ", msg.received_at.format(TIME_FORMAT));
    let stamp = Span::styled(stamp, Style::default().fg(Color::DarkGray));

    if msg.sender_is_self {
        Line::from(vec![
            stamp,
            Span::styled("You: ", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
            Span::styled(msg.text.clone(), Style::default().fg(Color::Cyan)),
        ])
    } else {
        Line::from(vec![stamp, Span::styled(msg.text.clone(), Style::default().fg(Color::Green))])
    }
}
