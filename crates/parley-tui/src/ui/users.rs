//! Online-users sidebar

use parley_app::App;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};

const SELF_MARKER: &str = " (you)";

/// Render the roster in wire order, marking the local nickname.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let presence = app.presence();

    let items: Vec<ListItem> = presence
        .users()
        .iter()
        .map(|name| {
            if name == app.nickname() {
                ListItem::new(Line::from(vec![
                    Span::styled(
                        name.clone(),
                        Style::default().fg(Color::LightGreen).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(SELF_MARKER, Style::default().fg(Color::DarkGray)),
                ]))
            } else {
                ListItem::new(Line::from(Span::styled(
                    name.clone(),
                    Style::default().fg(Color::LightGreen),
                )))
            }
        })
        .collect();

    let title = format!(" Online ({}) ", presence.len());
    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(title));

    frame.render_widget(list, area);
}
