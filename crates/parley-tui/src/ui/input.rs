//! Input line
//!
//! A one-row editor that scrolls horizontally: when the draft is wider than
//! the box, the window slides so the cursor stays on screen. The prompt
//! turns into `<` while text is hidden to the left. The draft is dimmed
//! while sending is refused.

use parley_app::App;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::InputState;

const PROMPT: &str = "> ";
const SCROLLED_PROMPT: &str = "< ";
/// Left border plus prompt.
const TEXT_START: u16 = 3;
/// Right border.
const TEXT_END_PADDING: u16 = 1;

/// Render the input line.
pub fn render(frame: &mut Frame, app: &App, input: &InputState, area: Rect) {
    let width = usize::from(area.width.saturating_sub(TEXT_START + TEXT_END_PADDING));
    let offset = scroll_offset(input.cursor(), width);
    let visible: String = input.buffer().chars().skip(offset).take(width).collect();

    let text_style = if app.connection_state().can_send() {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let prompt = if offset > 0 { SCROLLED_PROMPT } else { PROMPT };

    let line = Line::from(vec![
        Span::styled(prompt, Style::default().fg(Color::Cyan)),
        Span::styled(visible, text_style),
    ]);
    let block = Block::default().borders(Borders::ALL).title(" Message ");
    frame.render_widget(Paragraph::new(line).block(block), area);

    if area.height < 3 {
        return;
    }
    let column = u16::try_from(input.cursor() - offset).unwrap_or(u16::MAX);
    frame.set_cursor_position((
        area.x.saturating_add(TEXT_START).saturating_add(column),
        area.y.saturating_add(1),
    ));
}

/// Index of the first character shown so that `cursor` lands inside a
/// window `width` columns wide. The cursor may sit one past the last
/// character, so it needs a column of its own.
fn scroll_offset(cursor: usize, width: usize) -> usize {
    cursor.saturating_sub(width.saturating_sub(1))
}
