use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::app::state::AppState;

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", state.location.display_name()))
        .border_style(Style::default().fg(Color::DarkGray));

    // The first tick may not have landed yet.
    let lines = match &state.clock {
        Some(clock) => vec![
            Line::from(Span::styled(
                clock.time.clone(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                clock.date.clone(),
                Style::default().fg(Color::Gray),
            )),
        ],
        None => vec![Line::from("--:--:--")],
    };

    let clock = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(block);
    frame.render_widget(clock, area);
}
