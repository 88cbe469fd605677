use chrono::{DateTime, Utc};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::{
    app::state::{AppState, LocationInput},
    domain::weather::ForecastStatus,
};

const KEY_HINTS: &str = "r refresh  l location  q quit";

pub fn render(frame: &mut Frame, area: Rect, state: &AppState, now: DateTime<Utc>) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let line = match &state.location_input {
        Some(prompt) => location_prompt_line(prompt),
        None => status_line(&state.status, now),
    };
    frame.render_widget(Paragraph::new(line).block(block), area);
}

pub fn status_line(status: &ForecastStatus, now: DateTime<Utc>) -> Line<'static> {
    match status.message(now) {
        Some(message) => {
            let color = if status.is_failure() {
                Color::LightRed
            } else {
                Color::Gray
            };
            Line::from(Span::styled(message, Style::default().fg(color)))
        }
        None => Line::from(Span::styled(KEY_HINTS, Style::default().fg(Color::DarkGray))),
    }
}

fn location_prompt_line(prompt: &LocationInput) -> Line<'static> {
    let mut spans = vec![
        Span::styled("Location (lat, lon): ", Style::default().fg(Color::Gray)),
        Span::raw(format!("{}_", prompt.buffer)),
    ];
    if let Some(error) = &prompt.error {
        spans.push(Span::styled(
            format!("  {error}"),
            Style::default().fg(Color::LightRed),
        ));
    }
    Line::from(spans)
}
