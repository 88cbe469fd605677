use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};

use crate::{
    app::state::AppState,
    domain::weather::{FORECAST_WINDOW_HOURS, ForecastWindow, WeatherCondition, classify},
};

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Next 6 hours")
        .border_style(Style::default().fg(Color::DarkGray));

    let Some(window) = state.window.as_ref().filter(|w| !w.is_empty()) else {
        let placeholder = Paragraph::new("No forecast yet")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(placeholder, area);
        return;
    };

    let table = Table::new(forecast_rows(window, state), column_widths(window))
        .block(block)
        .column_spacing(1);
    frame.render_widget(table, area);
}

fn column_widths(window: &ForecastWindow) -> Vec<Constraint> {
    let count = u32::try_from(window.len().min(FORECAST_WINDOW_HOURS)).unwrap_or(1);
    (0..count).map(|_| Constraint::Ratio(1, count)).collect()
}

fn forecast_rows(window: &ForecastWindow, state: &AppState) -> Vec<Row<'static>> {
    let samples = window.samples();
    let hours = Row::new(samples.iter().map(|s| {
        Cell::from(s.hour_label()).style(Style::default().add_modifier(Modifier::BOLD))
    }));
    let icons = Row::new(samples.iter().map(|s| {
        Cell::from(s.icon(state.icon_mode))
            .style(Style::default().fg(condition_color(classify(s.weather_code))))
    }));
    let temps = Row::new(
        samples
            .iter()
            .map(|s| Cell::from(s.temperature_label()).style(temp_style(s.temperature_c))),
    );
    let descriptions = Row::new(
        samples
            .iter()
            .map(|s| Cell::from(s.description()).style(Style::default().fg(Color::Gray))),
    );
    vec![hours, icons, temps, descriptions]
}

fn condition_color(condition: WeatherCondition) -> Color {
    match condition {
        WeatherCondition::Clear => Color::Yellow,
        WeatherCondition::Cloudy | WeatherCondition::Foggy => Color::Gray,
        WeatherCondition::Drizzle | WeatherCondition::Rain | WeatherCondition::RainShower => {
            Color::Blue
        }
        WeatherCondition::Snow | WeatherCondition::SnowShower => Color::White,
        WeatherCondition::Thunderstorm => Color::Magenta,
        WeatherCondition::Unknown => Color::DarkGray,
    }
}

fn temp_style(celsius: f64) -> Style {
    let color = if celsius <= 0.0 {
        Color::Cyan
    } else if celsius >= 25.0 {
        Color::LightRed
    } else {
        Color::White
    };
    Style::default().fg(color)
}
