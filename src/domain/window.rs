use super::{
    clock::LocalHour,
    weather::{FORECAST_WINDOW_HOURS, ForecastWindow, HourlySample},
};

/// Index of the first sample at or after the current local hour, or 0 when every
/// sample is in the past.
#[must_use]
pub fn start_index(samples: &[HourlySample], now: LocalHour) -> usize {
    samples
        .iter()
        .position(|sample| LocalHour::of(&sample.time) >= now)
        .unwrap_or(0)
}

#[must_use]
pub fn select_window(samples: &[HourlySample], now: LocalHour) -> ForecastWindow {
    let start = start_index(samples, now);
    ForecastWindow::from_samples(
        samples
            .iter()
            .skip(start)
            .take(FORECAST_WINDOW_HOURS)
            .cloned()
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::weather::parse_datetime;

    fn hours(start: &str, count: usize) -> Vec<HourlySample> {
        let base = parse_datetime(start).expect("valid fixture start");
        (0..count)
            .map(|idx| {
                let time = base + chrono::Duration::hours(i64::try_from(idx).unwrap_or(0));
                HourlySample {
                    iso_timestamp: time.format("%Y-%m-%dT%H:%M").to_string(),
                    time,
                    temperature_c: 10.0,
                    weather_code: 0,
                }
            })
            .collect()
    }

    fn at(year: i32, month: u32, day: u32, hour: u32) -> LocalHour {
        LocalHour {
            year,
            month,
            day,
            hour,
        }
    }

    #[test]
    fn window_starts_at_current_hour() {
        let samples = hours("2024-01-01T00:00", 48);
        let window = select_window(&samples, at(2024, 1, 1, 10));
        assert_eq!(window.len(), 6);
        assert_eq!(window.samples()[0].iso_timestamp, "2024-01-01T10:00");
        assert_eq!(window.samples()[5].iso_timestamp, "2024-01-01T15:00");
    }

    #[test]
    fn late_evening_spans_into_next_day() {
        let samples = hours("2024-01-31T00:00", 48);
        let window = select_window(&samples, at(2024, 1, 31, 22));
        let stamps = window
            .samples()
            .iter()
            .map(|s| s.iso_timestamp.as_str())
            .collect::<Vec<_>>();
        assert_eq!(
            stamps,
            vec![
                "2024-01-31T22:00",
                "2024-01-31T23:00",
                "2024-02-01T00:00",
                "2024-02-01T01:00",
                "2024-02-01T02:00",
                "2024-02-01T03:00",
            ]
        );
    }

    #[test]
    fn later_day_with_smaller_hour_still_counts_as_future() {
        let samples = hours("2024-01-02T01:00", 3);
        assert_eq!(start_index(&samples, at(2024, 1, 1, 23)), 0);
        let samples = hours("2023-12-31T20:00", 8);
        assert_eq!(start_index(&samples, at(2024, 1, 1, 0)), 4);
    }

    #[test]
    fn all_past_samples_fall_back_to_start() {
        let samples = hours("2024-01-01T00:00", 10);
        let window = select_window(&samples, at(2025, 6, 1, 12));
        assert_eq!(window.samples()[0].iso_timestamp, "2024-01-01T00:00");
        assert_eq!(window.len(), 6);
    }

    #[test]
    fn short_tail_returns_fewer_samples() {
        let samples = hours("2024-01-01T00:00", 24);
        let window = select_window(&samples, at(2024, 1, 1, 21));
        assert_eq!(window.len(), 3);
    }

    #[test]
    fn empty_input_gives_empty_window() {
        let window = select_window(&[], at(2024, 1, 1, 0));
        assert!(window.is_empty());
    }

    #[test]
    fn selection_is_repeatable() {
        let samples = hours("2024-03-10T00:00", 48);
        let now = at(2024, 3, 10, 17);
        assert_eq!(select_window(&samples, now), select_window(&samples, now));
    }
}
