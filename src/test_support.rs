use chrono::NaiveDateTime;

use crate::{
    app::{config::ConfigStore, state::AppState},
    cli::Cli,
    data::forecast::ForecastClient,
    domain::weather::HourlySample,
};

pub(crate) const UNREACHABLE_URL: &str = "http://127.0.0.1:1";

pub(crate) fn state_test_cli() -> Cli {
    Cli {
        latitude: None,
        longitude: None,
        forecast_url: Some(UNREACHABLE_URL.to_string()),
        config_dir: None,
        ascii_icons: false,
        one_shot: false,
    }
}

/// State that never touches disk and whose requests fail fast.
pub(crate) fn offline_state() -> AppState {
    AppState::with_parts(
        &state_test_cli(),
        ConfigStore::disabled(),
        ForecastClient::with_base_url(UNREACHABLE_URL),
    )
}

pub(crate) fn sample(timestamp: &str, temperature_c: f64, weather_code: i32) -> HourlySample {
    HourlySample {
        iso_timestamp: timestamp.to_string(),
        time: NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%dT%H:%M")
            .expect("valid time fixture"),
        temperature_c,
        weather_code,
    }
}

/// `count` consecutive hourly samples starting at `start`.
pub(crate) fn hourly_samples(start: &str, count: usize) -> Vec<HourlySample> {
    let base = NaiveDateTime::parse_from_str(start, "%Y-%m-%dT%H:%M").expect("valid time fixture");
    (0..count)
        .map(|idx| {
            let time = base + chrono::Duration::hours(i64::try_from(idx).unwrap_or(0));
            let stamp = time.format("%Y-%m-%dT%H:%M").to_string();
            let code = i32::try_from(idx * 10).unwrap_or(0);
            sample(&stamp, 10.0 + idx as f64, code)
        })
        .collect()
}

pub(crate) fn forecast_body(times: &[&str], temps: &[f64], codes: &[i32]) -> Vec<u8> {
    serde_json::json!({
        "timezone": "Europe/Berlin",
        "utc_offset_seconds": 3600,
        "hourly": {
            "time": times,
            "temperature_2m": temps,
            "weathercode": codes,
        }
    })
    .to_string()
    .into_bytes()
}
