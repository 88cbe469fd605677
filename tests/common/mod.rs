#![allow(dead_code)]

use std::time::Duration;

use tokio::sync::mpsc;
use weather_clock::{
    app::{config::ConfigStore, events::AppEvent, state::AppState},
    cli::Cli,
    data::forecast::ForecastClient,
};

pub const SCENARIO_A: &str = r#"{"hourly":{"time":["2024-01-01T10:00","2024-01-01T11:00"],"temperature_2m":[5.0,6.0],"weathercode":[0,61]}}"#;

pub fn cli_for(server_uri: &str) -> Cli {
    Cli {
        latitude: None,
        longitude: None,
        forecast_url: Some(forecast_url(server_uri)),
        config_dir: None,
        ascii_icons: true,
        one_shot: false,
    }
}

pub fn forecast_url(server_uri: &str) -> String {
    format!("{server_uri}/v1/forecast")
}

pub fn state_for(server_uri: &str, dir: &tempfile::TempDir) -> AppState {
    AppState::with_parts(
        &cli_for(server_uri),
        ConfigStore::at(dir.path().join("config.json")),
        ForecastClient::with_base_url(forecast_url(server_uri)),
    )
}

/// Feeds loop events back into the state until the in-flight request settles.
pub async fn settle_fetch(
    state: &mut AppState,
    tx: &mpsc::Sender<AppEvent>,
    rx: &mut mpsc::Receiver<AppEvent>,
) {
    while state.has_pending_request() {
        let event = tokio::time::timeout(Duration::from_secs(5), rx.recv())
            .await
            .expect("fetch completed in time")
            .expect("channel open");
        state.handle_event(event, tx).await.expect("handle event");
    }
}
