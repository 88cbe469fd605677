use std::time::Duration;

use reqwest::Client;

use crate::domain::weather::Location;

pub mod parse;

pub use parse::{ForecastData, ParseError, parse_forecast};

const FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";
const HOURLY_FIELDS: &str = "temperature_2m,weathercode";
const FORECAST_DAYS: &str = "2";

/// Failures below the payload level. These are the only retryable errors.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("forecast request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("forecast response body was empty")]
    EmptyBody,
}

#[derive(Debug, Clone)]
pub struct ForecastClient {
    client: Client,
    base_url: String,
}

impl Default for ForecastClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ForecastClient {
    pub fn new() -> Self {
        Self::with_base_url(FORECAST_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_default();
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the raw body whatever the HTTP status, so structured API errors reach the
    /// parser. Only an empty body or a failed exchange is an error here.
    pub async fn fetch_raw(&self, location: &Location) -> Result<Vec<u8>, TransportError> {
        log::debug!(
            "fetching forecast from {} for {}",
            self.base_url,
            location.display_name()
        );
        let response = self
            .client
            .get(&self.base_url)
            .query(&query_params(location))
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;
        if body.iter().all(u8::is_ascii_whitespace) {
            log::warn!("forecast response ({status}) had an empty body");
            return Err(TransportError::EmptyBody);
        }
        if !status.is_success() {
            log::warn!("forecast service answered {status}");
        }
        Ok(body.to_vec())
    }
}

pub fn query_params(location: &Location) -> [(&'static str, String); 5] {
    [
        ("latitude", location.latitude.clone()),
        ("longitude", location.longitude.clone()),
        ("hourly", HOURLY_FIELDS.to_string()),
        ("forecast_days", FORECAST_DAYS.to_string()),
        ("timezone", "auto".to_string()),
    ]
}
