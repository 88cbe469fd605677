use chrono::NaiveDateTime;
use chrono_tz::Tz;

use crate::cli::IconMode;

mod conditions;

pub use conditions::{WeatherCondition, classify, weather_description, weather_icon};

pub const DEFAULT_LATITUDE: &str = "43.640";
pub const DEFAULT_LONGITUDE: &str = "-79.565";
/// Longest coordinate string sent to the forecast service.
pub const MAX_COORDINATE_LEN: usize = 20;
pub const FORECAST_WINDOW_HOURS: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub latitude: String,
    pub longitude: String,
}

impl Default for Location {
    fn default() -> Self {
        Self::new(DEFAULT_LATITUDE, DEFAULT_LONGITUDE)
    }
}

impl Location {
    pub fn new(latitude: impl Into<String>, longitude: impl Into<String>) -> Self {
        Self {
            latitude: latitude.into(),
            longitude: longitude.into(),
        }
    }

    /// Coordinates safe to put on the wire. An empty or oversized field replaces the
    /// whole pair with the default coordinate.
    #[must_use]
    pub fn sanitized(&self) -> Self {
        let latitude = self.latitude.trim();
        let longitude = self.longitude.trim();
        if !coordinate_ok(latitude) || !coordinate_ok(longitude) {
            log::warn!(
                "latitude or longitude empty or too long ({} / {} chars), using defaults",
                latitude.len(),
                longitude.len()
            );
            return Self::default();
        }
        Self::new(latitude, longitude)
    }

    pub fn display_name(&self) -> String {
        format!("{}, {}", self.latitude, self.longitude)
    }
}

fn coordinate_ok(value: &str) -> bool {
    !value.is_empty() && value.len() <= MAX_COORDINATE_LEN
}

/// Last-known-good timezone information for the forecast location.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimezoneState {
    pub iana_name: Option<String>,
    pub utc_offset_seconds: i32,
    resolved: Option<Tz>,
}

impl TimezoneState {
    pub fn new(iana_name: Option<String>, utc_offset_seconds: i32) -> Self {
        let resolved = iana_name.as_deref().and_then(resolve_zone);
        Self {
            iana_name,
            utc_offset_seconds,
            resolved,
        }
    }

    pub fn resolved_zone(&self) -> Option<Tz> {
        self.resolved
    }

    pub fn is_empty(&self) -> bool {
        self.iana_name.is_none() && self.utc_offset_seconds == 0
    }

    /// Fields absent from `update` keep their previous value.
    pub fn apply(&mut self, update: TimezoneUpdate) {
        if let Some(name) = update.iana_name {
            self.resolved = resolve_zone(&name);
            self.iana_name = Some(name);
        }
        if let Some(offset) = update.utc_offset_seconds {
            self.utc_offset_seconds = offset;
        }
    }
}

/// Timezone metadata carried by one forecast response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimezoneUpdate {
    pub iana_name: Option<String>,
    pub utc_offset_seconds: Option<i32>,
}

impl TimezoneUpdate {
    pub fn is_empty(&self) -> bool {
        self.iana_name.is_none() && self.utc_offset_seconds.is_none()
    }
}

pub fn resolve_zone(name: &str) -> Option<Tz> {
    match name.parse::<Tz>() {
        Ok(tz) => Some(tz),
        Err(err) => {
            log::debug!("timezone {name:?} did not resolve: {err}");
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HourlySample {
    pub iso_timestamp: String,
    pub time: NaiveDateTime,
    pub temperature_c: f64,
    pub weather_code: i32,
}

impl HourlySample {
    pub fn hour_label(&self) -> String {
        self.iso_timestamp
            .get(11..13)
            .map_or_else(|| "N/A".to_string(), |hour| format!("{hour}:00"))
    }

    pub fn temperature_label(&self) -> String {
        format!("{:.1}°C", self.temperature_c)
    }

    pub fn description(&self) -> &'static str {
        weather_description(self.weather_code)
    }

    pub fn icon(&self, mode: IconMode) -> &'static str {
        weather_icon(self.weather_code, mode)
    }
}

/// Up to [`FORECAST_WINDOW_HOURS`] consecutive samples chosen for display.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ForecastWindow {
    samples: Vec<HourlySample>,
}

impl ForecastWindow {
    pub(crate) fn from_samples(samples: Vec<HourlySample>) -> Self {
        debug_assert!(samples.len() <= FORECAST_WINDOW_HOURS);
        Self { samples }
    }

    pub fn samples(&self) -> &[HourlySample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn descriptions(&self) -> Vec<&'static str> {
        self.samples.iter().map(HourlySample::description).collect()
    }
}

pub fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value.get(..16)?, "%Y-%m-%dT%H:%M").ok()
}

#[derive(Debug, Clone, PartialEq)]
pub enum ForecastStatus {
    Loading,
    Ready,
    Retrying {
        retry_at: chrono::DateTime<chrono::Utc>,
        delay_secs: u64,
        attempt: u32,
        max_attempts: u32,
    },
    RetriesExhausted,
    ParseFailed(crate::data::forecast::ParseError),
}

impl ForecastStatus {
    pub fn message(&self, now: chrono::DateTime<chrono::Utc>) -> Option<String> {
        match self {
            Self::Loading => Some("Fetching weather...".to_string()),
            Self::Ready => None,
            Self::Retrying {
                retry_at,
                delay_secs,
                attempt,
                max_attempts,
            } => {
                let ceiling = i64::try_from(*delay_secs).unwrap_or(i64::MAX);
                let remaining = (*retry_at - now).num_seconds().clamp(0, ceiling);
                Some(format!(
                    "Failed to fetch weather, retrying in {remaining} seconds (attempt {attempt}/{max_attempts})"
                ))
            }
            Self::RetriesExhausted => Some(
                "Failed to fetch weather, will retry at next scheduled update".to_string(),
            ),
            Self::ParseFailed(err) => Some(err.to_string()),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            Self::Retrying { .. } | Self::RetriesExhausted | Self::ParseFailed(_)
        )
    }
}
