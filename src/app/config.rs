use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Serialize;
use serde_json::Value;

use crate::domain::weather::{Location, TimezoneState};

pub const CONFIG_FILE_NAME: &str = "config.json";
pub const LOG_FILE_NAME: &str = "weather-clock.log";
const CONFIG_DIR_ENV: &str = "WEATHER_CLOCK_CONFIG_DIR";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("no config path available")]
    NoPath,
    #[error("reading config file failed: {0}")]
    Read(#[source] std::io::Error),
    #[error("config file is not valid: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("serializing config failed: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("writing config file failed: {0}")]
    Write(#[source] std::io::Error),
}

#[derive(Debug, Serialize)]
struct ConfigFile {
    location: LocationSection,
}

#[derive(Debug, Serialize)]
struct LocationSection {
    latitude: String,
    longitude: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    timezone: Option<String>,
    utc_offset_seconds: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredState {
    pub location: Location,
    pub timezone: TimezoneState,
}

/// Single persisted record of location and resolved timezone.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: Option<PathBuf>,
}

impl ConfigStore {
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    pub fn disabled() -> Self {
        Self { path: None }
    }

    /// `--config-dir`, then the environment override, then `~/.config/weather-clock`.
    pub fn discover(config_dir: Option<&Path>) -> Self {
        Self {
            path: config_dir_path(config_dir).map(|dir| dir.join(CONFIG_FILE_NAME)),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Never fails: anything unreadable degrades to `defaults`.
    pub fn load(&self, defaults: Location) -> StoredState {
        match self.try_load(defaults.clone()) {
            Ok(state) => state,
            Err(err) => {
                log::warn!("failed to load config: {err}");
                StoredState {
                    location: defaults,
                    timezone: TimezoneState::default(),
                }
            }
        }
    }

    pub fn try_load(&self, defaults: Location) -> Result<StoredState, ConfigError> {
        let path = self.path.as_deref().ok_or(ConfigError::NoPath)?;
        let content = fs::read_to_string(path).map_err(ConfigError::Read)?;
        let root: Value = serde_json::from_str(&content).map_err(ConfigError::Parse)?;
        let section = root.get("location");

        // Each key is read on its own so one bad value only loses that value.
        let location = Location::new(
            string_field(section, "latitude").unwrap_or(defaults.latitude),
            string_field(section, "longitude").unwrap_or(defaults.longitude),
        );
        let timezone = TimezoneState::new(
            string_field(section, "timezone"),
            offset_field(section).unwrap_or(0),
        );
        Ok(StoredState { location, timezone })
    }

    /// Overwrites the record; failures are logged and otherwise ignored.
    pub fn save(&self, location: &Location, timezone: &TimezoneState) {
        if self.path.is_none() {
            return;
        }
        if let Err(err) = self.try_save(location, timezone) {
            log::warn!("failed to save config: {err}");
        }
    }

    pub fn try_save(
        &self,
        location: &Location,
        timezone: &TimezoneState,
    ) -> Result<(), ConfigError> {
        let path = self.path.as_deref().ok_or(ConfigError::NoPath)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(ConfigError::Write)?;
        }
        let file = ConfigFile {
            location: LocationSection {
                latitude: location.latitude.clone(),
                longitude: location.longitude.clone(),
                timezone: timezone.iana_name.clone(),
                utc_offset_seconds: timezone.utc_offset_seconds,
            },
        };
        let payload = serde_json::to_string_pretty(&file).map_err(ConfigError::Serialize)?;
        fs::write(path, payload).map_err(ConfigError::Write)
    }
}

pub fn config_dir_path(config_dir: Option<&Path>) -> Option<PathBuf> {
    if let Some(dir) = config_dir {
        return Some(dir.to_path_buf());
    }
    if let Some(base) = std::env::var_os(CONFIG_DIR_ENV) {
        return Some(PathBuf::from(base));
    }

    let home = std::env::var_os("HOME")?;
    Some(PathBuf::from(home).join(".config").join("weather-clock"))
}

fn string_field(section: Option<&Value>, key: &str) -> Option<String> {
    let value = section?.get(key)?;
    match value.as_str() {
        Some(text) if !text.trim().is_empty() => Some(text.to_string()),
        Some(_) => None,
        None => {
            log::warn!("config field {key} is not a string, ignoring it");
            None
        }
    }
}

fn offset_field(section: Option<&Value>) -> Option<i32> {
    let value = section?.get("utc_offset_seconds")?;
    let seconds = value
        .as_i64()
        .or_else(|| value.as_f64().map(|float| float as i64))
        .and_then(|int| i32::try_from(int).ok());
    if seconds.is_none() {
        log::warn!("config field utc_offset_seconds is not a valid offset, ignoring it");
    }
    seconds
}
