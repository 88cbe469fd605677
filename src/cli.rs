#![allow(clippy::missing_errors_doc)]

use std::path::PathBuf;

use clap::Parser;

use crate::domain::weather::Location;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IconMode {
    #[default]
    Emoji,
    Ascii,
}

#[derive(Debug, Parser, Clone)]
#[command(
    name = "weather-clock",
    version,
    about = "Kiosk clock with a rolling 6-hour forecast"
)]
pub struct Cli {
    /// Latitude override, persisted to the config file (requires LONGITUDE)
    #[arg(requires = "longitude", allow_negative_numbers = true)]
    pub latitude: Option<String>,

    /// Longitude override, persisted to the config file
    #[arg(allow_negative_numbers = true)]
    pub longitude: Option<String>,

    /// Forecast endpoint override
    #[arg(long)]
    pub forecast_url: Option<String>,

    /// Directory holding config.json and the log file
    #[arg(long)]
    pub config_dir: Option<PathBuf>,

    /// Force ASCII weather icons
    #[arg(long)]
    pub ascii_icons: bool,

    /// Print the current forecast window to stdout and exit (non-interactive)
    #[arg(long)]
    pub one_shot: bool,
}

impl Cli {
    #[must_use]
    pub fn location_override(&self) -> Option<Location> {
        match (&self.latitude, &self.longitude) {
            (Some(lat), Some(lon)) => Some(Location::new(lat.trim(), lon.trim())),
            _ => None,
        }
    }

    #[must_use]
    pub fn icon_mode(&self) -> IconMode {
        if self.ascii_icons {
            IconMode::Ascii
        } else {
            IconMode::Emoji
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        match (&self.latitude, &self.longitude) {
            (Some(_), None) | (None, Some(_)) => {
                anyhow::bail!("latitude and longitude must be provided together")
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::{Cli, IconMode};
    use crate::domain::weather::Location;

    #[test]
    fn parses_positional_coordinates() {
        let cli = Cli::parse_from(["weather-clock", "52.52", "13.41"]);
        assert_eq!(
            cli.location_override(),
            Some(Location::new("52.52", "13.41"))
        );
        assert!(cli.validate().is_ok());
    }

    #[test]
    fn accepts_negative_coordinates() {
        let cli = Cli::parse_from(["weather-clock", "-33.87", "-151.21"]);
        assert_eq!(
            cli.location_override(),
            Some(Location::new("-33.87", "-151.21"))
        );
    }

    #[test]
    fn rejects_latitude_without_longitude() {
        let err = Cli::try_parse_from(["weather-clock", "52.52"]).expect_err("expected conflict");
        assert!(err.to_string().contains("LONGITUDE") || err.to_string().contains("longitude"));
    }

    #[test]
    fn no_arguments_means_no_override() {
        let cli = Cli::parse_from(["weather-clock"]);
        assert!(cli.location_override().is_none());
        assert_eq!(cli.icon_mode(), IconMode::Emoji);
    }

    #[test]
    fn parses_flags() {
        let cli = Cli::parse_from([
            "weather-clock",
            "--ascii-icons",
            "--one-shot",
            "--forecast-url",
            "http://localhost:9000",
        ]);
        assert_eq!(cli.icon_mode(), IconMode::Ascii);
        assert!(cli.one_shot);
        assert_eq!(cli.forecast_url.as_deref(), Some("http://localhost:9000"));
    }
}
