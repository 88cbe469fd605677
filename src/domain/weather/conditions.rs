use crate::cli::IconMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherCondition {
    Clear,
    Cloudy,
    Foggy,
    Drizzle,
    Rain,
    Snow,
    RainShower,
    SnowShower,
    Thunderstorm,
    Unknown,
}

/// WMO weather code buckets, inclusive upper bounds in ascending order.
#[must_use]
pub fn classify(code: i32) -> WeatherCondition {
    match code {
        0 => WeatherCondition::Clear,
        1..=3 => WeatherCondition::Cloudy,
        4..=49 => WeatherCondition::Foggy,
        50..=59 => WeatherCondition::Drizzle,
        60..=69 => WeatherCondition::Rain,
        70..=79 => WeatherCondition::Snow,
        80..=84 => WeatherCondition::RainShower,
        85..=86 => WeatherCondition::SnowShower,
        87..=99 => WeatherCondition::Thunderstorm,
        _ => WeatherCondition::Unknown,
    }
}

impl WeatherCondition {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Clear => "Clear",
            Self::Cloudy => "Cloudy",
            Self::Foggy => "Foggy",
            Self::Drizzle => "Drizzle",
            Self::Rain => "Rain",
            Self::Snow => "Snow",
            Self::RainShower => "Rain Shower",
            Self::SnowShower => "Snow Shower",
            Self::Thunderstorm => "Thunderstorm",
            Self::Unknown => "Unknown",
        }
    }

    #[must_use]
    pub fn icon(self, mode: IconMode) -> &'static str {
        let (ascii, emoji) = icon_tokens(self);
        match mode {
            IconMode::Ascii => ascii,
            IconMode::Emoji => emoji,
        }
    }
}

#[must_use]
pub fn weather_description(code: i32) -> &'static str {
    classify(code).label()
}

#[must_use]
pub fn weather_icon(code: i32, mode: IconMode) -> &'static str {
    classify(code).icon(mode)
}

fn icon_tokens(condition: WeatherCondition) -> (&'static str, &'static str) {
    match condition {
        WeatherCondition::Clear => ("SUN", "☀️"),
        WeatherCondition::Cloudy => ("CLD", "⛅"),
        WeatherCondition::Foggy => ("FOG", "🌫️"),
        WeatherCondition::Drizzle | WeatherCondition::RainShower => ("SHW", "🌦️"),
        WeatherCondition::Rain => ("RAN", "🌧️"),
        WeatherCondition::Snow | WeatherCondition::SnowShower => ("SNW", "❄️"),
        WeatherCondition::Thunderstorm => ("THN", "⛈️"),
        WeatherCondition::Unknown => ("---", "❓"),
    }
}
