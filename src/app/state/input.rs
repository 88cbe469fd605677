use super::*;

/// Buffer behind the `l` location prompt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationInput {
    pub buffer: String,
    pub error: Option<String>,
}

impl LocationInput {
    pub fn push(&mut self, ch: char) {
        if is_coordinate_char(ch) && self.buffer.len() < 2 * MAX_COORDINATE_LEN + 2 {
            self.buffer.push(ch);
            self.error = None;
        }
    }

    pub fn backspace(&mut self) {
        self.buffer.pop();
        self.error = None;
    }
}

pub(crate) fn is_coordinate_char(ch: char) -> bool {
    ch.is_ascii_digit() || matches!(ch, '-' | '+' | '.' | ',' | ' ')
}

/// Accepts `lat,lon` or `lat lon`. Both parts must parse as numbers in range.
pub fn parse_location_input(raw: &str) -> Result<Location, String> {
    let mut parts = raw
        .split(|ch: char| ch == ',' || ch.is_whitespace())
        .filter(|part| !part.is_empty());
    let (Some(lat), Some(lon), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err("Enter latitude and longitude, e.g. 52.52, 13.41".to_string());
    };

    let lat_value: f64 = lat.parse().map_err(|_| format!("Invalid latitude: {lat}"))?;
    let lon_value: f64 = lon.parse().map_err(|_| format!("Invalid longitude: {lon}"))?;
    if !(-90.0..=90.0).contains(&lat_value) {
        return Err(format!("Latitude out of range: {lat}"));
    }
    if !(-180.0..=180.0).contains(&lon_value) {
        return Err(format!("Longitude out of range: {lon}"));
    }
    Ok(Location::new(lat, lon))
}

pub(super) fn command_char(key: KeyEvent) -> Option<char> {
    if key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SUPER)
    {
        return None;
    }
    if let KeyCode::Char(ch) = key.code {
        Some(ch.to_ascii_lowercase())
    } else {
        None
    }
}
