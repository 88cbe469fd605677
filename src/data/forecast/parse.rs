use serde_json::{Map, Value};

use crate::domain::weather::{HourlySample, TimezoneUpdate, parse_datetime};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error("Empty weather data received")]
    EmptyResponse,
    #[error("Parse error: {0}")]
    Malformed(String),
    #[error("API Error: {0} (Keys: {keys})", keys = .1.join(", "))]
    ApiError(String, Vec<String>),
    #[error("No hourly data. Keys: {keys}", keys = .0.join(", "))]
    IncompleteData(Vec<String>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForecastData {
    pub samples: Vec<HourlySample>,
    pub timezone: TimezoneUpdate,
}

pub fn parse_forecast(raw: &[u8]) -> Result<ForecastData, ParseError> {
    if raw.iter().all(u8::is_ascii_whitespace) {
        return Err(ParseError::EmptyResponse);
    }

    let root: Value =
        serde_json::from_slice(raw).map_err(|err| ParseError::Malformed(err.to_string()))?;
    let Value::Object(root) = root else {
        return Err(ParseError::Malformed(format!(
            "expected a JSON object, got {}",
            type_name(&root)
        )));
    };

    check_api_error(&root)?;

    let timezone = TimezoneUpdate {
        iana_name: root
            .get("timezone")
            .and_then(Value::as_str)
            .map(str::to_string),
        utc_offset_seconds: root.get("utc_offset_seconds").and_then(offset_seconds),
    };

    let hourly = root
        .get("hourly")
        .and_then(Value::as_object)
        .ok_or_else(|| ParseError::IncompleteData(keys_of(&root)))?;
    let (Some(times), Some(temperatures), Some(codes)) = (
        array_field(hourly, "time"),
        array_field(hourly, "temperature_2m"),
        array_field(hourly, "weathercode"),
    ) else {
        return Err(ParseError::IncompleteData(keys_of(hourly)));
    };

    Ok(ForecastData {
        samples: parse_samples(times, temperatures, codes),
        timezone,
    })
}

fn check_api_error(root: &Map<String, Value>) -> Result<(), ParseError> {
    let Some(error) = root.get("error") else {
        return Ok(());
    };
    if !is_truthy(error) {
        return Ok(());
    }

    let message = match (root.get("reason").and_then(Value::as_str), error) {
        (Some(reason), _) => reason.to_string(),
        (None, Value::String(text)) => text.clone(),
        (None, other) => format!("error field of type {}", type_name(other)),
    };
    Err(ParseError::ApiError(message, keys_of(root)))
}

fn parse_samples(times: &[Value], temperatures: &[Value], codes: &[Value]) -> Vec<HourlySample> {
    let mut out = Vec::with_capacity(times.len());
    for (idx, time) in times.iter().enumerate() {
        let Some(iso) = time.as_str().filter(|iso| iso.len() >= 16) else {
            continue;
        };
        let Some(parsed) = parse_datetime(iso) else {
            continue;
        };
        let (Some(temperature_c), Some(code)) = (
            temperatures.get(idx).and_then(Value::as_f64),
            codes.get(idx).and_then(Value::as_f64),
        ) else {
            continue;
        };

        out.push(HourlySample {
            iso_timestamp: iso.to_string(),
            time: parsed,
            temperature_c,
            // Float codes truncate toward zero; `as` saturates out-of-range values.
            weather_code: code as i32,
        });
    }
    out
}

fn offset_seconds(value: &Value) -> Option<i32> {
    if let Some(int) = value.as_i64() {
        return Some(i32::try_from(int).unwrap_or(if int < 0 { i32::MIN } else { i32::MAX }));
    }
    value.as_f64().map(|float| float as i32)
}

fn array_field<'a>(object: &'a Map<String, Value>, key: &str) -> Option<&'a [Value]> {
    object.get(key).and_then(Value::as_array).map(Vec::as_slice)
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn keys_of(object: &Map<String, Value>) -> Vec<String> {
    let mut keys = object.keys().cloned().collect::<Vec<_>>();
    keys.sort();
    keys
}
