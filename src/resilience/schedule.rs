use chrono::{NaiveDateTime, Timelike};

pub const UPDATE_INTERVAL_SECONDS: u64 = 3600;

/// Seconds from `now` to the next :00 boundary, in `1..=3600`.
#[must_use]
pub fn seconds_until_next_hour(now: NaiveDateTime) -> u64 {
    let into_hour = u64::from(now.minute() * 60 + now.second());
    UPDATE_INTERVAL_SECONDS - into_hour
}
