use chrono::{DateTime, Datelike, FixedOffset, Local, NaiveDateTime, Timelike, Utc};
use chrono_tz::Tz;

use super::weather::TimezoneState;

/// Which timezone source formats the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneChoice {
    Offset(FixedOffset),
    Named(Tz),
    HostLocal,
}

/// Non-zero offset beats a named zone, which beats the host zone. An offset chrono
/// cannot represent falls through to the next tier.
#[must_use]
pub fn choose_zone(utc_offset_seconds: i32, named: Option<Tz>) -> ZoneChoice {
    if utc_offset_seconds != 0
        && let Some(offset) = FixedOffset::east_opt(utc_offset_seconds)
    {
        return ZoneChoice::Offset(offset);
    }
    if let Some(tz) = named {
        return ZoneChoice::Named(tz);
    }
    ZoneChoice::HostLocal
}

/// Calendar position used to pick the forecast window. Ordering is chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LocalHour {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
}

impl LocalHour {
    #[must_use]
    pub fn of(time: &NaiveDateTime) -> Self {
        Self {
            year: time.year(),
            month: time.month(),
            day: time.day(),
            hour: time.hour(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalClock {
    pub time: String,
    pub date: String,
    pub wall: NaiveDateTime,
}

impl LocalClock {
    #[must_use]
    pub fn hour(&self) -> LocalHour {
        LocalHour::of(&self.wall)
    }
}

#[must_use]
pub fn local_wall_time(now_utc: DateTime<Utc>, choice: ZoneChoice) -> NaiveDateTime {
    match choice {
        ZoneChoice::Offset(offset) => now_utc.with_timezone(&offset).naive_local(),
        ZoneChoice::Named(tz) => now_utc.with_timezone(&tz).naive_local(),
        ZoneChoice::HostLocal => now_utc.with_timezone(&Local).naive_local(),
    }
}

#[must_use]
pub fn local_now(now_utc: DateTime<Utc>, tz: &TimezoneState) -> LocalClock {
    let choice = choose_zone(tz.utc_offset_seconds, tz.resolved_zone());
    format_clock(local_wall_time(now_utc, choice))
}

#[must_use]
pub fn format_clock(wall: NaiveDateTime) -> LocalClock {
    LocalClock {
        time: wall.format("%H:%M:%S").to_string(),
        date: wall.format("%A, %B %d, %Y").to_string(),
        wall,
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn instant() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 5)
            .single()
            .expect("valid instant")
    }

    #[test]
    fn offset_wins_over_named_zone() {
        let berlin = Some(chrono_tz::Europe::Berlin);
        let choice = choose_zone(-18_000, berlin);
        assert_eq!(
            choice,
            ZoneChoice::Offset(FixedOffset::west_opt(18_000).expect("offset"))
        );

        let clock = format_clock(local_wall_time(instant(), choice));
        assert_eq!(clock.time, "07:00:05");
        assert_eq!(clock.date, "Monday, January 01, 2024");
    }

    #[test]
    fn named_zone_used_when_offset_is_zero() {
        let choice = choose_zone(0, Some(chrono_tz::Asia::Tokyo));
        assert_eq!(choice, ZoneChoice::Named(chrono_tz::Asia::Tokyo));
        let clock = format_clock(local_wall_time(instant(), choice));
        assert_eq!(clock.time, "21:00:05");
    }

    #[test]
    fn host_zone_is_last_resort() {
        assert_eq!(choose_zone(0, None), ZoneChoice::HostLocal);
        // Offsets beyond a day cannot be represented and fall through.
        assert_eq!(choose_zone(90_000, None), ZoneChoice::HostLocal);
        assert_eq!(
            choose_zone(90_000, Some(chrono_tz::UTC)),
            ZoneChoice::Named(chrono_tz::UTC)
        );
    }

    #[test]
    fn local_now_reads_timezone_state() {
        let tz = TimezoneState::new(Some("Asia/Tokyo".to_string()), 19_800);
        let clock = local_now(instant(), &tz);
        assert_eq!(clock.time, "17:30:05");
        assert_eq!(
            clock.hour(),
            LocalHour {
                year: 2024,
                month: 1,
                day: 1,
                hour: 17
            }
        );
    }

    #[test]
    fn date_crosses_midnight_with_offset() {
        let late = Utc
            .with_ymd_and_hms(2024, 12, 31, 23, 30, 0)
            .single()
            .expect("valid instant");
        let tz = TimezoneState::new(None, 3600);
        let clock = local_now(late, &tz);
        assert_eq!(clock.time, "00:30:00");
        assert_eq!(clock.date, "Wednesday, January 01, 2025");
    }
}
