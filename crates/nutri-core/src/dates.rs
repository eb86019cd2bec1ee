// ABOUTME: Timezone-aware calendar helpers for user-local day identifiers
// ABOUTME: Builds and parses "{YYYY-MM-DD}@{IANA-timezone}" day ids without UTC-shift arithmetic
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Calendar helpers.
//!
//! Every user-facing day is a calendar date in the user's own timezone. Dates
//! are obtained by converting the instant into the zone with `chrono-tz`, so a
//! user in `America/Mexico_City` at 23:30 local time stays on the local date
//! even though UTC has already moved to the next day.

use chrono::{DateTime, Datelike, Days, NaiveDate, SecondsFormat, Utc, Weekday};
use chrono_tz::Tz;

use crate::constants::plan::FALLBACK_TIMEZONE;

/// Separator between the date and the timezone in a day id
pub const DAY_ID_SEPARATOR: char = '@';

/// Parse an IANA timezone name
#[must_use]
pub fn parse_timezone(name: &str) -> Option<Tz> {
    name.trim().parse::<Tz>().ok()
}

/// Resolve a timezone name, falling back to UTC when it is not a known zone
#[must_use]
pub fn resolve_timezone(name: &str) -> Tz {
    parse_timezone(name).unwrap_or_else(|| {
        tracing::warn!(timezone = %name, fallback = FALLBACK_TIMEZONE, "Unknown timezone");
        Tz::UTC
    })
}

/// Calendar date of `now` in the given timezone
#[must_use]
pub fn local_date(now: DateTime<Utc>, timezone: &str) -> NaiveDate {
    now.with_timezone(&resolve_timezone(timezone)).date_naive()
}

/// Calendar date of `now` in the given timezone formatted as `YYYY-MM-DD`
#[must_use]
pub fn date_iso_in_timezone(now: DateTime<Utc>, timezone: &str) -> String {
    format_date(local_date(now, timezone))
}

/// Build the day id for `now` in the given timezone
#[must_use]
pub fn build_day_id(now: DateTime<Utc>, timezone: &str) -> String {
    let tz = resolve_timezone(timezone);
    day_id_for_date(now.with_timezone(&tz).date_naive(), tz.name())
}

/// Build the day id for an explicit calendar date
#[must_use]
pub fn day_id_for_date(date: NaiveDate, timezone: &str) -> String {
    format!("{}{DAY_ID_SEPARATOR}{timezone}", format_date(date))
}

/// Split a day id into its calendar date and timezone name
#[must_use]
pub fn parse_day_id(day_id: &str) -> Option<(NaiveDate, &str)> {
    let (date, timezone) = day_id.split_once(DAY_ID_SEPARATOR)?;
    let date = parse_date_iso(date)?;
    if timezone.is_empty() {
        return None;
    }
    Some((date, timezone))
}

/// Parse a `YYYY-MM-DD` date
#[must_use]
pub fn parse_date_iso(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

/// Format a date as `YYYY-MM-DD`
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Date `days` calendar days before `date`
#[must_use]
pub fn days_before(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_sub_days(Days::new(days)).unwrap_or(date)
}

/// Most recent strictly-past date falling on `weekday`
///
/// When `date` itself is that weekday the result is one week earlier.
#[must_use]
pub fn previous_weekday(date: NaiveDate, weekday: Weekday) -> NaiveDate {
    let today = date.weekday().num_days_from_monday();
    let target = weekday.num_days_from_monday();
    let back = match (today + 7 - target) % 7 {
        0 => 7,
        n => n,
    };
    days_before(date, u64::from(back))
}

/// Format an instant as an RFC 3339 timestamp with millisecond precision
#[must_use]
pub fn to_iso(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parse an RFC 3339 timestamp
#[must_use]
pub fn parse_iso(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_day_id_uses_local_calendar_date() {
        // 05:30 UTC on the 15th is still the 14th in Mexico City (UTC-6)
        let now = Utc.with_ymd_and_hms(2025, 3, 15, 5, 30, 0).unwrap();
        assert_eq!(
            build_day_id(now, "America/Mexico_City"),
            "2025-03-14@America/Mexico_City"
        );
        assert_eq!(build_day_id(now, "Europe/Madrid"), "2025-03-15@Europe/Madrid");
    }

    #[test]
    fn test_day_id_round_trip_matches_date_iso() {
        let now = Utc.with_ymd_and_hms(2025, 12, 31, 23, 59, 0).unwrap();
        for tz in ["UTC", "Asia/Tokyo", "America/Los_Angeles", "Not/AZone"] {
            let day_id = build_day_id(now, tz);
            let (date, _) = day_id.split_once('@').unwrap();
            assert_eq!(date, date_iso_in_timezone(now, tz));
        }
    }

    #[test]
    fn test_unknown_timezone_falls_back_to_utc() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        assert_eq!(build_day_id(now, "Mars/Olympus"), "2025-06-01@UTC");
    }

    #[test]
    fn test_parse_day_id() {
        let (date, tz) = parse_day_id("2025-06-01@Europe/Madrid").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
        assert_eq!(tz, "Europe/Madrid");
        assert!(parse_day_id("2025-06-01").is_none());
        assert!(parse_day_id("junk@UTC").is_none());
    }

    #[test]
    fn test_previous_weekday_is_strictly_past() {
        // 2025-10-13 is a Monday
        let monday = NaiveDate::from_ymd_opt(2025, 10, 13).unwrap();
        assert_eq!(
            previous_weekday(monday, Weekday::Mon),
            NaiveDate::from_ymd_opt(2025, 10, 6).unwrap()
        );
        assert_eq!(
            previous_weekday(monday, Weekday::Sat),
            NaiveDate::from_ymd_opt(2025, 10, 11).unwrap()
        );
    }
}
