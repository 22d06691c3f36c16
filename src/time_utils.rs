// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time parameters.

use chrono::{DateTime, Datelike, Duration, NaiveDate, SecondsFormat, TimeZone, Utc};

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Parse a query parameter given either as an RFC3339 timestamp or a plain
/// `YYYY-MM-DD` date.
///
/// With `exclusive_end` the result is the first instant after the value:
/// the start of the next day for a plain date, one nanosecond later for a
/// timestamp. Comparing with `<` then covers the whole end day, including
/// its fractional last second.
pub fn parse_date_param(raw: &str, exclusive_end: bool) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        let dt = dt.with_timezone(&Utc);
        return if exclusive_end {
            dt.checked_add_signed(Duration::nanoseconds(1))
        } else {
            Some(dt)
        };
    }
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()?;
    let date = if exclusive_end { date.succ_opt()? } else { date };
    Some(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?))
}

/// First instant of the given month and of the month after it.
pub fn month_bounds(year: i32, month: u32) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let start = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some((
        Utc.from_utc_datetime(&start.and_hms_opt(0, 0, 0)?),
        Utc.from_utc_datetime(&next.and_hms_opt(0, 0, 0)?),
    ))
}

/// Year and month of `now`.
pub fn current_month(now: DateTime<Utc>) -> (i32, u32) {
    (now.year(), now.month())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_param_forms() {
        let from = parse_date_param("2026-02-03", false).unwrap();
        assert_eq!(format_utc_rfc3339(from), "2026-02-03T00:00:00Z");

        let until = parse_date_param("2026-02-03", true).unwrap();
        assert_eq!(format_utc_rfc3339(until), "2026-02-04T00:00:00Z");

        let year_end = parse_date_param("2026-12-31", true).unwrap();
        assert_eq!(format_utc_rfc3339(year_end), "2027-01-01T00:00:00Z");

        let instant = parse_date_param("2026-02-03T23:59:59Z", true).unwrap();
        assert_eq!(
            instant.to_rfc3339_opts(SecondsFormat::Nanos, true),
            "2026-02-03T23:59:59.000000001Z"
        );

        let ts = parse_date_param("2026-02-03T10:30:00+02:00", false).unwrap();
        assert_eq!(format_utc_rfc3339(ts), "2026-02-03T08:30:00Z");

        assert!(parse_date_param("yesterday", false).is_none());
        assert!(parse_date_param("2026-02-30", false).is_none());
    }

    #[test]
    fn test_month_bounds_wraps_year() {
        let (start, end) = month_bounds(2026, 12).unwrap();
        assert_eq!(format_utc_rfc3339(start), "2026-12-01T00:00:00Z");
        assert_eq!(format_utc_rfc3339(end), "2027-01-01T00:00:00Z");

        assert!(month_bounds(2026, 13).is_none());
    }
}
