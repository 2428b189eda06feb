use std::time::Duration;

use anyhow::{bail, Result};
use chrono::{DateTime, Utc};

/// Suffix to nanoseconds multiplier (order matters: longer suffixes first)
const UNITS: &[(&str, f64)] = &[
    ("ns", 1.0),
    ("µs", 1_000.0),
    ("us", 1_000.0),
    ("ms", 1_000_000.0),
    ("s", 1_000_000_000.0),
    ("m", 60_000_000_000.0),
    ("h", 3_600_000_000_000.0),
];

/// Parse duration strings like "800ms", "5s", "1.5m", "2h"
pub fn parse_duration(s: &str) -> Result<Duration> {
    let s = s.trim();

    for (suffix, multiplier) in UNITS {
        if let Some(val_str) = s.strip_suffix(suffix) {
            let val: f64 = val_str.parse()?;
            if !val.is_finite() || val < 0.0 {
                bail!("Invalid duration: {}", s);
            }
            return Ok(Duration::from_nanos((val * multiplier) as u64));
        }
    }

    bail!("Unknown duration format: {}", s)
}

/// Whole minutes between `captured_at` and `now`, rounded to nearest, never negative.
pub fn elapsed_minutes(captured_at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let millis = (now - captured_at).num_milliseconds().max(0);
    (millis as f64 / 60_000.0).round() as i64
}

/// Render elapsed time as `"<N> mins ago"`.
pub fn elapsed_label(captured_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    format!("{} mins ago", elapsed_minutes(captured_at, now))
}

/// Format a date like "October 16, 2026"
pub fn format_date(date: DateTime<Utc>) -> String {
    date.format("%B %-d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 16, h, m, s).unwrap()
    }

    #[test]
    fn test_parse_milliseconds() {
        let d = parse_duration("800ms").unwrap();
        assert_eq!(d.as_millis(), 800);
    }

    #[test]
    fn test_parse_seconds_and_minutes() {
        assert_eq!(parse_duration("5s").unwrap().as_secs(), 5);
        assert_eq!(parse_duration("1.5m").unwrap().as_secs(), 90);
        assert_eq!(parse_duration("2h").unwrap().as_secs(), 7200);
    }

    #[test]
    fn test_parse_microseconds() {
        let d = parse_duration("16.958µs").unwrap();
        assert_eq!(d.as_nanos(), 16958);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_duration("soon").is_err());
        assert!(parse_duration("10").is_err());
        assert!(parse_duration("-5s").is_err());
    }

    #[test]
    fn test_elapsed_rounds_to_nearest_minute() {
        assert_eq!(elapsed_label(at(9, 0, 0), at(9, 0, 0)), "0 mins ago");
        assert_eq!(elapsed_label(at(9, 0, 0), at(9, 0, 29)), "0 mins ago");
        assert_eq!(elapsed_label(at(9, 0, 0), at(9, 0, 30)), "1 mins ago");
        assert_eq!(elapsed_label(at(9, 0, 0), at(9, 2, 40)), "3 mins ago");
    }

    #[test]
    fn test_elapsed_clamps_future_timestamps() {
        assert_eq!(elapsed_minutes(at(9, 10, 0), at(9, 0, 0)), 0);
        assert_eq!(elapsed_label(at(9, 10, 0), at(9, 0, 0)), "0 mins ago");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(at(10, 0, 0)), "October 16, 2026");
        let early = Utc.with_ymd_and_hms(2026, 3, 5, 0, 0, 0).unwrap();
        assert_eq!(format_date(early), "March 5, 2026");
    }
}
