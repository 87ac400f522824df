//! Parsers for time-valued HTTP field values.
//!
//! These are the small external collaborators of the decision engine: the
//! delta-seconds grammar used by `Age`, `max-age` and friends, and the strict
//! RFC 1123 timestamp format used by `Expires`.

use std::time::Duration;

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::error::ValueError;

/// Parses a delta-seconds value: a non-empty string of ASCII digits, no sign,
/// no decimal point.
///
/// RFC 9111 §1.2.2 requires a cache receiving a delta-seconds value greater
/// than the greatest integer it can represent to treat it as the greatest
/// value it can conveniently represent, so overflow saturates to [`u64::MAX`]
/// instead of failing.
pub fn parse_delta_seconds(s: &str) -> Result<u64, ValueError> {
    if s.is_empty() {
        return Err(ValueError::EmptyDeltaSeconds);
    }

    let mut seconds: u64 = 0;

    for c in s.bytes() {
        if !c.is_ascii_digit() {
            return Err(ValueError::InvalidDeltaSeconds);
        }

        seconds = seconds
            .checked_mul(10)
            .and_then(|d| d.checked_add(u64::from(c - b'0')))
            .unwrap_or(u64::MAX);
    }

    Ok(seconds)
}

/// Parses a duration in seconds, as used by the `Age` header and the
/// duration-valued Cache-Control directives.
pub fn parse_age(s: &str) -> Result<Duration, ValueError> {
    parse_delta_seconds(s).map(Duration::from_secs)
}

/// Parses a time and date from the HTTP `Expires` header.
///
/// Only the preferred IMF-fixdate form `Mon, 02 Jan 2006 15:04:05 GMT` is
/// accepted; a missing weekday, a missing zone or any timezone label other
/// than `GMT` is an error.
pub fn parse_expires(s: &str) -> Result<DateTime<Utc>, ValueError> {
    let parsed = NaiveDateTime::parse_from_str(s, "%a, %d %b %Y %H:%M:%S GMT")?;
    Ok(parsed.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn delta_seconds_basic() {
        assert_eq!(parse_delta_seconds("0"), Ok(0));
        assert_eq!(parse_delta_seconds("60"), Ok(60));
        assert_eq!(parse_delta_seconds("0060"), Ok(60));
    }

    #[test]
    fn delta_seconds_rejects_non_digits() {
        assert_eq!(
            parse_delta_seconds(""),
            Err(ValueError::EmptyDeltaSeconds)
        );
        assert_eq!(
            parse_delta_seconds("-1"),
            Err(ValueError::InvalidDeltaSeconds)
        );
        assert_eq!(
            parse_delta_seconds("+1"),
            Err(ValueError::InvalidDeltaSeconds)
        );
        assert_eq!(
            parse_delta_seconds("1.5"),
            Err(ValueError::InvalidDeltaSeconds)
        );
        assert_eq!(
            parse_delta_seconds("1s"),
            Err(ValueError::InvalidDeltaSeconds)
        );
    }

    #[test]
    fn delta_seconds_saturates_on_overflow() {
        // u64::MAX is 18446744073709551615; one digit more must saturate,
        // never wrap or error.
        assert_eq!(parse_delta_seconds("18446744073709551615"), Ok(u64::MAX));
        assert_eq!(parse_delta_seconds("18446744073709551616"), Ok(u64::MAX));
        assert_eq!(
            parse_delta_seconds("999999999999999999999999999999"),
            Ok(u64::MAX)
        );
    }

    #[test]
    fn age_is_delta_seconds() {
        assert_eq!(parse_age("90"), Ok(Duration::from_secs(90)));
        assert_eq!(parse_age("x"), Err(ValueError::InvalidDeltaSeconds));
    }

    #[test]
    fn expires_basic() {
        let expires = parse_expires("Mon, 02 Jan 2006 15:04:05 GMT").unwrap();
        assert_eq!(expires, Utc.with_ymd_and_hms(2006, 1, 2, 15, 4, 5).unwrap());
    }

    #[test]
    fn expires_rejects_deviations() {
        // Wrong timezone label.
        assert!(parse_expires("Mon, 02 Jan 2006 15:04:05 UTC").is_err());
        // Missing time zone.
        assert!(parse_expires("Mon, 02 Jan 2006 15:04:05").is_err());
        // Missing week day.
        assert!(parse_expires("02 Jan 2006 15:04:05 GMT").is_err());
        assert!(parse_expires("").is_err());
    }
}
