use chrono::{Datelike, NaiveDateTime, SecondsFormat, TimeZone, Timelike, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::constants::HOSTAWAY_TIMESTAMP_FORMAT;
use crate::error::TimestampError;

// chrono alone accepts short fields and signed years, so the shape is checked first
static HOSTAWAY_TIMESTAMP_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2} [0-9]{2}:[0-9]{2}:[0-9]{2}$")
        .expect("timestamp pattern is valid")
});

/// Parse a Hostaway `submittedAt` value (`YYYY-MM-DD HH:mm:ss`) into an
/// ISO-8601 UTC string such as `2024-03-15T14:30:00Z`.
///
/// The wall-clock value is taken as UTC; no conversion is applied.
pub fn parse_submitted_at(s: &str) -> Result<String, TimestampError> {
    if s.is_empty() {
        return Err(TimestampError::Empty);
    }

    if !HOSTAWAY_TIMESTAMP_RE.is_match(s) {
        return Err(TimestampError::Format {
            value: s.to_string(),
        });
    }

    let invalid = |reason: String| TimestampError::InvalidDate {
        value: s.to_string(),
        reason,
    };

    let naive = NaiveDateTime::parse_from_str(s, HOSTAWAY_TIMESTAMP_FORMAT)
        .map_err(|e| invalid(e.to_string()))?;

    // chrono represents second 60 as a leap second; wall clocks from Hostaway never carry one
    if naive.nanosecond() >= 1_000_000_000 {
        return Err(invalid("second must be in 0..59".to_string()));
    }
    if naive.year() < 1 {
        return Err(invalid("year 0 is out of range".to_string()));
    }

    Ok(Utc
        .from_utc_datetime(&naive)
        .to_rfc3339_opts(SecondsFormat::Secs, true))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_hostaway_format() {
        assert_eq!(
            parse_submitted_at("2024-03-15 14:30:00").unwrap(),
            "2024-03-15T14:30:00Z"
        );
        assert_eq!(
            parse_submitted_at("2020-08-21 22:45:14").unwrap(),
            "2020-08-21T22:45:14Z"
        );
        assert_eq!(
            parse_submitted_at("2024-02-29 23:59:59").unwrap(),
            "2024-02-29T23:59:59Z"
        );
    }

    #[test]
    fn test_rejects_empty() {
        assert_eq!(parse_submitted_at(""), Err(TimestampError::Empty));
    }

    #[test]
    fn test_rejects_wrong_shape() {
        let inputs = [
            "2024-03-15T14:30:00Z",
            "2024-03-15 14:30:00Z",
            "2024-03-15 14:30:00.123",
            "2024-3-15 14:30:00",
            "2024-03-15  14:30:00",
            "2024-03-15",
            " 2024-03-15 14:30:00",
            "２０２４-03-15 14:30:00",
        ];
        for input in inputs {
            assert!(
                matches!(parse_submitted_at(input), Err(TimestampError::Format { .. })),
                "expected format error for {:?}",
                input
            );
        }
    }

    #[test]
    fn test_rejects_impossible_dates() {
        let inputs = [
            "2024-13-01 00:00:00",
            "2023-02-29 10:00:00",
            "2024-02-31 10:00:00",
            "2024-01-01 24:00:00",
            "2024-01-01 12:60:00",
            "2024-01-01 23:59:60",
            "0000-01-01 00:00:00",
        ];
        for input in inputs {
            assert!(
                matches!(
                    parse_submitted_at(input),
                    Err(TimestampError::InvalidDate { .. })
                ),
                "expected invalid date for {:?}",
                input
            );
        }
    }
}
