//! Target date parsing and display formatting
//!
//! Target dates arrive as user input (typically `YYYY-MM-DD` from a date
//! picker, sometimes a full ISO-8601 timestamp) and are stored as UTC
//! instants. Plain dates map to midnight UTC. Display formatting is
//! presentation-only and never feeds back into stored data.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

/// Parse a target date string into a UTC instant.
///
/// Accepts RFC 3339 timestamps and plain `YYYY-MM-DD` dates (midnight UTC).
/// Anything else yields `None`.
pub fn parse_target_date(input: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(input) {
        return Some(parsed.with_timezone(&Utc));
    }

    let date = NaiveDate::parse_from_str(input, "%Y-%m-%d").ok()?;
    let midnight = date.and_hms_opt(0, 0, 0)?;
    Some(Utc.from_utc_datetime(&midnight))
}

/// Render a stored target date for display.
///
/// `None` renders as "N/A", anything unparseable as "Invalid Date",
/// otherwise a short human-readable form like "Jun 1, 2025".
pub fn format_display_date(value: Option<&str>) -> String {
    let Some(raw) = value else {
        return "N/A".to_string();
    };

    match parse_target_date(raw) {
        Some(date) => date.format("%b %-d, %Y").to_string(),
        None => "Invalid Date".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_date_is_midnight_utc() {
        let parsed = parse_target_date("2025-06-01").unwrap();
        assert_eq!(parsed.to_rfc3339(), "2025-06-01T00:00:00+00:00");
    }

    #[test]
    fn test_parse_rfc3339_normalizes_to_utc() {
        let parsed = parse_target_date("2025-06-01T10:30:00+02:00").unwrap();
        assert_eq!(parsed.to_rfc3339(), "2025-06-01T08:30:00+00:00");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_target_date("not a date").is_none());
        assert!(parse_target_date("").is_none());
        assert!(parse_target_date("2025-13-99").is_none());
    }

    #[test]
    fn test_display_none_is_na() {
        assert_eq!(format_display_date(None), "N/A");
    }

    #[test]
    fn test_display_unparseable_is_invalid_date() {
        assert_eq!(format_display_date(Some("tomorrow-ish")), "Invalid Date");
        assert_eq!(format_display_date(Some("")), "Invalid Date");
    }

    #[test]
    fn test_display_formats_valid_dates() {
        assert_eq!(format_display_date(Some("2025-06-01")), "Jun 1, 2025");
        assert_eq!(
            format_display_date(Some("2025-12-25T00:00:00+00:00")),
            "Dec 25, 2025"
        );
    }
}
