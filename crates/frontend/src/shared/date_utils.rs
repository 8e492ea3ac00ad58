/// Utilities for date and time formatting
///
/// Inputs are ISO strings as the hub returns them. Anything that does not
/// parse is shown unchanged.
use chrono::{DateTime, NaiveDate, NaiveDateTime};

const DATE_FORMAT: &str = "%b %d, %Y";
const DATETIME_FORMAT: &str = "%b %d, %Y | %H:%M:%S";

fn parse_datetime(datetime_str: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(datetime_str) {
        return Some(dt.naive_utc());
    }
    NaiveDateTime::parse_from_str(datetime_str, "%Y-%m-%dT%H:%M:%S%.f").ok()
}

/// Calendar date at the start of an ISO string
/// Example: "2024-03-15T14:02:26Z" -> 2024-03-15
pub fn parse_date_prefix(value: &str) -> Option<NaiveDate> {
    let date_part = value.get(..10)?;
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

/// Date typed into a filter input (`YYYY-MM-DD`)
pub fn parse_filter_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

/// Format ISO datetime string to "MMM DD, YYYY | HH:MM:SS"
/// Example: "2024-03-15T14:02:26.123Z" -> "Mar 15, 2024 | 14:02:26"
pub fn format_datetime(datetime_str: &str) -> String {
    match parse_datetime(datetime_str) {
        Some(dt) => dt.format(DATETIME_FORMAT).to_string(),
        None => datetime_str.to_string(),
    }
}

/// Format ISO date string to "MMM DD, YYYY"
/// Example: "2024-03-15" or "2024-03-15T14:02:26Z" -> "Mar 15, 2024"
pub fn format_date(date_str: &str) -> String {
    match parse_date_prefix(date_str) {
        Some(date) => date.format(DATE_FORMAT).to_string(),
        None => date_str.to_string(),
    }
}

/// Same as [`format_date`], empty for a missing value
pub fn format_optional_date(date_str: Option<&str>) -> String {
    date_str.map(format_date).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_datetime() {
        assert_eq!(
            format_datetime("2024-03-15T14:02:26.123Z"),
            "Mar 15, 2024 | 14:02:26"
        );
        assert_eq!(
            format_datetime("2024-12-31T23:59:59Z"),
            "Dec 31, 2024 | 23:59:59"
        );
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2024-03-15"), "Mar 15, 2024");
        assert_eq!(format_date("2024-03-05T14:02:26.123Z"), "Mar 05, 2024");
        assert_eq!(format_optional_date(None), "");
    }

    #[test]
    fn test_invalid_format() {
        assert_eq!(format_datetime("invalid"), "invalid");
        assert_eq!(format_date("invalid"), "invalid");
        assert_eq!(format_date("2024-13-01"), "2024-13-01");
    }

    #[test]
    fn test_parse_dates() {
        assert_eq!(
            parse_date_prefix("2024-01-31T23:00:00Z"),
            NaiveDate::from_ymd_opt(2024, 1, 31)
        );
        assert_eq!(parse_date_prefix("2024"), None);
        assert_eq!(parse_filter_date(" 2024-02-29 "), NaiveDate::from_ymd_opt(2024, 2, 29));
        assert_eq!(parse_filter_date("02/29/2024"), None);
    }
}
