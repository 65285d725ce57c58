//! Calendar date parsing for the optional `Date` column.
//!
//! Month-first is assumed for slash-separated dates (`01/02/2024` is
//! 2 January). Date-times are truncated to their calendar date.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d %B %Y",
    "%B %d, %Y",
    "%d-%b-%Y",
];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M",
];

/// Parse a date cell, returning `None` when no supported format matches.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(raw, fmt) {
            return Some(date);
        }
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|dt| dt.date())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn iso_dates() {
        assert_eq!(parse_date("2024-01-01"), Some(ymd(2024, 1, 1)));
        assert_eq!(parse_date(" 2024/03/15 "), Some(ymd(2024, 3, 15)));
    }

    #[test]
    fn month_first_slashes() {
        assert_eq!(parse_date("01/02/2024"), Some(ymd(2024, 1, 2)));
        assert_eq!(parse_date("12/31/2023"), Some(ymd(2023, 12, 31)));
    }

    #[test]
    fn named_months() {
        assert_eq!(parse_date("5 March 2024"), Some(ymd(2024, 3, 5)));
        assert_eq!(parse_date("March 5, 2024"), Some(ymd(2024, 3, 5)));
        assert_eq!(parse_date("05-Mar-2024"), Some(ymd(2024, 3, 5)));
    }

    #[test]
    fn datetimes_truncate_to_date() {
        assert_eq!(parse_date("2024-01-01 23:59:59"), Some(ymd(2024, 1, 1)));
        assert_eq!(parse_date("2024-01-01T08:30:00"), Some(ymd(2024, 1, 1)));
        assert_eq!(
            parse_date("2024-01-01T08:30:00+02:00"),
            Some(ymd(2024, 1, 1))
        );
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("yesterday"), None);
        assert_eq!(parse_date("2024-13-01"), None);
        assert_eq!(parse_date("31/12/2023"), None);
    }
}
