//! Date normalization for the listing's heterogeneous date strings

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// Parses `text` against each format in order, returning the first success
///
/// A format may describe a full datetime (including the site's
/// `%H:%M UTC` variant) or a bare date, which parses to midnight. Returns
/// `None` when every format fails; callers keep such records with a null
/// date rather than dropping them.
pub fn parse_date(text: &str, formats: &[String]) -> Option<NaiveDateTime> {
    let text = text.trim();
    for format in formats {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(text, format) {
            return Some(datetime);
        }
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return Some(date.and_time(NaiveTime::MIN));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScraperConfig;

    fn formats() -> Vec<String> {
        ScraperConfig::default().date_formats
    }

    #[test]
    fn test_weekday_date() {
        let parsed = parse_date("Wed Feb 01, 2023", &formats()).unwrap();
        assert_eq!(parsed.to_string(), "2023-02-01 00:00:00");
    }

    #[test]
    fn test_weekday_date_with_utc_time() {
        let parsed = parse_date("Fri Aug 04, 2023 13:47 UTC", &formats()).unwrap();
        assert_eq!(parsed.to_string(), "2023-08-04 13:47:00");
    }

    #[test]
    fn test_iso_date() {
        let parsed = parse_date("2023-02-01", &formats()).unwrap();
        assert_eq!(parsed.to_string(), "2023-02-01 00:00:00");
    }

    #[test]
    fn test_iso_datetime() {
        let parsed = parse_date("2023-02-01 14:30:00", &formats()).unwrap();
        assert_eq!(parsed.to_string(), "2023-02-01 14:30:00");
    }

    #[test]
    fn test_surrounding_whitespace_is_ignored() {
        assert!(parse_date("  2023-02-01  ", &formats()).is_some());
    }

    #[test]
    fn test_unknown_format_is_none() {
        assert!(parse_date("To be announced", &formats()).is_none());
        assert!(parse_date("", &formats()).is_none());
    }

    #[test]
    fn test_no_formats_is_none() {
        assert!(parse_date("2023-02-01", &[]).is_none());
    }
}
