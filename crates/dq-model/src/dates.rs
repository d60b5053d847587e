//! Universal date parsing against an ordered list of accepted
//! formats, with output always canonical `YYYY-MM-DD`.
//!
//! The format list is tried in order and the first successful parse
//! wins. Day-first formats precede month-first formats, so an
//! ambiguous numeric value such as `03-04-2025` resolves day-first
//! (3 April 2025); month-first formats only apply when day-first
//! parsing is impossible (for example `04/25/2025`).

use chrono::NaiveDate;

/// Accepted input formats, in disambiguation order.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d", // ISO 8601
    "%Y/%m/%d",
    "%b %d %Y", // Feb 15 2025
    "%B %d %Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%d %b %Y", // 15 Feb 2025
    "%d %B %Y",
    "%d-%b-%Y", // 15-Feb-2025
    "%d-%m-%Y", // day-first numeric
    "%d/%m/%Y",
    "%d.%m.%Y",
    "%m/%d/%Y", // month-first fallback
    "%m-%d-%Y",
];

/// Header suffixes that mark a column as date-like.
const DATE_HEADER_SUFFIXES: &[&str] = &["_dt", "_at"];

/// Parse a value against the accepted formats; first match wins.
pub fn parse_any_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(date);
        }
    }
    None
}

/// True for canonical ISO `YYYY-MM-DD` values only.
pub fn is_iso_date(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.len() == 10
        && trimmed.as_bytes()[4] == b'-'
        && trimmed.as_bytes()[7] == b'-'
        && NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").is_ok()
}

/// Header-name heuristic for date-like columns: a `date` word token
/// ("update" does not count) or a timestamp-style suffix.
pub fn looks_like_date_header(name: &str) -> bool {
    let lower = name.to_lowercase();
    if lower.split(['_', ' ', '-']).any(|token| token == "date") {
        return true;
    }
    DATE_HEADER_SUFFIXES
        .iter()
        .any(|suffix| lower.ends_with(suffix))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn parses_accepted_formats() {
        assert_eq!(parse_any_date("2025-02-15"), Some(date(2025, 2, 15)));
        assert_eq!(parse_any_date("Feb 15 2025"), Some(date(2025, 2, 15)));
        assert_eq!(parse_any_date("15-02-2025"), Some(date(2025, 2, 15)));
        assert_eq!(parse_any_date("2025/02/15"), Some(date(2025, 2, 15)));
        assert_eq!(parse_any_date("15.02.2025"), Some(date(2025, 2, 15)));
    }

    #[test]
    fn ambiguous_numeric_dates_resolve_day_first() {
        // Both day-first and month-first could parse these; the
        // ordered format list makes day-first win.
        assert_eq!(parse_any_date("03-04-2025"), Some(date(2025, 4, 3)));
        assert_eq!(parse_any_date("03/04/2025"), Some(date(2025, 4, 3)));
    }

    #[test]
    fn month_first_applies_when_day_first_cannot() {
        // 25 is not a valid month, so only month-first parses.
        assert_eq!(parse_any_date("04/25/2025"), Some(date(2025, 4, 25)));
        assert_eq!(parse_any_date("04-25-2025"), Some(date(2025, 4, 25)));
    }

    #[test]
    fn unparseable_values_return_none() {
        assert_eq!(parse_any_date(""), None);
        assert_eq!(parse_any_date("not a date"), None);
        assert_eq!(parse_any_date("2025-13-40"), None);
    }

    #[test]
    fn iso_check_is_strict() {
        assert!(is_iso_date("2025-02-15"));
        assert!(is_iso_date(" 2025-02-15 "));
        assert!(!is_iso_date("2025-2-15"));
        assert!(!is_iso_date("15-02-2025"));
        assert!(!is_iso_date("Feb 15 2025"));
    }

    #[test]
    fn header_heuristic() {
        assert!(looks_like_date_header("order_date"));
        assert!(looks_like_date_header("DATE_OF_BIRTH"));
        assert!(looks_like_date_header("created_at"));
        assert!(looks_like_date_header("ship_dt"));
        assert!(!looks_like_date_header("amount"));
        assert!(!looks_like_date_header("update"));
    }
}
