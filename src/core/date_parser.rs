//! Date parsing utilities
//!
//! Manifest sheets arrive with dates in whatever shape the spreadsheet exported.
//! Everything is normalized to the canonical `YYYY-MM-DD` form before it reaches
//! the manifest store.

use chrono::{DateTime, NaiveDate, Utc};

/// Canonical manifest date format
pub const CANONICAL_DATE_FORMAT: &str = "%Y-%m-%d";

/// Year-first formats, tried before the day-first ones
const YEAR_FIRST_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d"];

/// Day-first formats as exported by spreadsheets with a Spanish locale
const DAY_FIRST_FORMATS: &[&str] = &["%d/%m/%Y", "%d-%m-%Y", "%d.%m.%Y"];

/// Parse a date string into a calendar date
///
/// Supports:
/// - ISO 8601 dates: "2024-01-15", "2024/01/15"
/// - Day-first dates: "15/01/2024", "15-01-2024"
/// - RFC 3339 timestamps: "2024-01-15T03:00:00.000Z" (date of the UTC instant)
pub fn parse_date(date_str: &str) -> Result<NaiveDate, String> {
    let trimmed = date_str.trim();
    if trimmed.is_empty() {
        return Err("Date is empty".to_string());
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc).date_naive());
    }

    for format in YEAR_FIRST_FORMATS.iter().chain(DAY_FIRST_FORMATS) {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Ok(date);
        }
    }

    Err(format!(
        "Invalid date format: '{}'. Expected YYYY-MM-DD, DD/MM/YYYY or an RFC 3339 timestamp",
        trimmed
    ))
}

/// Parse a date string and render it in canonical `YYYY-MM-DD` form
pub fn normalize_date(date_str: &str) -> Result<String, String> {
    parse_date(date_str).map(|date| date.format(CANONICAL_DATE_FORMAT).to_string())
}

/// Check whether a string looks like a date (used for header-row detection)
pub fn is_date(date_str: &str) -> bool {
    parse_date(date_str).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_iso_date() {
        assert_eq!(normalize_date("2024-01-15").unwrap(), "2024-01-15");
        assert_eq!(normalize_date("2024/01/15").unwrap(), "2024-01-15");
        assert_eq!(normalize_date("  2024-12-31 ").unwrap(), "2024-12-31");
    }

    #[test]
    fn test_parse_day_first_dates() {
        assert_eq!(normalize_date("15/01/2024").unwrap(), "2024-01-15");
        assert_eq!(normalize_date("15-01-2024").unwrap(), "2024-01-15");
        assert_eq!(normalize_date("5/1/2024").unwrap(), "2024-01-05");
    }

    #[test]
    fn test_parse_rfc3339_uses_utc_date() {
        assert_eq!(
            normalize_date("2024-01-15T03:00:00.000Z").unwrap(),
            "2024-01-15"
        );
        assert_eq!(
            normalize_date("2024-01-15T23:30:00-03:00").unwrap(),
            "2024-01-16"
        );
    }

    #[test]
    fn test_invalid_dates() {
        assert!(parse_date("").is_err());
        assert!(parse_date("invalid").is_err());
        assert!(parse_date("2024-13-01").is_err());
        assert!(parse_date("2024-01-32").is_err());
        assert!(parse_date("FO123").is_err());
    }

    #[test]
    fn test_is_date_for_header_detection() {
        assert!(is_date("2024-01-15"));
        assert!(!is_date("Fecha"));
        assert!(!is_date("date"));
    }
}
