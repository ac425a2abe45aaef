//! Validation utilities for operator input
//!
//! Provides normalization and validation of flight numbers, dates and
//! numeric configuration values.

use crate::core::date_parser;

/// Normalize a flight number to its canonical form (trimmed, uppercase)
pub fn normalize_flight_number(value: &str) -> String {
    value.trim().to_uppercase()
}

/// Validate a flight number entered by the operator
///
/// Only blank values are rejected. Sheets carry identifiers such as
/// "AR1450/1" or "FO.12", and the manifest lookup decides whether one exists.
pub fn validate_flight_number(value: &str) -> Result<String, String> {
    let normalized = normalize_flight_number(value);
    if normalized.is_empty() {
        return Err("Flight number cannot be empty".to_string());
    }
    Ok(normalized)
}

/// Validate a selection date, returning it in canonical form
///
/// Dates that cannot be parsed are returned trimmed so that a manifest holding
/// the same literal still matches.
pub fn validate_selection_date(value: &str) -> Result<String, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err("Date cannot be empty".to_string());
    }
    Ok(date_parser::normalize_date(trimmed).unwrap_or_else(|_| trimmed.to_string()))
}

/// Validate positive integer value
pub fn validate_positive_int(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(0) => Err("Value must be greater than 0".to_string()),
        Ok(n) => Ok(n),
        Err(_) => Err(format!("'{}' is not a valid positive integer", value)),
    }
}
