//! Flight records and their natural key

use crate::core::validation::normalize_flight_number;
use std::fmt;

/// One scheduled flight's baggage manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flight {
    /// Calendar date in `YYYY-MM-DD` form
    pub date: String,
    /// Uppercase flight identifier
    pub flight_number: String,
    /// Loader (baggage handler) attribution, informational only
    pub loader: Option<String>,
    /// Planned bag total as written in the sheet, informational only
    pub total_planned: Option<u32>,
    /// Expected bag tags in manifest order
    pub bag_codes: Vec<String>,
}

impl Flight {
    /// Create a flight; the flight number is trimmed and uppercased
    pub fn new(date: impl Into<String>, flight_number: &str, bag_codes: Vec<String>) -> Self {
        Self {
            date: date.into().trim().to_string(),
            flight_number: normalize_flight_number(flight_number),
            loader: None,
            total_planned: None,
            bag_codes,
        }
    }

    pub fn with_loader(mut self, loader: impl Into<String>) -> Self {
        self.loader = Some(loader.into());
        self
    }

    pub fn with_total_planned(mut self, total: u32) -> Self {
        self.total_planned = Some(total);
        self
    }

    pub fn key(&self) -> FlightKey {
        FlightKey {
            date: self.date.clone(),
            flight_number: self.flight_number.clone(),
        }
    }

    /// Whether this flight's `(date, flight_number)` matches, trimmed and case-insensitive
    pub fn matches(&self, date: &str, flight_number: &str) -> bool {
        self.date.trim().eq_ignore_ascii_case(date.trim())
            && self
                .flight_number
                .trim()
                .eq_ignore_ascii_case(flight_number.trim())
    }

    pub fn contains(&self, code: &str) -> bool {
        self.bag_codes.iter().any(|bag| bag == code)
    }
}

/// Natural key of a flight: `(date, flight_number)`
///
/// Not enforced unique across a manifest.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FlightKey {
    pub date: String,
    pub flight_number: String,
}

impl FlightKey {
    pub fn new(date: &str, flight_number: &str) -> Self {
        Self {
            date: date.trim().to_string(),
            flight_number: normalize_flight_number(flight_number),
        }
    }

    /// Whether a flight shares this key
    pub fn identifies(&self, flight: &Flight) -> bool {
        flight.matches(&self.date, &self.flight_number)
    }
}

impl fmt::Display for FlightKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.flight_number, self.date)
    }
}
