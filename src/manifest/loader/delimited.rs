//! Delimited text table loader
//!
//! Column layout follows the operations sheet: A date, B flight number,
//! C loader, D planned total, E unused, bag codes from F onward.

use crate::core::date_parser;
use crate::core::validation::normalize_flight_number;
use crate::manifest::error::{ManifestError, ManifestResult};
use crate::manifest::flight::Flight;
use crate::manifest::store::ManifestStore;

/// Zero-based column where bag codes start (column F)
pub const DEFAULT_BAG_COLUMN: usize = 5;

/// Lowest bag column that does not overlap the fixed fields
pub const MIN_BAG_COLUMN: usize = 4;

const DATE_COLUMN: usize = 0;
const FLIGHT_COLUMN: usize = 1;
const LOADER_COLUMN: usize = 2;
const TOTAL_COLUMN: usize = 3;

/// Parse a delimited manifest table into a store
pub fn parse_delimited(contents: &str, bag_column: usize) -> ManifestResult<ManifestStore> {
    let bag_column = bag_column.max(MIN_BAG_COLUMN);
    let delimiter = detect_delimiter(contents);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .delimiter(delimiter)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(contents.as_bytes());

    let mut flights = Vec::new();
    let mut seen_data_row = false;

    for (index, record) in reader.records().enumerate() {
        let row = index + 1;
        let record = record.map_err(|e| ManifestError::Malformed {
            message: format!("row {}: {}", row, e),
        })?;

        if record.iter().all(|cell| cell.is_empty()) {
            continue;
        }

        if !seen_data_row {
            seen_data_row = true;
            if is_header_row(&record) {
                log::debug!("Skipping header row: {:?}", record);
                continue;
            }
        }

        match parse_row(&record, row, bag_column) {
            Ok(flight) => flights.push(flight),
            Err(reason) => log::warn!("Skipping manifest row {}: {}", row, reason),
        }
    }

    log::debug!(
        "Parsed {} flights from delimited manifest (delimiter {:?})",
        flights.len(),
        delimiter as char
    );
    Ok(ManifestStore::new(flights))
}

fn parse_row(record: &csv::StringRecord, row: usize, bag_column: usize) -> Result<Flight, String> {
    let date = date_parser::normalize_date(record.get(DATE_COLUMN).unwrap_or_default())?;

    let flight_number = normalize_flight_number(record.get(FLIGHT_COLUMN).unwrap_or_default());
    if flight_number.is_empty() {
        return Err("flight number is empty".to_string());
    }

    let bag_codes = record
        .iter()
        .skip(bag_column)
        .filter(|cell| !cell.is_empty())
        .map(str::to_string)
        .collect();

    let mut flight = Flight::new(date, &flight_number, bag_codes);

    if let Some(loader) = record.get(LOADER_COLUMN).filter(|cell| !cell.is_empty()) {
        flight = flight.with_loader(loader);
    }

    if let Some(cell) = record.get(TOTAL_COLUMN).filter(|cell| !cell.is_empty()) {
        match parse_total(cell) {
            Some(total) => flight = flight.with_total_planned(total),
            None => log::debug!("Row {}: ignoring non-numeric total {:?}", row, cell),
        }
    }

    Ok(flight)
}

/// A header row has a textual date cell and no numeric planned total.
///
/// A first data row with a mistyped date still carries digits, so it goes
/// through row parsing and is reported like any other bad row.
fn is_header_row(record: &csv::StringRecord) -> bool {
    let date_cell = record.get(DATE_COLUMN).unwrap_or_default();
    if date_parser::is_date(date_cell) || date_cell.chars().any(|c| c.is_ascii_digit()) {
        return false;
    }
    !record
        .get(TOTAL_COLUMN)
        .is_some_and(|cell| parse_total(cell).is_some())
}

/// Parse a planned total; spreadsheets export integers as "12" or "12.0"
pub(crate) fn parse_total(cell: &str) -> Option<u32> {
    if let Ok(total) = cell.parse::<u32>() {
        return Some(total);
    }
    let value = cell.parse::<f64>().ok()?;
    if value >= 0.0 && value.fract() == 0.0 && value <= f64::from(u32::MAX) {
        Some(value as u32)
    } else {
        None
    }
}

/// Pick the delimiter that occurs most often in the first non-empty line
fn detect_delimiter(contents: &str) -> u8 {
    let first_line = contents
        .lines()
        .find(|line| !line.trim().is_empty())
        .unwrap_or_default();

    [b'\t', b';', b',']
        .into_iter()
        .map(|delimiter| {
            let count = first_line.bytes().filter(|b| *b == delimiter).count();
            (delimiter, count)
        })
        .filter(|(_, count)| *count > 0)
        .max_by_key(|(_, count)| *count)
        .map(|(delimiter, _)| delimiter)
        .unwrap_or(b',')
}
