//! JSON manifest loader
//!
//! Accepts the payload published by the sheet web app: an array of objects
//! `{ date, flight, loader, total, bags }`. Cells may arrive as strings or
//! numbers depending on how the sheet formatted them.

use serde::Deserialize;
use serde_json::Value;

use super::delimited::parse_total;
use crate::core::date_parser;
use crate::core::validation::normalize_flight_number;
use crate::manifest::error::{ManifestError, ManifestResult};
use crate::manifest::flight::Flight;
use crate::manifest::store::ManifestStore;

#[derive(Debug, Deserialize)]
struct RawFlightRecord {
    #[serde(default)]
    date: Option<Value>,
    #[serde(default, alias = "flightNumber")]
    flight: Option<Value>,
    #[serde(default)]
    loader: Option<Value>,
    #[serde(default, alias = "totalPlanned")]
    total: Option<Value>,
    #[serde(default, alias = "bagCodes")]
    bags: Option<Vec<Value>>,
}

/// Parse a JSON manifest payload into a store
///
/// A payload that is valid JSON but not an array yields an empty store.
pub fn parse_json(contents: &str) -> ManifestResult<ManifestStore> {
    let value: Value = serde_json::from_str(contents).map_err(|e| ManifestError::Malformed {
        message: format!("response is not valid JSON ({})", e),
    })?;

    let items = match value {
        Value::Array(items) => items,
        other => {
            log::warn!(
                "Manifest JSON is not an array (got {}), treating as empty",
                json_type_name(&other)
            );
            return Ok(ManifestStore::empty());
        }
    };

    let mut flights = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        let record = match serde_json::from_value::<RawFlightRecord>(item) {
            Ok(record) => record,
            Err(e) => {
                log::warn!("Skipping manifest entry {}: {}", index, e);
                continue;
            }
        };
        match convert_record(record) {
            Ok(flight) => flights.push(flight),
            Err(reason) => log::warn!("Skipping manifest entry {}: {}", index, reason),
        }
    }

    Ok(ManifestStore::new(flights))
}

fn convert_record(record: RawFlightRecord) -> Result<Flight, String> {
    let date_text = record
        .date
        .as_ref()
        .and_then(scalar_text)
        .ok_or_else(|| "date is missing".to_string())?;
    let date = date_parser::normalize_date(&date_text)?;

    let flight_number = record
        .flight
        .as_ref()
        .and_then(scalar_text)
        .map(|text| normalize_flight_number(&text))
        .filter(|text| !text.is_empty())
        .ok_or_else(|| "flight number is missing".to_string())?;

    let bag_codes = record
        .bags
        .unwrap_or_default()
        .iter()
        .filter_map(scalar_text)
        .collect();

    let mut flight = Flight::new(date, &flight_number, bag_codes);

    if let Some(loader) = record.loader.as_ref().and_then(scalar_text) {
        flight = flight.with_loader(loader);
    }
    if let Some(total) = record
        .total
        .as_ref()
        .and_then(scalar_text)
        .and_then(|text| parse_total(&text))
    {
        flight = flight.with_total_planned(total);
    }

    Ok(flight)
}

/// Trimmed, non-empty text of a string or number cell
fn scalar_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(text) => text.trim().to_string(),
        Value::Number(number) => number.to_string(),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_text() {
        assert_eq!(scalar_text(&Value::from(" ab1 ")), Some("ab1".to_string()));
        assert_eq!(scalar_text(&Value::from(1234)), Some("1234".to_string()));
        assert_eq!(scalar_text(&Value::from("  ")), None);
        assert_eq!(scalar_text(&Value::Null), None);
        assert_eq!(scalar_text(&Value::Bool(true)), None);
    }
}
