//! Tests for flight selection

use super::sample_store;
use crate::manifest::loader::parse_delimited;
use crate::manifest::ManifestStore;
use crate::reconcile::{classify, FlightSelector, SelectionError};

#[test]
fn test_select_is_case_insensitive() {
    let store = sample_store();
    let mut selector = FlightSelector::new();

    let flight = selector.select(&store, "2024-01-01", "fo123").unwrap();
    assert_eq!(flight.flight_number, "FO123");
    assert_eq!(selector.current_index(), Some(0));
    assert_eq!(selector.scanned_count(), 0);
    assert_eq!(selector.scan_state().map(|s| s.len()), Some(3));
}

#[test]
fn test_select_accepts_other_date_forms() {
    let store = sample_store();
    let mut selector = FlightSelector::new();
    let flight = selector.select(&store, " 02/01/2024 ", " FO123 ").unwrap();
    assert_eq!(flight.date, "2024-01-02");
}

#[test]
fn test_reselect_resets_every_bag() {
    let store = sample_store();
    let mut selector = FlightSelector::new();
    selector.select(&store, "2024-01-01", "FO123").unwrap();
    classify(&store, &mut selector, "A1");
    classify(&store, &mut selector, "A2");
    assert_eq!(selector.scanned_count(), 2);

    selector.select(&store, "2024-01-01", "FO123").unwrap();
    assert_eq!(selector.scanned_count(), 0);
    assert!(selector
        .scan_state()
        .unwrap()
        .entries()
        .all(|(_, scanned)| !scanned));
}

#[test]
fn test_failed_select_clears_selection() {
    let store = sample_store();
    let mut selector = FlightSelector::new();
    selector.select(&store, "2024-01-01", "FO123").unwrap();

    let err = selector.select(&store, "2024-01-01", "FO999").unwrap_err();
    assert_eq!(
        err,
        SelectionError::NotFound {
            date: "2024-01-01".to_string(),
            flight_number: "FO999".to_string()
        }
    );
    assert!(selector.current().is_none());
    assert_eq!(selector.scanned_count(), 0);
}

#[test]
fn test_blank_input_is_invalid() {
    let store = sample_store();
    let mut selector = FlightSelector::new();

    let err = selector.select(&store, "  ", "FO123").unwrap_err();
    assert!(matches!(err, SelectionError::InvalidSelection { .. }));

    let err = selector.select(&store, "2024-01-01", "").unwrap_err();
    assert!(matches!(err, SelectionError::InvalidSelection { .. }));
}

#[test]
fn test_empty_manifest_is_invalid() {
    let mut selector = FlightSelector::new();
    let err = selector
        .select(&ManifestStore::empty(), "2024-01-01", "FO123")
        .unwrap_err();
    assert!(err.to_string().contains("No flights loaded"));
}

#[test]
fn test_invalidate_and_clear() {
    let store = sample_store();
    let mut selector = FlightSelector::new();

    selector.select(&store, "2024-01-01", "FO123").unwrap();
    selector.invalidate();
    assert!(selector.current().is_none());
    assert!(selector.scan_state().is_none());

    selector.select(&store, "2024-01-01", "FO456").unwrap();
    selector.clear();
    assert!(selector.current_key().is_none());
}

#[test]
fn test_select_accepts_any_loaded_flight_number() {
    let store =
        parse_delimited("2024-01-01,AR1450/1,,,,B1\n2024-01-01,FO.12,,,,B2\n", 5).unwrap();
    assert_eq!(store.len(), 2);
    let mut selector = FlightSelector::new();

    let flight = selector.select(&store, "2024-01-01", "ar1450/1").unwrap();
    assert_eq!(flight.flight_number, "AR1450/1");
    assert_eq!(selector.current_index(), Some(0));

    let flight = selector.select(&store, "2024-01-01", " fo.12 ").unwrap();
    assert_eq!(flight.bag_codes, vec!["B2"]);

    assert!(matches!(
        selector.select(&store, "2024-01-01", "   "),
        Err(SelectionError::InvalidSelection { .. })
    ));
}
