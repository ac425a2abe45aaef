//! Tests for the three-way classifier

use super::sample_store;
use crate::manifest::FlightKey;
use crate::reconcile::{classify, FlightSelector, Outcome};
use crate::core::styles::StyleRole;

#[test]
fn test_no_flight_selected() {
    let store = sample_store();
    let mut selector = FlightSelector::new();
    let outcome = classify(&store, &mut selector, "A1");
    assert_eq!(
        outcome,
        Outcome::NoFlightSelected {
            code: "A1".to_string()
        }
    );
    assert_eq!(outcome.role(), StyleRole::Failure);
}

#[test]
fn test_match_current_is_idempotent() {
    let store = sample_store();
    let mut selector = FlightSelector::new();
    selector.select(&store, "2024-01-01", "FO123").unwrap();

    let first = classify(&store, &mut selector, "A2");
    assert_eq!(
        first,
        Outcome::MatchCurrent {
            code: "A2".to_string(),
            flight: FlightKey::new("2024-01-01", "FO123"),
            newly_scanned: true,
        }
    );
    assert_eq!(selector.scanned_count(), 1);

    let second = classify(&store, &mut selector, "A2");
    assert!(matches!(
        second,
        Outcome::MatchCurrent {
            newly_scanned: false,
            ..
        }
    ));
    assert_eq!(selector.scanned_count(), 1);
    assert!(second.to_string().contains("Already scanned"));
}

#[test]
fn test_match_other_uses_first_in_manifest_order() {
    let store = sample_store();
    let mut selector = FlightSelector::new();
    selector.select(&store, "2024-01-01", "FO123").unwrap();

    let outcome = classify(&store, &mut selector, "SHARED");
    assert_eq!(
        outcome,
        Outcome::MatchOther {
            code: "SHARED".to_string(),
            flight: FlightKey::new("2024-01-01", "FO456"),
        }
    );
    assert_eq!(outcome.role(), StyleRole::Warn);
    assert_eq!(selector.scanned_count(), 0);
}

#[test]
fn test_match_other_skips_flights_sharing_current_key() {
    let store = sample_store();
    let mut selector = FlightSelector::new();
    selector.select(&store, "2024-01-01", "FO456").unwrap();

    let outcome = classify(&store, &mut selector, "C1");
    assert_eq!(
        outcome,
        Outcome::MatchOther {
            code: "C1".to_string(),
            flight: FlightKey::new("2024-01-02", "FO123"),
        }
    );
}

#[test]
fn test_not_found() {
    let store = sample_store();
    let mut selector = FlightSelector::new();
    selector.select(&store, "2024-01-01", "FO123").unwrap();

    let outcome = classify(&store, &mut selector, "ZZZ");
    assert_eq!(
        outcome,
        Outcome::NotFound {
            code: "ZZZ".to_string()
        }
    );
    assert_eq!(outcome.label(), "UNKNOWN");
    assert_eq!(selector.scanned_count(), 0);
}

#[test]
fn test_codes_are_matched_exactly() {
    let store = sample_store();
    let mut selector = FlightSelector::new();
    selector.select(&store, "2024-01-01", "FO123").unwrap();
    assert!(matches!(
        classify(&store, &mut selector, "a1"),
        Outcome::NotFound { .. }
    ));
}

#[test]
fn test_outcome_messages() {
    let outcome = Outcome::MatchOther {
        code: "X".to_string(),
        flight: FlightKey::new("2024-01-02", "FO9"),
    };
    assert_eq!(
        outcome.to_string(),
        "X is NOT on this flight's list. Found on flight FO9 of 2024-01-02."
    );
    assert_eq!(outcome.code(), "X");
    assert!(!outcome.is_match());
}
