//! Tests for reconciliation

pub mod classifier_tests;
pub mod selector_tests;

use crate::manifest::{Flight, ManifestStore};

pub(crate) fn bags(codes: &[&str]) -> Vec<String> {
    codes.iter().map(|c| c.to_string()).collect()
}

/// Two days of flights; `SHARED` sits on FO456 and on the second FO123
pub(crate) fn sample_store() -> ManifestStore {
    ManifestStore::new(vec![
        Flight::new("2024-01-01", "FO123", bags(&["A1", "A2", "A3"])),
        Flight::new("2024-01-01", "FO456", bags(&["B1", "SHARED"])),
        Flight::new("2024-01-02", "FO123", bags(&["C1", "SHARED"])),
    ])
}
