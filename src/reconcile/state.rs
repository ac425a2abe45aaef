//! Per-bag scanned flags for the selected flight

use std::collections::HashMap;

use crate::manifest::Flight;

/// One flag per distinct bag code, in manifest order
///
/// Duplicate codes in a flight's list share a single flag.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BagScanState {
    codes: Vec<String>,
    scanned: Vec<bool>,
    positions: HashMap<String, usize>,
}

impl BagScanState {
    /// All-unscanned state for a flight
    pub fn for_flight(flight: &Flight) -> Self {
        let mut state = Self::default();
        for code in &flight.bag_codes {
            if state.positions.contains_key(code) {
                continue;
            }
            state.positions.insert(code.clone(), state.codes.len());
            state.codes.push(code.clone());
            state.scanned.push(false);
        }
        state
    }

    pub fn contains(&self, code: &str) -> bool {
        self.positions.contains_key(code)
    }

    pub fn is_scanned(&self, code: &str) -> bool {
        self.positions
            .get(code)
            .is_some_and(|&position| self.scanned[position])
    }

    /// Mark a bag scanned; `Some(true)` on the first scan, `None` for unknown codes
    pub fn mark(&mut self, code: &str) -> Option<bool> {
        let position = *self.positions.get(code)?;
        let first = !self.scanned[position];
        self.scanned[position] = true;
        Some(first)
    }

    /// Number of bags scanned so far
    pub fn scanned_count(&self) -> usize {
        self.scanned.iter().filter(|scanned| **scanned).count()
    }

    /// Number of distinct bags tracked
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Codes with their scanned flag, in manifest order
    pub fn entries(&self) -> impl Iterator<Item = (&str, bool)> {
        self.codes
            .iter()
            .map(String::as_str)
            .zip(self.scanned.iter().copied())
    }

    /// Codes not scanned yet, in manifest order
    pub fn pending(&self) -> impl Iterator<Item = &str> {
        self.entries()
            .filter(|(_, scanned)| !scanned)
            .map(|(code, _)| code)
    }
}
