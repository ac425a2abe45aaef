//! The scanning desk
//!
//! Bundles everything one operator session owns: the manifest, the selected
//! flight, the segmenter and the code normalizer. Hosts (the console, the
//! `check` command, tests) drive it with key events or decoded codes.

use crate::manifest::{Flight, FlightKey, ManifestLoad, ManifestStatus, ManifestStore};
use crate::reconcile::{classify, FlightSelector, Outcome, SelectionResult};
use crate::scan::{CodeNormalizer, KeyEvent, Observation, ScanSegmenter};

/// What the desk did with one key event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyHandling {
    /// The key must not reach anything else
    pub suppress_default: bool,
    /// Classification of a completed scan
    pub outcome: Option<Outcome>,
}

/// Counters for the selected flight
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeskSummary {
    pub flight: Option<FlightKey>,
    pub total_bags: usize,
    pub scanned: usize,
}

#[derive(Debug)]
pub struct ScanDesk {
    store: ManifestStore,
    status: ManifestStatus,
    selector: FlightSelector,
    segmenter: ScanSegmenter,
    normalizer: CodeNormalizer,
}

impl ScanDesk {
    pub fn new(load: ManifestLoad, normalizer: CodeNormalizer) -> Self {
        Self {
            store: load.store,
            status: load.status,
            selector: FlightSelector::new(),
            segmenter: ScanSegmenter::new(),
            normalizer,
        }
    }

    /// Desk over an in-memory store
    pub fn with_store(store: ManifestStore, normalizer: CodeNormalizer) -> Self {
        let status = ManifestStatus::Loaded {
            flights: store.len(),
            source: "memory".to_string(),
        };
        Self::new(ManifestLoad { store, status }, normalizer)
    }

    /// Feed one key event; a completed scan is classified straight away
    pub fn handle_key(&mut self, event: &KeyEvent) -> KeyHandling {
        let observation = self.segmenter.observe(event);
        let suppress_default = observation.suppresses_default();
        let outcome = match observation {
            Observation::Completed(raw) => self.accept_code(&raw),
            _ => None,
        };
        KeyHandling {
            suppress_default,
            outcome,
        }
    }

    /// Run the silence watchdog
    pub fn expire(&mut self, now_ms: u64) -> bool {
        self.segmenter.expire(now_ms)
    }

    /// When the watchdog next needs to run
    pub fn deadline(&self) -> Option<u64> {
        self.segmenter.deadline()
    }

    pub fn pending(&self) -> &str {
        self.segmenter.pending()
    }

    /// Normalize and classify a decoded code; blank codes produce nothing
    pub fn accept_code(&mut self, raw: &str) -> Option<Outcome> {
        let code = self.normalizer.normalize(raw)?;
        if code != raw {
            log::debug!("Normalized {:?} to {:?}", raw, code);
        }
        let outcome = classify(&self.store, &mut self.selector, &code);
        log::info!("{}: {}", outcome.label(), outcome.code());
        Some(outcome)
    }

    pub fn select(&mut self, date: &str, flight_number: &str) -> SelectionResult<&Flight> {
        self.selector.select(&self.store, date, flight_number)
    }

    pub fn clear_selection(&mut self) {
        self.selector.clear();
    }

    /// Replace the manifest; the selection and any pending scan are dropped
    pub fn reload(&mut self, load: ManifestLoad) {
        self.store = load.store;
        self.status = load.status;
        self.selector.invalidate();
        self.segmenter.reset();
    }

    pub fn summary(&self) -> DeskSummary {
        DeskSummary {
            flight: self.selector.current_key(),
            total_bags: self.selector.scan_state().map_or(0, |state| state.len()),
            scanned: self.selector.scanned_count(),
        }
    }

    /// Flights on a date, or every flight when no date is given
    pub fn flights(&self, date: Option<&str>) -> Vec<(usize, &Flight)> {
        match date {
            Some(date) => self.store.flights_on(date),
            None => self.store.flights().iter().enumerate().collect(),
        }
    }

    pub fn store(&self) -> &ManifestStore {
        &self.store
    }

    pub fn status(&self) -> &ManifestStatus {
        &self.status
    }

    pub fn selector(&self) -> &FlightSelector {
        &self.selector
    }
}
