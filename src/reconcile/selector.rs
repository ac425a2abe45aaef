//! Active flight selection

use super::error::{SelectionError, SelectionResult};
use super::state::BagScanState;
use crate::core::validation::{validate_flight_number, validate_selection_date};
use crate::manifest::{Flight, FlightKey, ManifestStore};

#[derive(Debug, Clone)]
struct ActiveFlight {
    flight: Flight,
    index: usize,
    state: BagScanState,
}

/// Holds the flight being loaded and its bag flags
///
/// The selected flight is copied out of the store. Stores are immutable and a
/// reload calls [`FlightSelector::invalidate`], so the copy never goes stale.
#[derive(Debug, Clone, Default)]
pub struct FlightSelector {
    active: Option<ActiveFlight>,
}

impl FlightSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select the first flight matching `(date, flight_number)`
    ///
    /// Any previous selection is dropped first, so a failed selection leaves
    /// no flight active and reselecting the same flight starts from zero.
    pub fn select(
        &mut self,
        store: &ManifestStore,
        date: &str,
        flight_number: &str,
    ) -> SelectionResult<&Flight> {
        self.active = None;

        let date = validate_selection_date(date)
            .map_err(|message| SelectionError::InvalidSelection { message })?;
        let flight_number = validate_flight_number(flight_number)
            .map_err(|message| SelectionError::InvalidSelection { message })?;

        if store.is_empty() {
            return Err(SelectionError::InvalidSelection {
                message: "No flights loaded. Load a manifest first.".to_string(),
            });
        }

        let (index, flight) =
            store
                .find(&date, &flight_number)
                .ok_or_else(|| SelectionError::NotFound {
                    date: date.clone(),
                    flight_number: flight_number.clone(),
                })?;

        log::info!(
            "Selected flight {} ({} bags)",
            flight.key(),
            flight.bag_codes.len()
        );
        let active = self.active.insert(ActiveFlight {
            flight: flight.clone(),
            index,
            state: BagScanState::for_flight(flight),
        });
        Ok(&active.flight)
    }

    pub fn current(&self) -> Option<&Flight> {
        self.active.as_ref().map(|active| &active.flight)
    }

    pub fn current_key(&self) -> Option<FlightKey> {
        self.current().map(Flight::key)
    }

    /// Manifest position of the selected flight
    pub fn current_index(&self) -> Option<usize> {
        self.active.as_ref().map(|active| active.index)
    }

    pub fn clear(&mut self) {
        self.active = None;
    }

    /// Drop the selection because the manifest it came from was replaced
    pub fn invalidate(&mut self) {
        if let Some(active) = self.active.take() {
            log::debug!("Selection {} invalidated", active.flight.key());
        }
    }

    pub fn scan_state(&self) -> Option<&BagScanState> {
        self.active.as_ref().map(|active| &active.state)
    }

    pub(crate) fn scan_state_mut(&mut self) -> Option<&mut BagScanState> {
        self.active.as_mut().map(|active| &mut active.state)
    }

    /// Bags of the selected flight scanned so far; zero without a selection
    pub fn scanned_count(&self) -> usize {
        self.scan_state().map_or(0, BagScanState::scanned_count)
    }
}
