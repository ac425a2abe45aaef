//! Scan reconciliation against the manifest
//!
//! A decoded code is checked against the selected flight first, then against
//! every other flight in the manifest. Only a match on the selected flight
//! changes state.

pub mod classifier;
pub mod error;
pub mod outcome;
pub mod selector;
pub mod state;

pub use classifier::classify;
pub use error::{SelectionError, SelectionResult};
pub use outcome::Outcome;
pub use selector::FlightSelector;
pub use state::BagScanState;

#[cfg(test)]
mod tests;
