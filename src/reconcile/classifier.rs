//! Three-way classification of scanned codes

use super::outcome::Outcome;
use super::selector::FlightSelector;
use crate::manifest::ManifestStore;

/// Classify a normalized code against the selected flight and the manifest
///
/// Rules are applied in order and the first that matches wins:
/// no selection, listed on the selected flight (marks the bag scanned),
/// listed on another flight, not listed anywhere.
pub fn classify(store: &ManifestStore, selector: &mut FlightSelector, code: &str) -> Outcome {
    let code = code.to_string();

    let Some(current) = selector.current_key() else {
        return Outcome::NoFlightSelected { code };
    };

    if let Some(newly_scanned) = selector
        .scan_state_mut()
        .and_then(|state| state.mark(&code))
    {
        log::debug!("{} matched {} (first scan: {})", code, current, newly_scanned);
        return Outcome::MatchCurrent {
            code,
            flight: current,
            newly_scanned,
        };
    }

    match store.first_other_containing(&code, &current) {
        Some(other) => {
            log::debug!("{} belongs to {}", code, other.key());
            Outcome::MatchOther {
                code,
                flight: other.key(),
            }
        }
        None => {
            log::debug!("{} not in manifest", code);
            Outcome::NotFound { code }
        }
    }
}
