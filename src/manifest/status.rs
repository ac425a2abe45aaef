//! Operator-facing manifest status line

use crate::core::styles::StyleRole;
use std::fmt;

/// Outcome of a manifest load, shown as the status line
#[derive(Debug, Clone, PartialEq)]
pub enum ManifestStatus {
    /// Manifest loaded with at least one flight
    Loaded { flights: usize, source: String },
    /// Manifest loaded but holds no flights
    Empty { source: String },
    /// Live source failed; an offline copy was used instead
    Cached {
        flights: usize,
        saved_at: String,
        reason: String,
    },
    /// Nothing could be loaded
    Failed { message: String },
}

impl ManifestStatus {
    /// Style tone of the status line
    pub fn role(&self) -> StyleRole {
        match self {
            ManifestStatus::Loaded { .. } => StyleRole::Ok,
            ManifestStatus::Empty { .. } | ManifestStatus::Cached { .. } => StyleRole::Warn,
            ManifestStatus::Failed { .. } => StyleRole::Failure,
        }
    }

    pub fn is_usable(&self) -> bool {
        matches!(
            self,
            ManifestStatus::Loaded { .. } | ManifestStatus::Cached { .. }
        )
    }
}

impl fmt::Display for ManifestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ManifestStatus::Loaded { flights, source } => {
                write!(f, "Connected to {}. Flights loaded: {}.", source, flights)
            }
            ManifestStatus::Empty { source } => write!(
                f,
                "No flights found in {}. Check the data (date in A, flight in B, bags from F).",
                source
            ),
            ManifestStatus::Cached {
                flights,
                saved_at,
                reason,
            } => write!(
                f,
                "Offline: using manifest saved at {} ({} flights). Live fetch failed: {}",
                saved_at, flights, reason
            ),
            ManifestStatus::Failed { message } => {
                write!(f, "Error loading manifest: {}", message)
            }
        }
    }
}
