//! Classification outcomes

use std::fmt;

use crate::core::styles::StyleRole;
use crate::manifest::FlightKey;

/// Result of checking one scanned code
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A code arrived before any flight was loaded
    NoFlightSelected { code: String },
    /// The bag belongs to the selected flight
    MatchCurrent {
        code: String,
        flight: FlightKey,
        newly_scanned: bool,
    },
    /// The bag is listed on a different flight
    MatchOther { code: String, flight: FlightKey },
    /// The bag is not in the manifest at all
    NotFound { code: String },
}

impl Outcome {
    pub fn code(&self) -> &str {
        match self {
            Outcome::NoFlightSelected { code }
            | Outcome::MatchCurrent { code, .. }
            | Outcome::MatchOther { code, .. }
            | Outcome::NotFound { code } => code,
        }
    }

    pub fn role(&self) -> StyleRole {
        match self {
            Outcome::MatchCurrent { .. } => StyleRole::Ok,
            Outcome::MatchOther { .. } => StyleRole::Warn,
            Outcome::NoFlightSelected { .. } | Outcome::NotFound { .. } => StyleRole::Failure,
        }
    }

    /// Short tag shown in front of the message
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::MatchCurrent { .. } => "OK",
            Outcome::MatchOther { .. } => "WRONG FLIGHT",
            Outcome::NotFound { .. } => "UNKNOWN",
            Outcome::NoFlightSelected { .. } => "NO FLIGHT",
        }
    }

    pub fn is_match(&self) -> bool {
        matches!(self, Outcome::MatchCurrent { .. })
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::NoFlightSelected { code } => {
                write!(f, "Code {}: no flight selected yet.", code)
            }
            Outcome::MatchCurrent {
                code,
                flight,
                newly_scanned,
            } => {
                write!(f, "{} belongs to the current flight ({}).", code, flight)?;
                if !newly_scanned {
                    write!(f, " Already scanned.")?;
                }
                Ok(())
            }
            Outcome::MatchOther { code, flight } => write!(
                f,
                "{} is NOT on this flight's list. Found on flight {} of {}.",
                code, flight.flight_number, flight.date
            ),
            Outcome::NotFound { code } => {
                write!(f, "{} was not found on any flight in the manifest.", code)
            }
        }
    }
}
