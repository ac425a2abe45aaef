//! Flight selection errors

use crate::core::error_handling::ContextualError;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SelectionError {
    /// No flight in the manifest has the requested date and number
    #[error("Flight {flight_number} on {date} is not in the manifest")]
    NotFound { date: String, flight_number: String },

    /// The request cannot be answered: blank input or nothing loaded
    #[error("{message}")]
    InvalidSelection { message: String },
}

impl ContextualError for SelectionError {
    fn is_user_actionable(&self) -> bool {
        matches!(self, SelectionError::InvalidSelection { .. })
    }

    fn user_message(&self) -> Option<&str> {
        match self {
            SelectionError::InvalidSelection { message } => Some(message),
            SelectionError::NotFound { .. } => None,
        }
    }
}

/// Result type for flight selection
pub type SelectionResult<T> = Result<T, SelectionError>;
