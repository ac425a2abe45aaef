//! Manifest Error Types

use crate::core::error_handling::ContextualError;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ManifestError {
    /// The manifest text could not be parsed
    #[error("Malformed manifest: {message}")]
    Malformed { message: String },

    /// The manifest file could not be read
    #[error("Cannot read manifest '{path}': {message}")]
    Io { path: String, message: String },

    /// The remote sheet could not be fetched
    #[error("Manifest request failed: {message}")]
    Http { message: String },

    /// The offline copy could not be read or written
    #[error("Manifest cache error: {message}")]
    Cache { message: String },
}

impl ContextualError for ManifestError {
    fn is_user_actionable(&self) -> bool {
        matches!(self, ManifestError::Malformed { .. })
    }

    fn user_message(&self) -> Option<&str> {
        match self {
            ManifestError::Malformed { message } => Some(message),
            _ => None,
        }
    }
}

/// Result type for manifest operations
pub type ManifestResult<T> = Result<T, ManifestError>;
