//! Generic error handling utilities
//!
//! Provides unified error handling that can work across the manifest, selection
//! and configuration error types while keeping operator-facing messages short.

/// Trait for errors that can distinguish between user-actionable and system errors
///
/// User-actionable errors (a blank flight number, a malformed sheet) carry a
/// message the operator can act on. System errors (IO, network) show generic
/// context and keep the details at debug level.
///
/// When `is_user_actionable()` returns `true`, `user_message()` should return
/// `Some(message)`. When it returns `false`, `user_message()` should return `None`.
pub trait ContextualError: std::error::Error {
    /// Returns true if this error carries a message to show the operator directly
    fn is_user_actionable(&self) -> bool;

    /// Returns the specific user message if this is a user-actionable error
    fn user_message(&self) -> Option<&str>;
}

/// Text to show the operator for an error, falling back to the operation context
pub fn operator_message<E: ContextualError>(error: &E, operation_context: &str) -> String {
    match (error.is_user_actionable(), error.user_message()) {
        (true, Some(message)) => message.to_string(),
        _ => format!("{}: {}", operation_context, error),
    }
}

/// Log errors with appropriate detail level based on error specificity
///
/// # Examples
/// ```rust,no_run
/// # use bagcheck::core::error_handling::log_error_with_context;
/// # use bagcheck::manifest::ManifestError;
/// let error = ManifestError::Malformed { message: "row 3: missing flight".to_string() };
/// log_error_with_context(&error, "Manifest loading");
/// // Logs: "FATAL: row 3: missing flight"
/// ```
pub fn log_error_with_context<E: ContextualError + std::fmt::Display + std::fmt::Debug>(
    error: &E,
    operation_context: &str,
) {
    if error.is_user_actionable() {
        if let Some(user_msg) = error.user_message() {
            log::error!("FATAL: {}", user_msg);
        } else {
            log::error!("FATAL: {}", operation_context);
        }
    } else {
        log::error!("FATAL: {}", operation_context);
    }
    log::debug!("DETAIL: {}", error);
    log::debug!("DEBUG_DETAILS: {:?}", error);
}
