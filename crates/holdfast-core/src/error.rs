//! Core error types for holdfast-core.

use thiserror::Error;

/// Core error type for holdfast-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Exercise id not present in the catalog.
    #[error("Unknown exercise: {0}")]
    UnknownExercise(String),

    /// Malformed plan input: empty pyramid, a zero-rep set, or a
    /// non-positive duration.
    #[error("Invalid plan: {0}")]
    InvalidPlan(String),

    /// Control call that the current timer state cannot honor.
    #[error("Invalid control call: {0}")]
    InvalidControlCall(&'static str),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
