//! Error types for model construction.

use thiserror::Error;

/// Result type for model validation.
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors raised when a model invariant is violated at construction.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Invalid time range: end ({end}) must be after start ({start})")]
    InvalidTimeRange { start: f64, end: f64 },

    #[error("Score out of range: {0} (expected 0.0..=1.0)")]
    ScoreOutOfRange(f64),
}
