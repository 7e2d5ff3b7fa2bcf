//! Error types for signal analysis.

use thiserror::Error;

/// Result type for signal operations.
pub type SignalResult<T> = Result<T, SignalError>;

/// Errors from signal analysis.
///
/// Classifier/extractor/summarizer failures never reach callers of the
/// scorer: they are recovered with documented fallbacks. These variants
/// exist for the capability traits themselves and for invariant
/// violations when assembling highlights.
#[derive(Debug, Error)]
pub enum SignalError {
    #[error("Model inference failed: {0}")]
    Inference(String),

    #[error("Model error: {0}")]
    Model(#[from] reelcut_models::ModelError),
}

impl SignalError {
    /// Create an inference failure error.
    pub fn inference(message: impl Into<String>) -> Self {
        Self::Inference(message.into())
    }
}
