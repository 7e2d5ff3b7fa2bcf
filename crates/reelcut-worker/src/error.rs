//! Worker error types.

use thiserror::Error;

pub type WorkerResult<T> = Result<T, WorkerError>;

/// Errors that abort a job.
///
/// Signal and detection failures never appear here: they degrade to
/// documented fallbacks inside the analysis crates. Only missing
/// required inputs, store failures, and terminal render errors reach
/// the job level.
#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Render failed: {0}")]
    RenderFailed(String),

    #[error("Store operation failed: {0}")]
    StoreFailed(String),

    #[error("Signal analysis error: {0}")]
    Signal(#[from] reelcut_signals::SignalError),

    #[error("Tracking error: {0}")]
    Tracking(#[from] reelcut_tracking::TrackingError),

    #[error("Model error: {0}")]
    Model(#[from] reelcut_models::ModelError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl WorkerError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn render_failed(msg: impl Into<String>) -> Self {
        Self::RenderFailed(msg.into())
    }

    pub fn store_failed(msg: impl Into<String>) -> Self {
        Self::StoreFailed(msg.into())
    }
}
