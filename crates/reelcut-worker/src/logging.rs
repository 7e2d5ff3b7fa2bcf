//! Structured job logging.

use tracing::{error, info, Span};

use reelcut_models::JobId;

/// Structured logger carrying job context through a pipeline.
#[derive(Debug, Clone)]
pub struct JobLogger {
    job_id: String,
    operation: &'static str,
}

impl JobLogger {
    /// Create a logger for one job and operation
    /// (e.g. "detect_highlights", "render_clip").
    pub fn new(job_id: &JobId, operation: &'static str) -> Self {
        Self {
            job_id: job_id.to_string(),
            operation,
        }
    }

    /// Log a checkpoint reached during the job.
    pub fn checkpoint(&self, progress: u8, message: &str) {
        info!(
            job_id = %self.job_id,
            operation = self.operation,
            progress,
            "{}", message
        );
    }

    /// Log successful completion.
    pub fn completed(&self, message: &str) {
        info!(
            job_id = %self.job_id,
            operation = self.operation,
            "Job completed: {}", message
        );
    }

    /// Log terminal failure.
    pub fn failed(&self, message: &str) {
        error!(
            job_id = %self.job_id,
            operation = self.operation,
            "Job failed: {}", message
        );
    }

    /// Tracing span carrying the job context.
    pub fn span(&self) -> Span {
        tracing::info_span!("job", job_id = %self.job_id, operation = self.operation)
    }
}
