//! Job progress tracking through the job store.

use std::sync::Arc;

use reelcut_models::RenderJob;

use crate::error::WorkerResult;
use crate::logging::JobLogger;
use crate::store::JobStore;

/// Drives one job record through its checkpoints.
///
/// Owns the job for the duration of a pipeline run; every transition is
/// written through to the job store so callers observe live progress.
pub struct JobProgress {
    job: RenderJob,
    store: Arc<dyn JobStore>,
    logger: JobLogger,
}

impl JobProgress {
    /// Register a new pending job and return its tracker.
    pub async fn begin(
        job: RenderJob,
        store: Arc<dyn JobStore>,
        operation: &'static str,
    ) -> WorkerResult<Self> {
        let logger = JobLogger::new(&job.id, operation);
        store.create(&job).await?;
        Ok(Self { job, store, logger })
    }

    /// Move to `Processing` and record the first checkpoint.
    pub async fn start(&mut self, progress: u8, message: &str) -> WorkerResult<()> {
        self.job = self.job.clone().start().with_progress(progress);
        self.logger.checkpoint(progress, message);
        self.store.update(&self.job).await
    }

    /// Record an intermediate checkpoint. Progress is monotone.
    pub async fn checkpoint(&mut self, progress: u8, message: &str) -> WorkerResult<()> {
        self.job = self.job.clone().with_progress(progress);
        self.logger.checkpoint(progress, message);
        self.store.update(&self.job).await
    }

    /// Terminal success: progress 100.
    pub async fn complete(&mut self, message: &str) -> WorkerResult<()> {
        self.job = self.job.clone().complete();
        self.logger.completed(message);
        self.store.update(&self.job).await
    }

    /// Terminal failure with a captured error message.
    ///
    /// Best-effort: a store failure while recording the failure is
    /// logged but not surfaced, so the original error wins.
    pub async fn fail(&mut self, error: &str) {
        self.job = self.job.clone().fail(error);
        self.logger.failed(error);
        if let Err(e) = self.store.update(&self.job).await {
            tracing::error!(job_id = %self.job.id, "Could not record job failure: {e}");
        }
    }

    /// Current job snapshot.
    pub fn job(&self) -> &RenderJob {
        &self.job
    }

    /// Tracing span carrying the job context, for instrumenting the
    /// pipeline run.
    pub fn span(&self) -> tracing::Span {
        self.logger.span()
    }
}
