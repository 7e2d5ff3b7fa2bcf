//! Render orchestration state machine.
//!
//! Drives one render job through its checkpoints:
//! job accepted (10) -> source decoded (30) -> crop applied (50) ->
//! overlays applied (80) -> encoded and uploaded (100).
//!
//! Any failure at any checkpoint moves the job directly to `Failed`
//! with the captured error message, skipping remaining checkpoints.
//! There is no automatic retry; a failed render requires a new job.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use metrics::counter;
use serde::{Deserialize, Serialize};
use tracing::{info, Instrument};

use reelcut_models::{AspectRatio, CropRegion, Highlight, JobType, RenderJob, VideoId};

use crate::config::WorkerConfig;
use crate::error::{WorkerError, WorkerResult};
use crate::events::{EventSink, StageEvent};
use crate::progress::JobProgress;
use crate::store::{JobStore, MediaStore};

/// Export settings for one clip render.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportSettings {
    /// Media-store path of the source video
    pub source_path: String,
    /// Media-store path for the rendered clip
    pub output_path: String,
    /// Burn subtitles into the clip
    #[serde(default)]
    pub burn_subtitles: bool,
    /// Optional watermark asset path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub watermark: Option<String>,
}

/// One render request: a highlight joined with its crop trajectory and
/// export settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderRequest {
    pub highlight: Highlight,
    pub aspect: AspectRatio,
    /// Crop trajectory for the requested aspect ratio
    pub crop_plan: Vec<CropRegion>,
    pub export: ExportSettings,
}

/// Performs the actual media work for a render.
///
/// Implemented by the surrounding service (FFmpeg or similar); the
/// orchestrator only sequences the stages and tracks job state. Each
/// stage reads and writes intermediates under the scoped `workdir`.
#[async_trait]
pub trait Renderer: Send + Sync {
    /// Decode the source clip interval into the workdir.
    async fn prepare(&self, source: &Path, workdir: &Path, request: &RenderRequest)
        -> WorkerResult<()>;

    /// Apply the crop/aspect transform from the request's crop plan.
    async fn apply_crop(&self, workdir: &Path, request: &RenderRequest) -> WorkerResult<()>;

    /// Apply subtitle/branding overlays, if requested.
    async fn apply_overlays(&self, workdir: &Path, request: &RenderRequest) -> WorkerResult<()>;

    /// Encode the final clip and return its bytes.
    async fn encode(&self, workdir: &Path, request: &RenderRequest) -> WorkerResult<Vec<u8>>;
}

/// Sequences render stages and owns the job state machine.
pub struct RenderOrchestrator {
    media: Arc<dyn MediaStore>,
    jobs: Arc<dyn JobStore>,
    events: Arc<dyn EventSink>,
    renderer: Arc<dyn Renderer>,
    config: WorkerConfig,
}

impl RenderOrchestrator {
    pub fn new(
        media: Arc<dyn MediaStore>,
        jobs: Arc<dyn JobStore>,
        events: Arc<dyn EventSink>,
        renderer: Arc<dyn Renderer>,
        config: WorkerConfig,
    ) -> Self {
        Self {
            media,
            jobs,
            events,
            renderer,
            config,
        }
    }

    /// Render one highlight into a clip, returning the terminal job record.
    pub async fn render(&self, request: RenderRequest) -> WorkerResult<RenderJob> {
        let video_id = request.highlight.video_id.clone();
        let job = RenderJob::new(JobType::RenderClip, video_id.clone());
        let job_id = job.id.clone();
        let mut progress = JobProgress::begin(job, Arc::clone(&self.jobs), "render_clip").await?;
        let span = progress.span();

        match self.run(&video_id, &request, &mut progress).instrument(span).await {
            Ok(output_path) => {
                progress
                    .complete(&format!("Clip uploaded to {output_path}"))
                    .await?;
                counter!("reelcut_jobs_total", "operation" => "render_clip", "outcome" => "completed")
                    .increment(1);
                self.events
                    .publish(StageEvent::RenderFinished {
                        video_id,
                        job_id,
                        output_path,
                    })
                    .await;
                Ok(progress.job().clone())
            }
            Err(e) => {
                progress.fail(&e.to_string()).await;
                counter!("reelcut_jobs_total", "operation" => "render_clip", "outcome" => "failed")
                    .increment(1);
                Ok(progress.job().clone())
            }
        }
    }

    async fn run(
        &self,
        video_id: &VideoId,
        request: &RenderRequest,
        progress: &mut JobProgress,
    ) -> WorkerResult<String> {
        validate_request(request)?;
        progress.start(10, "Render job accepted").await?;

        // Scratch space is dropped (and deleted) on every exit path
        tokio::fs::create_dir_all(&self.config.work_dir).await?;
        let workdir = tempfile::tempdir_in(&self.config.work_dir)?;

        let source_bytes = self.media.download(&request.export.source_path).await?;
        let source_path = workdir.path().join("source.mp4");
        tokio::fs::write(&source_path, &source_bytes).await?;
        self.renderer
            .prepare(&source_path, workdir.path(), request)
            .await?;
        progress.checkpoint(30, "Source media decoded").await?;

        self.renderer.apply_crop(workdir.path(), request).await?;
        progress.checkpoint(50, "Crop transform applied").await?;

        self.renderer
            .apply_overlays(workdir.path(), request)
            .await?;
        progress.checkpoint(80, "Overlays applied").await?;

        let clip = self.renderer.encode(workdir.path(), request).await?;
        let output_path = self
            .media
            .upload(&request.export.output_path, clip)
            .await?;

        info!(
            video_id = %video_id,
            highlight_id = request.highlight.id,
            output = %output_path,
            "Render finished"
        );
        Ok(output_path)
    }
}

/// Reject requests whose crop plan is empty or escapes the source frame.
fn validate_request(request: &RenderRequest) -> WorkerResult<()> {
    if request.crop_plan.is_empty() {
        return Err(WorkerError::render_failed(
            "Render request carries an empty crop plan",
        ));
    }
    for window in request.crop_plan.windows(2) {
        if window[1].timestamp < window[0].timestamp {
            return Err(WorkerError::render_failed(
                "Crop plan timestamps are not sorted",
            ));
        }
    }
    Ok(())
}
