//! Subject analysis job pipeline.
//!
//! Downloads source media, tracks subjects across sampled frames, and
//! plans crop trajectories for every target aspect ratio.

use std::path::Path;
use std::sync::Arc;

use metrics::counter;
use serde::{Deserialize, Serialize};
use tracing::{info, Instrument};

use reelcut_models::{JobType, RenderJob, VideoId};
use reelcut_tracking::{
    CropPlan, CropPlanner, FrameSource, PlannerConfig, SubjectTracker, TrackerConfig,
    TrackingSummary,
};

use crate::config::WorkerConfig;
use crate::error::WorkerResult;
use crate::events::{EventSink, StageEvent};
use crate::progress::JobProgress;
use crate::store::{JobStore, MediaStore};

/// Opens a downloaded media file as a frame stream.
///
/// Implemented by the surrounding service on top of its decoder; the
/// core only consumes the resulting [`FrameSource`].
pub trait FrameDecoder: Send + Sync {
    fn open(&self, path: &Path) -> WorkerResult<Box<dyn FrameSource + Send>>;
}

/// Result of one subject analysis run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubjectAnalysis {
    pub video_id: VideoId,
    pub frame_width: u32,
    pub frame_height: u32,
    pub summary: TrackingSummary,
    pub crop_plan: CropPlan,
}

/// Runs subject tracking and crop planning for one video at a time.
pub struct SubjectAnalyzer {
    media: Arc<dyn MediaStore>,
    jobs: Arc<dyn JobStore>,
    events: Arc<dyn EventSink>,
    decoder: Arc<dyn FrameDecoder>,
    tracker: Arc<SubjectTracker>,
    config: WorkerConfig,
}

impl SubjectAnalyzer {
    pub fn new(
        media: Arc<dyn MediaStore>,
        jobs: Arc<dyn JobStore>,
        events: Arc<dyn EventSink>,
        decoder: Arc<dyn FrameDecoder>,
        tracker: Arc<SubjectTracker>,
        config: WorkerConfig,
    ) -> Self {
        Self {
            media,
            jobs,
            events,
            decoder,
            tracker,
            config,
        }
    }

    /// Tracker config matching the worker settings.
    pub fn tracker_config(config: &WorkerConfig) -> TrackerConfig {
        TrackerConfig {
            sample_rate: config.sample_rate,
        }
    }

    /// Analyze one video's subjects and plan its crop trajectories.
    ///
    /// Creates a job record and drives it to a terminal state. Detector
    /// failures on individual frames degrade to center crops; only a
    /// missing source or decode failure fails the job.
    pub async fn analyze(
        &self,
        video_id: &VideoId,
        media_path: &str,
    ) -> WorkerResult<SubjectAnalysis> {
        let job = RenderJob::new(JobType::AnalyzeSubjects, video_id.clone());
        let job_id = job.id.clone();
        let mut progress =
            JobProgress::begin(job, Arc::clone(&self.jobs), "analyze_subjects").await?;
        let span = progress.span();

        match self.run(video_id, media_path, &mut progress).instrument(span).await {
            Ok(analysis) => {
                progress
                    .complete(&format!("Tracking quality: {:?}", analysis.summary.quality))
                    .await?;
                counter!("reelcut_jobs_total", "operation" => "analyze_subjects", "outcome" => "completed")
                    .increment(1);
                self.events
                    .publish(StageEvent::SubjectAnalysisReady {
                        video_id: video_id.clone(),
                        job_id,
                        quality: analysis.summary.quality,
                    })
                    .await;
                Ok(analysis)
            }
            Err(e) => {
                progress.fail(&e.to_string()).await;
                counter!("reelcut_jobs_total", "operation" => "analyze_subjects", "outcome" => "failed")
                    .increment(1);
                Err(e)
            }
        }
    }

    async fn run(
        &self,
        video_id: &VideoId,
        media_path: &str,
        progress: &mut JobProgress,
    ) -> WorkerResult<SubjectAnalysis> {
        progress.start(10, "Subject analysis started").await?;

        // Scratch space is dropped (and deleted) on every exit path
        tokio::fs::create_dir_all(&self.config.work_dir).await?;
        let workdir = tempfile::tempdir_in(&self.config.work_dir)?;
        let bytes = self.media.download(media_path).await?;
        let local_path = workdir.path().join("source.mp4");
        tokio::fs::write(&local_path, &bytes).await?;

        let mut source = self.decoder.open(&local_path)?;
        let (frame_width, frame_height) = source.dimensions();
        if frame_width == 0 || frame_height == 0 {
            return Err(reelcut_tracking::TrackingError::InvalidDimensions {
                width: frame_width,
                height: frame_height,
            }
            .into());
        }
        progress.checkpoint(30, "Source media decoded").await?;

        let frames = self.tracker.track(source.as_mut())?;
        progress
            .checkpoint(60, &format!("Tracked {} sampled frames", frames.len()))
            .await?;

        let planner = CropPlanner::new(
            PlannerConfig {
                smoothing_alpha: self.config.smoothing_alpha,
                ..PlannerConfig::default()
            },
            frame_width,
            frame_height,
        );
        let crop_plan = planner.plan_all(&frames);
        progress.checkpoint(80, "Crop trajectories planned").await?;

        let summary = TrackingSummary::from_frames(&frames);
        info!(
            video_id = %video_id,
            face_rate = summary.face_detection_rate,
            quality = ?summary.quality,
            "Subject analysis finished"
        );

        Ok(SubjectAnalysis {
            video_id: video_id.clone(),
            frame_width,
            frame_height,
            summary,
            crop_plan,
        })
    }
}
