//! Highlight detection job pipeline.
//!
//! Fuses transcript scoring with scene cuts to produce a small set of
//! non-overlapping highlights for a video, tracking job progress
//! through the job store.

use std::sync::Arc;

use metrics::counter;
use tracing::{info, Instrument};

use reelcut_models::{Highlight, JobType, RenderJob, SegmentScore, VideoId};
use reelcut_signals::{CandidateWindowBuilder, HighlightSelector, SegmentScorer, WindowConfig};

use crate::config::WorkerConfig;
use crate::error::{WorkerError, WorkerResult};
use crate::events::{EventSink, StageEvent};
use crate::progress::JobProgress;
use crate::store::{HighlightStore, JobStore, SceneCutSource, TranscriptSource};

/// Runs highlight detection for one video at a time.
///
/// The scorer (and the models behind it) is shared across jobs; all
/// per-job state lives in the job record.
pub struct HighlightDetector {
    transcripts: Arc<dyn TranscriptSource>,
    scene_cuts: Arc<dyn SceneCutSource>,
    jobs: Arc<dyn JobStore>,
    highlights: Arc<dyn HighlightStore>,
    events: Arc<dyn EventSink>,
    scorer: Arc<SegmentScorer>,
    config: WorkerConfig,
}

impl HighlightDetector {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        transcripts: Arc<dyn TranscriptSource>,
        scene_cuts: Arc<dyn SceneCutSource>,
        jobs: Arc<dyn JobStore>,
        highlights: Arc<dyn HighlightStore>,
        events: Arc<dyn EventSink>,
        scorer: Arc<SegmentScorer>,
        config: WorkerConfig,
    ) -> Self {
        Self {
            transcripts,
            scene_cuts,
            jobs,
            highlights,
            events,
            scorer,
            config,
        }
    }

    /// Detect and persist highlights for a video.
    ///
    /// Creates a job record and drives it to a terminal state; a missing
    /// transcript fails the job with no partial highlights emitted.
    pub async fn detect(&self, video_id: &VideoId) -> WorkerResult<Vec<Highlight>> {
        let job = RenderJob::new(JobType::DetectHighlights, video_id.clone());
        let job_id = job.id.clone();
        let mut progress =
            JobProgress::begin(job, Arc::clone(&self.jobs), "detect_highlights").await?;
        let span = progress.span();

        match self.run(video_id, &mut progress).instrument(span).await {
            Ok(highlights) => {
                progress
                    .complete(&format!("Found {} highlights", highlights.len()))
                    .await?;
                counter!("reelcut_jobs_total", "operation" => "detect_highlights", "outcome" => "completed")
                    .increment(1);
                self.events
                    .publish(StageEvent::HighlightsDetected {
                        video_id: video_id.clone(),
                        job_id,
                        count: highlights.len(),
                    })
                    .await;
                Ok(highlights)
            }
            Err(e) => {
                progress.fail(&e.to_string()).await;
                counter!("reelcut_jobs_total", "operation" => "detect_highlights", "outcome" => "failed")
                    .increment(1);
                Err(e)
            }
        }
    }

    async fn run(
        &self,
        video_id: &VideoId,
        progress: &mut JobProgress,
    ) -> WorkerResult<Vec<Highlight>> {
        progress.start(10, "Highlight detection started").await?;

        let transcript = self.transcripts.transcript(video_id).await?;
        if transcript.is_empty() {
            return Err(WorkerError::not_found(format!(
                "No transcript for video {video_id}"
            )));
        }

        // Empty is valid: no scene bonus will apply
        let scene_cuts = self.scene_cuts.scene_cuts(video_id).await?;
        progress
            .checkpoint(30, &format!("Loaded {} scene cuts", scene_cuts.len()))
            .await?;

        let scores: Vec<SegmentScore> = transcript
            .iter()
            .map(|segment| self.scorer.score(segment))
            .collect();
        progress
            .checkpoint(60, &format!("Scored {} segments", scores.len()))
            .await?;

        let windows =
            CandidateWindowBuilder::new(WindowConfig::default()).build(&scores, &scene_cuts);
        let highlights =
            HighlightSelector::new(self.config.max_highlights).select(video_id, windows)?;
        progress
            .checkpoint(80, &format!("Selected {} highlights", highlights.len()))
            .await?;

        for highlight in &highlights {
            self.highlights.create(highlight).await?;
        }

        info!(
            video_id = %video_id,
            highlights = highlights.len(),
            "Highlight detection finished"
        );
        Ok(highlights)
    }
}
