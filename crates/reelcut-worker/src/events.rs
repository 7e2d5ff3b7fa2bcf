//! Stage completion events.
//!
//! A completed pipeline publishes a stage event instead of invoking the
//! next stage directly; orchestration code outside this core decides
//! what runs next. This keeps the stages decoupled.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use reelcut_models::{JobId, VideoId};
use reelcut_tracking::TrackingQuality;

/// Events published when a pipeline stage finishes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StageEvent {
    /// Highlight detection finished for a video
    HighlightsDetected {
        video_id: VideoId,
        job_id: JobId,
        count: usize,
    },
    /// Subject tracking and crop planning finished for a video
    SubjectAnalysisReady {
        video_id: VideoId,
        job_id: JobId,
        quality: TrackingQuality,
    },
    /// One clip render finished
    RenderFinished {
        video_id: VideoId,
        job_id: JobId,
        output_path: String,
    },
}

/// Destination for stage events.
#[async_trait]
pub trait EventSink: Send + Sync {
    async fn publish(&self, event: StageEvent);
}

/// Sink that drops all events, for callers without orchestration.
pub struct NullEventSink;

#[async_trait]
impl EventSink for NullEventSink {
    async fn publish(&self, _event: StageEvent) {}
}
