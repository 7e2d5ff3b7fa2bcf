//! Collaborator store traits.
//!
//! The core owns no wire protocol or storage schema; these narrow
//! contracts are implemented by the surrounding service. All methods
//! are async since real implementations talk to databases and object
//! storage.

use async_trait::async_trait;

use reelcut_models::{Highlight, JobId, RenderJob, SceneCut, TranscriptSegment, VideoId};

use crate::error::WorkerResult;

/// Read-only transcript access for a video.
///
/// A missing transcript is a fatal precondition for highlight detection;
/// implementations return [`crate::WorkerError::NotFound`].
#[async_trait]
pub trait TranscriptSource: Send + Sync {
    async fn transcript(&self, video_id: &VideoId) -> WorkerResult<Vec<TranscriptSegment>>;
}

/// Read-only sorted scene-cut timestamps for a video.
///
/// An empty list is valid; no scene bonus is applied.
#[async_trait]
pub trait SceneCutSource: Send + Sync {
    async fn scene_cuts(&self, video_id: &VideoId) -> WorkerResult<Vec<SceneCut>>;
}

/// Job record store mutated by the orchestrator.
#[async_trait]
pub trait JobStore: Send + Sync {
    async fn create(&self, job: &RenderJob) -> WorkerResult<()>;
    async fn update(&self, job: &RenderJob) -> WorkerResult<()>;
    async fn get(&self, job_id: &JobId) -> WorkerResult<Option<RenderJob>>;
}

/// Persistence for selected highlights.
#[async_trait]
pub trait HighlightStore: Send + Sync {
    async fn create(&self, highlight: &Highlight) -> WorkerResult<()>;
}

/// Blob storage for source media and rendered clips.
#[async_trait]
pub trait MediaStore: Send + Sync {
    async fn download(&self, path: &str) -> WorkerResult<Vec<u8>>;

    /// Upload bytes, returning the stored path.
    async fn upload(&self, path: &str, bytes: Vec<u8>) -> WorkerResult<String>;
}
