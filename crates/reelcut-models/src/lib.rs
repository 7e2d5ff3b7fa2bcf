//! Shared data models for the Reelcut highlight pipeline.
//!
//! This crate provides Serde-serializable types for:
//! - Transcript segments and scene cuts (analysis inputs)
//! - Segment scores, candidate windows, and highlights
//! - Subject detections and crop regions
//! - Render jobs and their state machine

pub mod crop;
pub mod error;
pub mod highlight;
pub mod job;
pub mod subject;
pub mod transcript;

// Re-export common types
pub use crop::{AspectRatio, AspectRatioParseError, CropRegion, TrackingMethod};
pub use error::{ModelError, ModelResult};
pub use highlight::{CandidateWindow, Highlight, SegmentScore};
pub use job::{JobId, JobStatus, JobType, RenderJob, VideoId};
pub use subject::{BoundingBox, FaceDetection, PoseKeypoint, SubjectFrame};
pub use transcript::{SceneCut, TranscriptSegment, WordTimestamp};
