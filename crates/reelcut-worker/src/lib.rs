//! Job pipelines and render orchestration for the Reelcut core.
//!
//! This crate provides:
//! - Highlight detection and subject analysis job pipelines
//! - The render orchestrator state machine
//! - Collaborator store traits (job records, media, transcripts, scene cuts)
//! - Stage event emission for cross-stage orchestration
//! - Worker configuration and structured job logging
//!
//! Jobs are pulled from an external queue by the surrounding service;
//! each pipeline here processes one job synchronously within its worker.

pub mod config;
pub mod error;
pub mod events;
pub mod highlight_job;
pub mod logging;
pub mod progress;
pub mod render;
pub mod store;
pub mod telemetry;
pub mod tracking_job;

pub use config::WorkerConfig;
pub use error::{WorkerError, WorkerResult};
pub use events::{EventSink, NullEventSink, StageEvent};
pub use highlight_job::HighlightDetector;
pub use logging::JobLogger;
pub use progress::JobProgress;
pub use render::{ExportSettings, RenderOrchestrator, RenderRequest, Renderer};
pub use store::{HighlightStore, JobStore, MediaStore, SceneCutSource, TranscriptSource};
pub use tracking_job::{FrameDecoder, SubjectAnalysis, SubjectAnalyzer};
