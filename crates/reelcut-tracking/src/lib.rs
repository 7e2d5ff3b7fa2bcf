//! Subject tracking and smart-crop planning for the Reelcut pipeline.
//!
//! This crate provides:
//! - Frame sampling and detector orchestration ([`tracker`])
//! - Per-aspect-ratio crop trajectories with temporal smoothing ([`planner`])
//!
//! Face and pose detectors are external collaborators injected through
//! the capability traits in [`detector`].

pub mod detector;
pub mod error;
pub mod planner;
pub mod tracker;

pub use detector::{FaceDetector, Frame, FrameSource, PoseDetector};
pub use error::{TrackingError, TrackingResult};
pub use planner::{CropPlan, CropPlanner, PlannerConfig};
pub use tracker::{SubjectTracker, TrackerConfig, TrackingQuality, TrackingSummary};
