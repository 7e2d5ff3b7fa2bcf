//! Subject tracking: frame sampling and detector orchestration.

use std::sync::Arc;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use reelcut_models::SubjectFrame;

use crate::detector::{FaceDetector, FrameSource, PoseDetector};
use crate::error::TrackingResult;

/// Tracker tuning.
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    /// Process every Nth frame
    pub sample_rate: u64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self { sample_rate: 10 }
    }
}

/// Samples frames and packages face/pose detections per sample.
///
/// Pure orchestration: the detectors are external collaborators, and a
/// detector failure on a frame is never fatal; the frame simply carries
/// no detections and falls through to a center crop downstream.
pub struct SubjectTracker {
    face: Arc<dyn FaceDetector>,
    pose: Arc<dyn PoseDetector>,
    config: TrackerConfig,
}

impl SubjectTracker {
    pub fn new(
        face: Arc<dyn FaceDetector>,
        pose: Arc<dyn PoseDetector>,
        config: TrackerConfig,
    ) -> Self {
        Self { face, pose, config }
    }

    /// Walk the frame stream and collect detections for sampled frames.
    ///
    /// The pose detector only runs when the face detector found nothing.
    pub fn track(&self, source: &mut dyn FrameSource) -> TrackingResult<Vec<SubjectFrame>> {
        // A zero rate from a misconfigured environment means every frame
        let sample_rate = self.config.sample_rate.max(1);
        let mut samples = Vec::new();

        while let Some(frame) = source.next_frame()? {
            if frame.index % sample_rate != 0 {
                continue;
            }

            let faces = match self.face.detect_faces(&frame) {
                Ok(faces) => faces,
                Err(e) => {
                    warn!(
                        frame_index = frame.index,
                        error = %e,
                        "Face detection failed; frame treated as empty"
                    );
                    Vec::new()
                }
            };

            let pose = if faces.is_empty() {
                match self.pose.detect_pose(&frame) {
                    Ok(pose) => pose,
                    Err(e) => {
                        warn!(
                            frame_index = frame.index,
                            error = %e,
                            "Pose detection failed; frame treated as empty"
                        );
                        None
                    }
                }
            } else {
                None
            };

            samples.push(SubjectFrame {
                timestamp: frame.timestamp,
                frame_index: frame.index,
                faces,
                pose,
            });
        }

        debug!(samples = samples.len(), "Subject tracking finished");
        Ok(samples)
    }
}

/// How well subjects were tracked across a video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TrackingQuality {
    High,
    Medium,
    Low,
}

/// Aggregate detection statistics for a tracked video.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TrackingSummary {
    /// Fraction of sampled frames with at least one face
    pub face_detection_rate: f64,
    /// Fraction of sampled frames with a pose (probed only when faceless)
    pub pose_detection_rate: f64,
    /// Total faces across all sampled frames
    pub total_faces: u64,
    /// Coarse quality bucket from the face rate
    pub quality: TrackingQuality,
}

impl TrackingSummary {
    /// Summarize tracked frames. High quality needs faces in more than
    /// 70% of samples, medium more than 30%.
    pub fn from_frames(frames: &[SubjectFrame]) -> Self {
        if frames.is_empty() {
            return Self {
                face_detection_rate: 0.0,
                pose_detection_rate: 0.0,
                total_faces: 0,
                quality: TrackingQuality::Low,
            };
        }

        let n = frames.len() as f64;
        let face_detection_rate = frames.iter().filter(|f| f.has_faces()).count() as f64 / n;
        let pose_detection_rate = frames.iter().filter(|f| f.has_pose()).count() as f64 / n;
        let total_faces = frames.iter().map(|f| f.faces.len() as u64).sum();

        let quality = if face_detection_rate > 0.7 {
            TrackingQuality::High
        } else if face_detection_rate > 0.3 {
            TrackingQuality::Medium
        } else {
            TrackingQuality::Low
        };

        Self {
            face_detection_rate,
            pose_detection_rate,
            total_faces,
            quality,
        }
    }
}
