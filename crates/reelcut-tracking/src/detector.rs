//! Capability traits for frame decoding and subject detection.
//!
//! Detector models are expensive to initialize and are shared as
//! process-wide read-only singletons (`Arc<dyn ...>`) across jobs.

use reelcut_models::{FaceDetection, PoseKeypoint};

use crate::error::TrackingResult;

/// One decoded video frame.
///
/// Pixel data is packed RGB24; detectors interpret it themselves.
#[derive(Debug, Clone)]
pub struct Frame {
    /// Index of the frame in the source stream
    pub index: u64,
    /// Presentation timestamp in seconds
    pub timestamp: f64,
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

/// Sequential supplier of decoded frames for one video.
pub trait FrameSource {
    /// Next frame, or `None` at end of stream.
    fn next_frame(&mut self) -> TrackingResult<Option<Frame>>;

    /// Source dimensions `(width, height)`.
    fn dimensions(&self) -> (u32, u32);
}

/// Face detector yielding zero or more detections per frame.
pub trait FaceDetector: Send + Sync {
    fn detect_faces(&self, frame: &Frame) -> TrackingResult<Vec<FaceDetection>>;
}

/// Pose detector yielding body keypoints, if a person is visible.
pub trait PoseDetector: Send + Sync {
    fn detect_pose(&self, frame: &Frame) -> TrackingResult<Option<Vec<PoseKeypoint>>>;
}
