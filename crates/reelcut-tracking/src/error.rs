//! Error types for tracking operations.

use thiserror::Error;

/// Result type for tracking operations.
pub type TrackingResult<T> = Result<T, TrackingError>;

/// Errors from subject tracking and crop planning.
///
/// Detector failures on individual frames are recovered inside the
/// tracker (Face -> Pose -> Center fallback); only frame decoding and
/// invalid-input problems surface here.
#[derive(Debug, Error)]
pub enum TrackingError {
    #[error("Frame decode failed: {0}")]
    DecodeFailed(String),

    #[error("Face detection failed: {0}")]
    FaceDetectionFailed(String),

    #[error("Pose detection failed: {0}")]
    PoseDetectionFailed(String),

    #[error("Invalid frame dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
}

impl TrackingError {
    pub fn decode_failed(message: impl Into<String>) -> Self {
        Self::DecodeFailed(message.into())
    }
}
