//! Subject detection models (faces, poses, sampled frames).

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Bounding box in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct BoundingBox {
    /// Left edge x-coordinate
    pub x: f64,
    /// Top edge y-coordinate
    pub y: f64,
    /// Box width
    pub width: f64,
    /// Box height
    pub height: f64,
}

impl BoundingBox {
    /// Create a new bounding box.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Center x-coordinate.
    #[inline]
    pub fn cx(&self) -> f64 {
        self.x + self.width / 2.0
    }

    /// Center y-coordinate.
    #[inline]
    pub fn cy(&self) -> f64 {
        self.y + self.height / 2.0
    }

    /// Box area in pixels.
    #[inline]
    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}

/// A face detected in one sampled frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FaceDetection {
    /// Face bounding box in pixel space
    pub bbox: BoundingBox,
    /// Detector confidence in [0, 1]
    pub confidence: f64,
    /// Face center point (x, y)
    pub center: (f64, f64),
}

impl FaceDetection {
    /// Create a detection, deriving the center from the box.
    pub fn from_bbox(bbox: BoundingBox, confidence: f64) -> Self {
        let center = (bbox.cx(), bbox.cy());
        Self {
            bbox,
            confidence,
            center,
        }
    }

    /// Priority used to pick the primary face: confidence weighted by area.
    pub fn prominence(&self) -> f64 {
        self.confidence * self.bbox.area()
    }
}

/// A single pose landmark in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PoseKeypoint {
    /// Landmark index (MediaPipe-compatible numbering)
    pub id: u32,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    /// Landmark visibility in [0, 1]
    pub visibility: f64,
}

/// Detections packaged for one sampled video frame.
///
/// Produced once per sample by the subject tracker; ephemeral.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SubjectFrame {
    /// Frame timestamp in seconds
    pub timestamp: f64,
    /// Index of the frame in the source stream
    pub frame_index: u64,
    /// Faces found in the frame (may be empty)
    pub faces: Vec<FaceDetection>,
    /// Pose keypoints, only probed when no face was found
    pub pose: Option<Vec<PoseKeypoint>>,
}

impl SubjectFrame {
    /// Frame with no detections at all.
    pub fn empty(timestamp: f64, frame_index: u64) -> Self {
        Self {
            timestamp,
            frame_index,
            faces: Vec::new(),
            pose: None,
        }
    }

    /// Whether any face was detected.
    pub fn has_faces(&self) -> bool {
        !self.faces.is_empty()
    }

    /// Whether a pose was detected.
    pub fn has_pose(&self) -> bool {
        self.pose.as_ref().is_some_and(|kps| !kps.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bbox_center() {
        let b = BoundingBox::new(100.0, 200.0, 50.0, 80.0);
        assert_eq!(b.cx(), 125.0);
        assert_eq!(b.cy(), 240.0);
        assert_eq!(b.area(), 4000.0);
    }

    #[test]
    fn test_prominence_prefers_large_confident_faces() {
        let small = FaceDetection::from_bbox(BoundingBox::new(0.0, 0.0, 10.0, 10.0), 0.9);
        let large = FaceDetection::from_bbox(BoundingBox::new(0.0, 0.0, 100.0, 100.0), 0.6);
        assert!(large.prominence() > small.prominence());
    }

    #[test]
    fn test_empty_frame() {
        let frame = SubjectFrame::empty(1.5, 45);
        assert!(!frame.has_faces());
        assert!(!frame.has_pose());
    }
}
