//! Target aspect ratios and crop region models.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Target aspect ratio for reframing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum AspectRatio {
    /// 9:16 vertical (Shorts/Reels/TikTok)
    #[default]
    Vertical,
    /// 1:1 square
    Square,
    /// 16:9 landscape
    Landscape,
}

impl AspectRatio {
    /// All ratios a crop plan is produced for.
    pub const ALL: &'static [AspectRatio] =
        &[AspectRatio::Vertical, AspectRatio::Square, AspectRatio::Landscape];

    /// Ratio label as used in plan keys and filenames.
    pub fn as_str(&self) -> &'static str {
        match self {
            AspectRatio::Vertical => "9:16",
            AspectRatio::Square => "1:1",
            AspectRatio::Landscape => "16:9",
        }
    }

    /// Crop rectangle size for a source frame of `(width, height)`.
    ///
    /// The crop always spans the constraining source dimension:
    /// vertical keeps full height, landscape keeps full width, square
    /// takes the smaller dimension.
    pub fn crop_size(&self, width: u32, height: u32) -> (u32, u32) {
        match self {
            AspectRatio::Vertical => {
                let w = (height as f64 * 9.0 / 16.0).round() as u32;
                (w.min(width), height)
            }
            AspectRatio::Square => {
                let side = width.min(height);
                (side, side)
            }
            AspectRatio::Landscape => {
                let h = (width as f64 * 9.0 / 16.0).round() as u32;
                (width, h.min(height))
            }
        }
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AspectRatio {
    type Err = AspectRatioParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "9:16" | "vertical" => Ok(AspectRatio::Vertical),
            "1:1" | "square" => Ok(AspectRatio::Square),
            "16:9" | "landscape" => Ok(AspectRatio::Landscape),
            _ => Err(AspectRatioParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Error)]
#[error("Unknown aspect ratio: {0}")]
pub struct AspectRatioParseError(String);

/// Which signal determined a crop region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TrackingMethod {
    /// Centered on the primary detected face
    Face,
    /// Centered on the torso centroid from pose keypoints
    Pose,
    /// Centered on the frame midpoint (no subject found)
    Center,
}

/// A subject-centered crop rectangle for one sampled timestamp.
///
/// One sequence is produced per target aspect ratio and consumed by the
/// renderer. Coordinates are pixels in the source frame; the rectangle
/// always lies fully within the frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CropRegion {
    /// Sample timestamp in seconds
    pub timestamp: f64,
    /// Left edge
    pub x: u32,
    /// Top edge
    pub y: u32,
    pub width: u32,
    pub height: u32,
    /// Confidence of the signal that positioned the crop
    pub confidence: f64,
    /// Signal that positioned the crop
    pub tracking_method: TrackingMethod,
}

impl CropRegion {
    /// Whether the rectangle lies fully within a frame of the given size.
    pub fn is_within(&self, frame_width: u32, frame_height: u32) -> bool {
        self.x + self.width <= frame_width && self.y + self.height <= frame_height
    }
}
