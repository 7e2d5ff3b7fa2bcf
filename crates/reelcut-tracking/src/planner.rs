//! Crop region planning: subject detections to smoothed crop trajectories.

use std::collections::HashMap;

use tracing::debug;

use reelcut_models::{AspectRatio, CropRegion, PoseKeypoint, SubjectFrame, TrackingMethod};

/// MediaPipe landmark indices for shoulders and hips.
const TORSO_KEYPOINTS: &[u32] = &[11, 12, 23, 24];

/// Planner tuning.
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// EMA factor for positional smoothing (weight of the raw sample)
    pub smoothing_alpha: f64,
    /// Confidence assigned to crops not positioned by a face
    pub fallback_confidence: f64,
    /// Minimum keypoint visibility for the torso centroid
    pub min_keypoint_visibility: f64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            smoothing_alpha: 0.3,
            fallback_confidence: 0.5,
            min_keypoint_visibility: 0.5,
        }
    }
}

/// Crop trajectories for every target aspect ratio.
pub type CropPlan = HashMap<AspectRatio, Vec<CropRegion>>;

/// Converts subject detections into a smoothed per-timestamp crop
/// rectangle for each target aspect ratio.
pub struct CropPlanner {
    config: PlannerConfig,
    frame_width: u32,
    frame_height: u32,
}

impl CropPlanner {
    /// Create a planner for a source of the given dimensions.
    pub fn new(config: PlannerConfig, frame_width: u32, frame_height: u32) -> Self {
        Self {
            config,
            frame_width,
            frame_height,
        }
    }

    /// Plan crop trajectories for all target aspect ratios.
    pub fn plan_all(&self, frames: &[SubjectFrame]) -> CropPlan {
        AspectRatio::ALL
            .iter()
            .map(|ratio| (*ratio, self.plan(frames, *ratio)))
            .collect()
    }

    /// Plan the crop trajectory for one target aspect ratio.
    ///
    /// Raw regions follow the Face -> Pose -> Center priority chain, then
    /// positions are smoothed in timestamp order.
    pub fn plan(&self, frames: &[SubjectFrame], ratio: AspectRatio) -> Vec<CropRegion> {
        let raw: Vec<CropRegion> = frames
            .iter()
            .map(|frame| self.raw_region(frame, ratio))
            .collect();

        let smoothed = smooth_positions(&raw, self.config.smoothing_alpha);
        debug!(
            ratio = %ratio,
            regions = smoothed.len(),
            "Planned crop trajectory"
        );
        smoothed
    }

    /// Compute the unsmoothed crop for one sampled frame.
    fn raw_region(&self, frame: &SubjectFrame, ratio: AspectRatio) -> CropRegion {
        // Face first: the largest, most confident face wins
        if let Some(primary) = frame
            .faces
            .iter()
            .max_by(|a, b| {
                a.prominence()
                    .partial_cmp(&b.prominence())
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
        {
            return self.region_around(
                frame.timestamp,
                primary.center,
                ratio,
                primary.confidence,
                TrackingMethod::Face,
            );
        }

        // Pose next: torso centroid over visible shoulder/hip keypoints
        if let Some(centroid) = frame
            .pose
            .as_deref()
            .and_then(|kps| self.torso_centroid(kps))
        {
            return self.region_around(
                frame.timestamp,
                centroid,
                ratio,
                self.config.fallback_confidence,
                TrackingMethod::Pose,
            );
        }

        // Center fallback
        let center = (
            self.frame_width as f64 / 2.0,
            self.frame_height as f64 / 2.0,
        );
        self.region_around(
            frame.timestamp,
            center,
            ratio,
            self.config.fallback_confidence,
            TrackingMethod::Center,
        )
    }

    /// Centroid of visible torso keypoints, if any qualify.
    fn torso_centroid(&self, keypoints: &[PoseKeypoint]) -> Option<(f64, f64)> {
        let torso: Vec<&PoseKeypoint> = keypoints
            .iter()
            .filter(|kp| {
                TORSO_KEYPOINTS.contains(&kp.id)
                    && kp.visibility > self.config.min_keypoint_visibility
            })
            .collect();

        if torso.is_empty() {
            return None;
        }

        let n = torso.len() as f64;
        let cx = torso.iter().map(|kp| kp.x).sum::<f64>() / n;
        let cy = torso.iter().map(|kp| kp.y).sum::<f64>() / n;
        Some((cx, cy))
    }

    /// Size the crop for the ratio and clamp it around the center point.
    fn region_around(
        &self,
        timestamp: f64,
        center: (f64, f64),
        ratio: AspectRatio,
        confidence: f64,
        tracking_method: TrackingMethod,
    ) -> CropRegion {
        let (crop_w, crop_h) = ratio.crop_size(self.frame_width, self.frame_height);

        let max_x = (self.frame_width - crop_w) as f64;
        let max_y = (self.frame_height - crop_h) as f64;
        let x = (center.0 - crop_w as f64 / 2.0).clamp(0.0, max_x).round() as u32;
        let y = (center.1 - crop_h as f64 / 2.0).clamp(0.0, max_y).round() as u32;

        CropRegion {
            timestamp,
            x,
            y,
            width: crop_w,
            height: crop_h,
            confidence,
            tracking_method,
        }
    }
}

/// Smooth x/y with an exponential moving average against the previous
/// smoothed region. Size, confidence, and tracking method pass through.
///
/// This only reduces positional jitter between sparse samples; it does
/// not interpolate frames between samples.
fn smooth_positions(regions: &[CropRegion], alpha: f64) -> Vec<CropRegion> {
    if regions.len() <= 1 {
        return regions.to_vec();
    }

    let mut smoothed = Vec::with_capacity(regions.len());
    smoothed.push(regions[0]);

    for raw in &regions[1..] {
        let prev: &CropRegion = smoothed.last().expect("seeded with first region");
        let x = (prev.x as f64 * (1.0 - alpha) + raw.x as f64 * alpha).round() as u32;
        let y = (prev.y as f64 * (1.0 - alpha) + raw.y as f64 * alpha).round() as u32;
        smoothed.push(CropRegion { x, y, ..*raw });
    }

    smoothed
}
