//! Candidate window construction.
//!
//! Groups consecutive scored segments into duration-bounded clip
//! candidates aligned to scene cuts.

use tracing::debug;

use reelcut_models::{CandidateWindow, SceneCut, SegmentScore};

/// Tuning for candidate window construction.
#[derive(Debug, Clone)]
pub struct WindowConfig {
    /// Minimum duration for an emitted window (seconds)
    pub min_duration: f64,
    /// Lower bound of the preferred clip duration (seconds)
    pub target_min: f64,
    /// Upper bound of the preferred clip duration (seconds)
    pub target_max: f64,
    /// How close a scene cut must be to a segment end to close a window (seconds)
    pub scene_cut_tolerance: f64,
    /// Score bonus per scene cut inside the window
    pub scene_bonus: f64,
    /// Score bonus per high-sentiment segment in the window
    pub emotion_bonus: f64,
    /// Sentiment threshold for the emotion bonus
    pub emotion_threshold: f64,
    /// Score multiplier for windows shorter than `target_min`
    pub short_multiplier: f64,
    /// Score multiplier for windows longer than `long_threshold`
    pub long_multiplier: f64,
    /// Duration above which the long multiplier applies (seconds)
    pub long_threshold: f64,
    /// Maximum keywords carried on a window
    pub max_keywords: usize,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            min_duration: 10.0,
            target_min: 15.0,
            target_max: 60.0,
            scene_cut_tolerance: 2.0,
            scene_bonus: 0.1,
            emotion_bonus: 0.1,
            emotion_threshold: 0.8,
            short_multiplier: 0.7,
            long_multiplier: 0.8,
            long_threshold: 45.0,
            max_keywords: 5,
        }
    }
}

/// Builds duration-bounded candidate windows from scored segments.
pub struct CandidateWindowBuilder {
    config: WindowConfig,
}

impl CandidateWindowBuilder {
    pub fn new(config: WindowConfig) -> Self {
        Self { config }
    }

    /// Group segments into candidate windows.
    ///
    /// An accumulating window closes when its duration lands in the
    /// preferred range or a scene cut falls near the current segment's
    /// end. A trailing remainder that never satisfies either condition
    /// is discarded; that is expected, not an error.
    pub fn build(&self, scores: &[SegmentScore], scene_cuts: &[SceneCut]) -> Vec<CandidateWindow> {
        let mut windows = Vec::new();
        let mut current: Vec<SegmentScore> = Vec::new();
        let mut current_start = 0.0_f64;

        for (i, score) in scores.iter().enumerate() {
            current.push(score.clone());

            let duration = score.end - current_start;
            let in_target = duration >= self.config.target_min && duration <= self.config.target_max;
            let at_scene_cut = scene_cuts
                .iter()
                .any(|cut| cut.is_near(score.end, self.config.scene_cut_tolerance));

            if in_target || at_scene_cut {
                if duration >= self.config.min_duration {
                    windows.push(self.finish_window(current_start, score.end, &current, scene_cuts));
                }

                current.clear();
                if i < scores.len() - 1 {
                    current_start = score.end;
                }
            }
        }

        debug!(
            candidates = windows.len(),
            segments = scores.len(),
            "Built candidate windows"
        );
        windows
    }

    fn finish_window(
        &self,
        start: f64,
        end: f64,
        segments: &[SegmentScore],
        scene_cuts: &[SceneCut],
    ) -> CandidateWindow {
        CandidateWindow {
            start,
            end,
            duration: end - start,
            score: self.window_score(start, end, segments, scene_cuts),
            segments: segments.to_vec(),
            keywords: self.merge_keywords(segments),
            title: best_segment_title(segments),
        }
    }

    /// Score a window: average segment score, plus visual-interest and
    /// emotional-peak bonuses, scaled by a duration factor.
    fn window_score(
        &self,
        start: f64,
        end: f64,
        segments: &[SegmentScore],
        scene_cuts: &[SceneCut],
    ) -> f64 {
        if segments.is_empty() {
            return 0.0;
        }

        let avg = segments.iter().map(|s| s.combined_score).sum::<f64>() / segments.len() as f64;

        let scene_bonus = scene_cuts
            .iter()
            .filter(|cut| cut.seconds() >= start && cut.seconds() <= end)
            .count() as f64
            * self.config.scene_bonus;

        let emotion_bonus = segments
            .iter()
            .filter(|s| s.sentiment_score > self.config.emotion_threshold)
            .count() as f64
            * self.config.emotion_bonus;

        let duration = end - start;
        let duration_multiplier = if duration < self.config.target_min {
            self.config.short_multiplier
        } else if duration > self.config.long_threshold {
            self.config.long_multiplier
        } else {
            1.0
        };

        (avg + scene_bonus + emotion_bonus) * duration_multiplier
    }

    /// Deduplicated union of member keywords, first-seen order, capped.
    fn merge_keywords(&self, segments: &[SegmentScore]) -> Vec<String> {
        let mut merged: Vec<String> = Vec::new();
        for segment in segments {
            for kw in &segment.keywords {
                if !merged.contains(kw) {
                    merged.push(kw.clone());
                }
            }
        }
        merged.truncate(self.config.max_keywords);
        merged
    }
}

/// Title of the highest-scoring member segment.
fn best_segment_title(segments: &[SegmentScore]) -> String {
    segments
        .iter()
        .max_by(|a, b| {
            a.combined_score
                .partial_cmp(&b.combined_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|s| s.title.clone())
        .unwrap_or_default()
}
