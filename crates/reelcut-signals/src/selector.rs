//! Greedy non-overlapping highlight selection.

use tracing::info;

use reelcut_models::{CandidateWindow, Highlight, VideoId};

use crate::error::SignalResult;

/// Picks the final highlight set from candidate windows.
///
/// This is a greedy interval-packing heuristic: candidates are taken in
/// score order and accepted when they do not overlap anything already
/// accepted. It intentionally trades maximum total coverage (weighted
/// interval scheduling) for score priority and simplicity; do not
/// "optimize" this without changing the documented selection semantics.
pub struct HighlightSelector {
    max_highlights: usize,
}

impl HighlightSelector {
    pub fn new(max_highlights: usize) -> Self {
        Self { max_highlights }
    }

    /// Select up to `max_highlights` non-overlapping highlights.
    ///
    /// Deterministic: ties in score break toward the earlier start, and
    /// ids are assigned 1-indexed in acceptance order.
    pub fn select(
        &self,
        video_id: &VideoId,
        mut candidates: Vec<CandidateWindow>,
    ) -> SignalResult<Vec<Highlight>> {
        candidates.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| {
                    a.start
                        .partial_cmp(&b.start)
                        .unwrap_or(std::cmp::Ordering::Equal)
                })
        });

        let mut accepted: Vec<CandidateWindow> = Vec::new();
        for window in candidates {
            if accepted.len() >= self.max_highlights {
                break;
            }
            if accepted.iter().any(|other| window.overlaps(other)) {
                continue;
            }
            accepted.push(window);
        }

        let mut highlights = Vec::with_capacity(accepted.len());
        for (i, window) in accepted.into_iter().enumerate() {
            let highlight = Highlight::new(
                (i + 1) as u32,
                video_id.clone(),
                window.start,
                window.end,
                window.score.clamp(0.0, 1.0),
            )?
            .with_keywords(window.keywords)
            .with_title(window.title)
            .with_description(format!("Duration: {:.1}s", window.duration));
            highlights.push(highlight);
        }

        info!(
            video_id = %video_id,
            selected = highlights.len(),
            "Selected highlights"
        );
        Ok(highlights)
    }
}
