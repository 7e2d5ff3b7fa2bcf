//! Segment scores, candidate windows, and highlight models.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{ModelError, ModelResult};
use crate::job::VideoId;

/// Viral-potential scores derived from one transcript segment.
///
/// Ephemeral: built by the signal scorer, consumed by the window builder,
/// never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentScore {
    /// Segment start time in seconds
    pub start: f64,
    /// Segment end time in seconds
    pub end: f64,
    /// Segment text
    pub text: String,
    /// Normalized viral-keyword match score
    pub keyword_score: f64,
    /// Positive-sentiment probability (0.5 when the classifier fell back)
    pub sentiment_score: f64,
    /// Piecewise word-count score
    pub length_score: f64,
    /// Weighted combination, clamped to [0, 1]
    pub combined_score: f64,
    /// Top key phrases for the segment
    pub keywords: Vec<String>,
    /// Short title for the segment
    pub title: String,
}

/// A provisional clip boundary before final selection.
///
/// Built once by the window builder and consumed once by the selector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateWindow {
    pub start: f64,
    pub end: f64,
    pub duration: f64,
    pub score: f64,
    pub segments: Vec<SegmentScore>,
    pub keywords: Vec<String>,
    pub title: String,
}

impl CandidateWindow {
    /// Whether this window time-overlaps another.
    pub fn overlaps(&self, other: &CandidateWindow) -> bool {
        self.start < other.end && self.end > other.start
    }
}

/// A selected, non-overlapping clip-worthy interval.
///
/// Immutable after selection; read by the render orchestrator and by
/// downstream clip-export requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Highlight {
    /// Unique ID within the video (1-indexed, assigned in selection order)
    pub id: u32,

    /// Video this highlight belongs to
    pub video_id: VideoId,

    /// Start timestamp in seconds
    pub start_time: f64,

    /// End timestamp in seconds
    pub end_time: f64,

    /// Selection score in [0, 1]
    pub score: f64,

    /// Up to 5 keywords, deduplicated, first-occurrence order
    pub keywords: Vec<String>,

    /// Clip title
    pub title: String,

    /// Human-readable description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// When the highlight was created
    pub created_at: DateTime<Utc>,
}

impl Highlight {
    /// Create a new highlight, validating the time range and score.
    pub fn new(
        id: u32,
        video_id: VideoId,
        start_time: f64,
        end_time: f64,
        score: f64,
    ) -> ModelResult<Self> {
        if end_time <= start_time {
            return Err(ModelError::InvalidTimeRange {
                start: start_time,
                end: end_time,
            });
        }
        if !(0.0..=1.0).contains(&score) {
            return Err(ModelError::ScoreOutOfRange(score));
        }
        Ok(Self {
            id,
            video_id,
            start_time,
            end_time,
            score,
            keywords: Vec::new(),
            title: String::new(),
            description: None,
            created_at: Utc::now(),
        })
    }

    /// Attach keywords (caller is responsible for the ≤5 dedup rule).
    pub fn with_keywords(mut self, keywords: Vec<String>) -> Self {
        self.keywords = keywords;
        self
    }

    /// Attach a title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Attach a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Highlight duration in seconds.
    pub fn duration(&self) -> f64 {
        self.end_time - self.start_time
    }

    /// Whether this highlight time-overlaps another.
    pub fn overlaps(&self, other: &Highlight) -> bool {
        self.start_time < other.end_time && self.end_time > other.start_time
    }
}
