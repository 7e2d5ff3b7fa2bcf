//! Transcript and scene-cut models.
//!
//! Both are produced by external collaborators (transcription service,
//! scene-cut detector) and consumed read-only by the analysis pipeline.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{ModelError, ModelResult};

/// A single word with its timing inside a transcript segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct WordTimestamp {
    pub word: String,
    /// Word start time in seconds
    pub start: f64,
    /// Word end time in seconds
    pub end: f64,
}

/// A time-bounded transcript fragment with text.
///
/// Immutable once constructed; `end > start` is enforced at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TranscriptSegment {
    /// Segment start time in seconds
    pub start: f64,
    /// Segment end time in seconds
    pub end: f64,
    /// Spoken text
    pub text: String,
    /// Per-word timings (may be empty if the transcriber did not emit them)
    #[serde(default)]
    pub words: Vec<WordTimestamp>,
}

impl TranscriptSegment {
    /// Create a new segment, validating the time range.
    pub fn new(start: f64, end: f64, text: impl Into<String>) -> ModelResult<Self> {
        if end <= start {
            return Err(ModelError::InvalidTimeRange { start, end });
        }
        Ok(Self {
            start,
            end,
            text: text.into(),
            words: Vec::new(),
        })
    }

    /// Attach per-word timings.
    pub fn with_words(mut self, words: Vec<WordTimestamp>) -> Self {
        self.words = words;
        self
    }

    /// Segment duration in seconds.
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Number of whitespace-separated words in the text.
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}

/// A timestamp where visual content changes abruptly.
///
/// Scene-cut suppliers hand these over sorted ascending without duplicates.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct SceneCut(pub f64);

impl SceneCut {
    /// Timestamp in seconds.
    pub fn seconds(&self) -> f64 {
        self.0
    }

    /// Whether this cut lies within `tolerance` seconds of `time`.
    pub fn is_near(&self, time: f64, tolerance: f64) -> bool {
        (self.0 - time).abs() < tolerance
    }
}

impl From<f64> for SceneCut {
    fn from(seconds: f64) -> Self {
        Self(seconds)
    }
}
