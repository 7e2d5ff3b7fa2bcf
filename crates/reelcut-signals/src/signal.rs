//! Capability traits for external NLP collaborators.
//!
//! Models are expensive to initialize and are shared as process-wide
//! read-only singletons (`Arc<dyn ...>`) across jobs within a worker.

use serde::{Deserialize, Serialize};

use crate::error::SignalResult;

/// One label with its probability, as returned by a sentiment classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentLabel {
    pub label: String,
    pub probability: f64,
}

impl SentimentLabel {
    pub fn new(label: impl Into<String>, probability: f64) -> Self {
        Self {
            label: label.into(),
            probability,
        }
    }
}

/// Text sentiment classifier returning per-label probabilities.
pub trait SentimentClassifier: Send + Sync {
    fn classify(&self, text: &str) -> SignalResult<Vec<SentimentLabel>>;
}

/// Keyphrase extractor returning 1-2 token n-grams, stop words excluded.
pub trait KeyphraseExtractor: Send + Sync {
    fn extract(&self, text: &str, top_k: usize) -> SignalResult<Vec<String>>;
}

/// Abstractive summarizer used for segment titles.
pub trait Summarizer: Send + Sync {
    fn summarize(&self, text: &str) -> SignalResult<String>;
}

/// A value that may have come from a model or from a documented fallback.
///
/// Makes graceful degradation visible in the signature instead of being
/// buried in exception handling.
#[derive(Debug, Clone, PartialEq)]
pub enum Signal<T> {
    /// Value produced by the collaborator
    Measured(T),
    /// Fallback value used because the collaborator failed or returned
    /// nothing usable
    Fallback { value: T, reason: String },
}

impl<T> Signal<T> {
    /// Fallback constructor.
    pub fn fallback(value: T, reason: impl Into<String>) -> Self {
        Self::Fallback {
            value,
            reason: reason.into(),
        }
    }

    /// Unwrap to the carried value, regardless of provenance.
    pub fn into_value(self) -> T {
        match self {
            Signal::Measured(v) => v,
            Signal::Fallback { value, .. } => value,
        }
    }

    /// Whether this value came from a fallback path.
    pub fn is_fallback(&self) -> bool {
        matches!(self, Signal::Fallback { .. })
    }
}
