//! Transcript analysis for the Reelcut highlight pipeline.
//!
//! This crate provides:
//! - Viral-potential scoring of transcript segments
//! - Grouping of segments into duration-bounded candidate windows
//! - Greedy non-overlapping highlight selection
//!
//! NLP models (sentiment, keyphrases, summarization) are external
//! collaborators injected through the capability traits in [`signal`].

pub mod error;
pub mod keywords;
pub mod scorer;
pub mod selector;
pub mod signal;
pub mod window;

pub use error::{SignalError, SignalResult};
pub use keywords::{keyword_score, VIRAL_KEYWORDS};
pub use scorer::SegmentScorer;
pub use selector::HighlightSelector;
pub use signal::{KeyphraseExtractor, SentimentClassifier, SentimentLabel, Signal, Summarizer};
pub use window::{CandidateWindowBuilder, WindowConfig};
