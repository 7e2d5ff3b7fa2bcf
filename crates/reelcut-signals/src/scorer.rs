//! Viral-potential scoring of transcript segments.

use std::sync::Arc;

use regex::Regex;
use tracing::warn;

use reelcut_models::{SegmentScore, TranscriptSegment};

use crate::keywords::keyword_score;
use crate::signal::{KeyphraseExtractor, SentimentClassifier, Signal, Summarizer};

/// Sentiment labels treated as "positive" for scoring.
const POSITIVE_LABELS: &[&str] = &["POSITIVE", "JOY", "EXCITEMENT"];

/// Neutral sentiment used when the classifier fails or reports no
/// positive-equivalent label.
const NEUTRAL_SENTIMENT: f64 = 0.5;

/// Maximum title length in characters.
const MAX_TITLE_LEN: usize = 60;

/// Scores transcript segments for viral potential from text alone.
///
/// Holds shared references to the NLP collaborators; safe to reuse
/// across jobs since the models are read-only after initialization.
pub struct SegmentScorer {
    sentiment: Arc<dyn SentimentClassifier>,
    keyphrases: Arc<dyn KeyphraseExtractor>,
    summarizer: Arc<dyn Summarizer>,
    filler_words: Regex,
}

impl SegmentScorer {
    /// Create a new scorer over the given collaborators.
    pub fn new(
        sentiment: Arc<dyn SentimentClassifier>,
        keyphrases: Arc<dyn KeyphraseExtractor>,
        summarizer: Arc<dyn Summarizer>,
    ) -> Self {
        Self {
            sentiment,
            keyphrases,
            summarizer,
            filler_words: Regex::new(r"(?i)\b(um|uh|like|you know|so|well)\b")
                .expect("filler word pattern is valid"),
        }
    }

    /// Score one segment.
    ///
    /// Collaborator failures degrade to documented defaults and are logged;
    /// scoring itself never fails.
    pub fn score(&self, segment: &TranscriptSegment) -> SegmentScore {
        let text = segment.text.as_str();
        let word_count = segment.word_count();

        let keyword_score = keyword_score(text);
        let length_score = length_score(word_count);

        let sentiment = self.sentiment_score(text);
        if let Signal::Fallback { reason, .. } = &sentiment {
            warn!(reason = %reason, "Sentiment fell back to neutral");
        }
        let sentiment_score = sentiment.into_value();

        let keywords = self.extract_keywords(text);
        if let Signal::Fallback { reason, .. } = &keywords {
            warn!(reason = %reason, "Keyphrase extraction fell back to raw tokens");
        }

        let title = self.segment_title(text, word_count);
        if let Signal::Fallback { reason, .. } = &title {
            warn!(reason = %reason, "Title generation fell back to leading words");
        }

        let combined_score = (keyword_score * 0.4 + sentiment_score * 0.3 + length_score * 0.3)
            .clamp(0.0, 1.0);

        SegmentScore {
            start: segment.start,
            end: segment.end,
            text: text.to_string(),
            keyword_score,
            sentiment_score,
            length_score,
            combined_score,
            keywords: keywords.into_value(),
            title: title.into_value(),
        }
    }

    /// Probability of a positive-equivalent label.
    fn sentiment_score(&self, text: &str) -> Signal<f64> {
        match self.sentiment.classify(text) {
            Ok(labels) => {
                for label in labels {
                    if POSITIVE_LABELS.contains(&label.label.to_uppercase().as_str()) {
                        return Signal::Measured(label.probability);
                    }
                }
                Signal::fallback(NEUTRAL_SENTIMENT, "no positive label reported")
            }
            Err(e) => Signal::fallback(NEUTRAL_SENTIMENT, e.to_string()),
        }
    }

    /// Top-5 key phrases, falling back to long non-stopword tokens.
    fn extract_keywords(&self, text: &str) -> Signal<Vec<String>> {
        match self.keyphrases.extract(text, 5) {
            Ok(keywords) => Signal::Measured(keywords),
            Err(e) => Signal::fallback(fallback_keywords(text), e.to_string()),
        }
    }

    /// Title via the summarizer for longer segments, else the raw text.
    fn segment_title(&self, text: &str, word_count: usize) -> Signal<String> {
        if word_count > 10 {
            match self.summarizer.summarize(text) {
                Ok(summary) => Signal::Measured(tidy_title(&summary)),
                Err(e) => Signal::fallback(self.leading_words_title(text), e.to_string()),
            }
        } else {
            Signal::Measured(tidy_title(text))
        }
    }

    /// First 8 words of the filler-word-stripped text.
    fn leading_words_title(&self, text: &str) -> String {
        let stripped = self.filler_words.replace_all(text, "");
        let words: Vec<&str> = stripped.split_whitespace().collect();
        let mut title = words.iter().take(8).copied().collect::<Vec<_>>().join(" ");
        if words.len() > 8 {
            title.push_str("...");
        }
        title
    }
}

/// Piecewise score on word count; 10-30 words reads well in a 15-60s clip.
pub fn length_score(word_count: usize) -> f64 {
    match word_count {
        10..=30 => 1.0,
        5..=9 | 31..=50 => 0.7,
        _ => 0.3,
    }
}

/// Strip a trailing period and truncate to the title length limit.
fn tidy_title(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('.');
    if trimmed.chars().count() > MAX_TITLE_LEN {
        let mut title: String = trimmed.chars().take(MAX_TITLE_LEN - 3).collect();
        title.push_str("...");
        title
    } else {
        trimmed.to_string()
    }
}

/// Non-stopword tokens longer than 3 characters, first 3.
fn fallback_keywords(text: &str) -> Vec<String> {
    /// Common English stop words excluded from fallback keywords.
    const STOP_WORDS: &[&str] = &[
        "this", "that", "with", "from", "have", "their", "they", "them", "what",
        "when", "where", "which", "will", "would", "there", "been", "were",
        "your", "about", "into", "then", "than", "some", "just", "very",
    ];

    text.split_whitespace()
        .map(|w| {
            w.trim_matches(|c: char| !c.is_alphanumeric())
                .to_lowercase()
        })
        .filter(|w| w.len() > 3 && !STOP_WORDS.contains(&w.as_str()))
        .take(3)
        .collect()
}
