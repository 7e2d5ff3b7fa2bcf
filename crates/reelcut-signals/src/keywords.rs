//! Viral keyword matching.

/// Keywords and phrases that tend to perform well in short-form clips.
///
/// Curated list spanning superlatives, emotional intensifiers, and
/// money/urgency terms. Matching is substring-based on lowercased text.
pub const VIRAL_KEYWORDS: &[&str] = &[
    "amazing", "incredible", "unbelievable", "shocking", "wow", "omg", "crazy",
    "insane", "mind-blowing", "epic", "legendary", "viral", "trending", "hot",
    "breaking", "exclusive", "secret", "hack", "trick", "tip", "mistake", "fail",
    "win", "success", "transformation", "before", "after", "reveal", "exposed",
    "truth", "reality", "facts", "study", "research", "proven", "science",
    "money", "rich", "poor", "millionaire", "billionaire", "expensive", "cheap",
    "free", "deal", "offer", "limited", "urgent", "now", "today", "never",
    "always", "everyone", "nobody", "first", "last", "best", "worst", "top",
    "bottom", "new", "old", "young", "genius", "stupid", "smart", "dumb",
];

/// Score text by the number of viral keywords it contains.
///
/// Each matching keyword counts once; the count is normalized so that
/// five or more matches saturate at 1.0.
pub fn keyword_score(text: &str) -> f64 {
    let text_lower = text.to_lowercase();
    let matches = VIRAL_KEYWORDS
        .iter()
        .filter(|kw| text_lower.contains(*kw))
        .count();
    (matches as f64 / 5.0).min(1.0)
}
