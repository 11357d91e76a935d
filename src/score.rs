//! Keyword relevance scoring.
//!
//! Each article gets an additive score from literal, case-insensitive
//! substring matches of the query keyword:
//!
//! | Field   | Whole keyword | Per matching term |
//! |---------|---------------|-------------------|
//! | title   | 5             | 2                 |
//! | content | 3             | 1                 |
//! | excerpt | 2             | 0.5               |
//!
//! A whole-keyword match replaces the per-term matches for that field.
//! The excerpt is only read when the article has no usable content. The
//! total is capped at [`MAX_SCORE`].

use crate::models::ArticleRecord;
use tracing::trace;

pub const MAX_SCORE: f64 = 10.0;

const TITLE_WEIGHTS: Weights = Weights { phrase: 5.0, term: 2.0 };
const CONTENT_WEIGHTS: Weights = Weights { phrase: 3.0, term: 1.0 };
const EXCERPT_WEIGHTS: Weights = Weights { phrase: 2.0, term: 0.5 };

#[derive(Debug, Clone, Copy)]
struct Weights {
    phrase: f64,
    term: f64,
}

/// A lowercased keyword and its whitespace-separated terms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keyword {
    phrase: String,
    terms: Vec<String>,
}

impl Keyword {
    pub fn new(raw: &str) -> Self {
        let phrase = raw.to_lowercase();
        let terms = phrase.split_whitespace().map(str::to_string).collect();
        Self { phrase, terms }
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    fn score_text(&self, text: &str, weights: Weights) -> f64 {
        let text = text.to_lowercase();
        if text.contains(&self.phrase) {
            return weights.phrase;
        }
        let hits = self
            .terms
            .iter()
            .filter(|term| text.contains(term.as_str()))
            .count();
        hits as f64 * weights.term
    }
}

/// Score one article against the keyword.
///
/// The title and the content (or, when the content is missing or empty,
/// the excerpt) each contribute the phrase weight if the whole phrase
/// appears, otherwise the per-term weight for each matching term.
///
/// # Arguments
///
/// * `record` - The article to score; its current score is ignored
/// * `keyword` - The search keyword, already lowercased and split
///
/// # Returns
///
/// A score within `[0, MAX_SCORE]`.
pub fn relevance_score(record: &ArticleRecord, keyword: &Keyword) -> f64 {
    let mut score = 0.0;

    if let Some(title) = usable(&record.title) {
        score += keyword.score_text(title, TITLE_WEIGHTS);
    }

    if let Some(content) = usable(&record.content) {
        score += keyword.score_text(content, CONTENT_WEIGHTS);
    } else if let Some(excerpt) = usable(&record.excerpt) {
        score += keyword.score_text(excerpt, EXCERPT_WEIGHTS);
    }

    score.min(MAX_SCORE)
}

/// Compute and store a fresh score on every record.
///
/// # Arguments
///
/// * `records` - Articles to score in place
/// * `keyword` - The keyword every record is scored against
pub fn score_articles(records: &mut [ArticleRecord], keyword: &Keyword) {
    for record in records.iter_mut() {
        record.relevance_score = relevance_score(record, keyword);
        trace!(url = ?record.url, score = record.relevance_score, "Scored article");
    }
}

fn usable(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}
