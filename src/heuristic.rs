//! Deterministic keyword fallback classifier.
//!
//! Used when the generative model is unavailable or retries are
//! exhausted. The result is intentionally crude: fixed vocabularies,
//! substring matching, and a three-way tie rule. Text that matches no
//! vocabulary word comes out neutral/indifferent even if it is plainly
//! negative — that imprecision is part of the visible fallback
//! contract, not something to quietly improve.

use crate::types::{FeedbackClassification, MAX_TAGS, Sentiment};

/// Positive sentiment vocabulary, scanned first for tag order.
const POSITIVE_WORDS: [&str; 10] = [
    "good",
    "great",
    "excellent",
    "love",
    "perfect",
    "comfortable",
    "best",
    "nice",
    "amazing",
    "recommend",
];

/// Negative sentiment vocabulary.
const NEGATIVE_WORDS: [&str; 10] = [
    "bad",
    "poor",
    "terrible",
    "disappointed",
    "hate",
    "awful",
    "broken",
    "worst",
    "cheap",
    "problem",
];

/// Classify feedback text by keyword scan.
///
/// Sentiment and emotion follow the positive-vs-negative hit counts
/// (neutral/indifferent on any tie, including zero hits on both sides).
/// Intent checks return/refund before buy. Tags are the matched
/// vocabulary words in scan order, positive table first, capped at
/// [`MAX_TAGS`]; each word is tested once so duplicates cannot occur.
pub fn analyze(text: &str) -> FeedbackClassification {
    let lower = text.to_lowercase();

    let mut pos_count = 0usize;
    let mut neg_count = 0usize;
    let mut tags = Vec::new();

    for word in POSITIVE_WORDS {
        if lower.contains(word) {
            pos_count += 1;
            tags.push(word.to_string());
        }
    }
    for word in NEGATIVE_WORDS {
        if lower.contains(word) {
            neg_count += 1;
            tags.push(word.to_string());
        }
    }
    tags.truncate(MAX_TAGS);

    let sentiment = if pos_count > neg_count {
        Sentiment::Positive
    } else if neg_count > pos_count {
        Sentiment::Negative
    } else {
        Sentiment::Neutral
    };

    let emotion = match sentiment {
        Sentiment::Positive => "satisfied",
        Sentiment::Negative => "frustrated",
        Sentiment::Neutral => "indifferent",
    };

    // return/refund outranks buy
    let intent = if lower.contains("return") || lower.contains("refund") {
        "request refund"
    } else if lower.contains("buy") {
        "purchase intent"
    } else {
        "give feedback"
    };

    FeedbackClassification {
        sentiment,
        emotion: emotion.to_string(),
        intent: intent.to_string(),
        tags,
    }
}
