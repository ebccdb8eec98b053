//! Classification result types

use serde::{Deserialize, Serialize};

/// Maximum number of tags carried by a classification.
///
/// Applies on every path: heuristic results never exceed it and model
/// results are truncated to it.
pub const MAX_TAGS: usize = 8;

/// Overall sentiment of a piece of feedback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

/// Structured analysis of one piece of customer feedback.
///
/// Every successful `classify` call returns a value of this shape,
/// whether it came from the model or from the keyword heuristic:
/// `sentiment` is always one of the three enum values and `tags` is
/// never null (empty is fine).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackClassification {
    /// The overall sentiment of the feedback.
    pub sentiment: Sentiment,
    /// The primary emotion expressed, as a short phrase.
    pub emotion: String,
    /// The customer's main intent, as a short phrase.
    pub intent: String,
    /// Relevant keywords extracted from the feedback, at most [`MAX_TAGS`].
    #[serde(default)]
    pub tags: Vec<String>,
}

impl FeedbackClassification {
    /// Enforce the tag cap. Model output is free to over-produce;
    /// the contract is capped regardless of origin.
    pub(crate) fn truncate_tags(mut self) -> Self {
        self.tags.truncate(MAX_TAGS);
        self
    }
}

/// Where a classification came from.
///
/// The plain `classify` contract does not distinguish model-backed
/// results from heuristic ones; callers that care opt in through
/// `classify_detailed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    /// Returned by the generative model and schema-validated.
    Model,
    /// Computed by the deterministic keyword fallback.
    Heuristic,
}

/// A classification plus how it was obtained.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationOutcome {
    pub classification: FeedbackClassification,
    pub provenance: Provenance,
    /// Upstream attempts made (0 when no provider call happened at all).
    pub attempts: u32,
}
