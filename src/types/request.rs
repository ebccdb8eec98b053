//! Classification request type

use serde::{Deserialize, Serialize};

/// A single piece of customer feedback to classify.
///
/// Constructed per invocation and consumed once; nothing is persisted.
/// Empty or whitespace-only text is passed through as-is — both the
/// model path and the heuristic path accept it, strict input validation
/// is deliberately not this crate's job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackRequest {
    /// The customer feedback text to be analyzed.
    pub text: String,
    /// Name of the product being reviewed, used for prompt context.
    pub product_label: String,
}

impl FeedbackRequest {
    /// Create a new request from feedback text and a product label.
    pub fn new(text: impl Into<String>, product_label: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            product_label: product_label.into(),
        }
    }
}
