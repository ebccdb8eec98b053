//! Provider trait for generative feedback analysis.
//!
//! The classifier talks to its upstream through [`AnalysisProvider`]
//! rather than a concrete client. This keeps the retry/fallback logic
//! independent of any particular model API and lets tests substitute a
//! mock that fails on demand.

use async_trait::async_trait;

use crate::Result;
use crate::types::{FeedbackClassification, FeedbackRequest};

/// Provider for generative feedback classification.
///
/// Implementations are expected to return a schema-valid
/// [`FeedbackClassification`] or an error; they must not invent a
/// fallback of their own — degradation policy lives in the classifier.
#[async_trait]
pub trait AnalysisProvider: Send + Sync {
    /// Provider name for logging/debugging.
    fn name(&self) -> &str;

    /// Ask the model to classify one piece of feedback.
    async fn analyze(&self, request: &FeedbackRequest) -> Result<FeedbackClassification>;
}
