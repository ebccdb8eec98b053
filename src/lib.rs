//! Verdict - Resilient customer-feedback classification
//!
//! This crate turns free-text product feedback into a structured
//! [`FeedbackClassification`] (sentiment, emotion, intent, tags). It
//! prefers a generative-model-backed analysis and guarantees a
//! well-formed result even when the model is unavailable: transient
//! failures are retried with exponential backoff and jitter, and
//! anything else falls back to a deterministic keyword heuristic.
//!
//! # Example
//!
//! ```rust,no_run
//! use verdict::{FeedbackRequest, Verdict};
//!
//! #[tokio::main]
//! async fn main() -> verdict::Result<()> {
//!     let classifier = Verdict::builder()
//!         .gemini("your-api-key")
//!         .build()?;
//!
//!     let request = FeedbackRequest::new(
//!         "Great shoes, very comfortable. Would recommend!",
//!         "Trail Runner 2",
//!     );
//!
//!     // Never fails: falls back to the keyword heuristic if the
//!     // model is unreachable or over quota.
//!     let analysis = classifier.classify(&request).await;
//!     println!("{:?} — tags: {:?}", analysis.sentiment, analysis.tags);
//!     Ok(())
//! }
//! ```

pub mod classifier;
pub mod error;
pub mod heuristic;
pub mod prompt;
pub mod providers;
pub mod telemetry;
pub mod types;

// Re-export main types at crate root
pub use classifier::{FeedbackClassifier, Verdict, VerdictBuilder};
pub use error::{FailureClass, Result, VerdictError};
pub use providers::retry::RetryConfig;
pub use providers::traits::AnalysisProvider;

// Re-export all types
pub use types::{
    ClassificationOutcome, FeedbackClassification, FeedbackRequest, Provenance, Sentiment,
};
