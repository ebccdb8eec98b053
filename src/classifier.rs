//! Resilient classification facade.
//!
//! [`FeedbackClassifier`] wraps an [`AnalysisProvider`] with the bounded
//! retry loop and the heuristic fallback. Its `classify` operation never
//! fails: every code path ends in a well-formed
//! [`FeedbackClassification`], whether the model answered or not.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, warn};

use crate::heuristic;
use crate::providers::GeminiProvider;
use crate::providers::retry::{RetryConfig, with_retry};
use crate::providers::traits::AnalysisProvider;
use crate::telemetry;
use crate::types::{ClassificationOutcome, FeedbackClassification, FeedbackRequest, Provenance};
use crate::{Result, VerdictError};

/// Main entry point for creating classifier instances.
pub struct Verdict;

impl Verdict {
    /// Create a new builder for configuring a classifier.
    pub fn builder() -> VerdictBuilder {
        VerdictBuilder::new()
    }
}

/// Builder for configuring classifier instances.
pub struct VerdictBuilder {
    gemini_key: Option<String>,
    model: Option<String>,
    provider: Option<Arc<dyn AnalysisProvider>>,
    retry: RetryConfig,
}

impl VerdictBuilder {
    pub fn new() -> Self {
        Self {
            gemini_key: None,
            model: None,
            provider: None,
            retry: RetryConfig::default(),
        }
    }

    /// Configure the Gemini provider with an API key.
    pub fn gemini(mut self, api_key: impl Into<String>) -> Self {
        self.gemini_key = Some(api_key.into());
        self
    }

    /// Set the Gemini model name (ignored when a custom provider is set).
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Use a custom analysis provider instead of Gemini.
    pub fn provider(mut self, provider: Arc<dyn AnalysisProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Override the retry configuration.
    pub fn retry(mut self, config: RetryConfig) -> Self {
        self.retry = config;
        self
    }

    /// Build the classifier. Fails if no provider is configured.
    pub fn build(self) -> Result<FeedbackClassifier> {
        let provider: Arc<dyn AnalysisProvider> = match (self.provider, self.gemini_key) {
            (Some(provider), _) => provider,
            (None, Some(key)) => {
                let mut gemini = GeminiProvider::new(key);
                if let Some(model) = self.model {
                    gemini = gemini.model(model);
                }
                Arc::new(gemini)
            }
            (None, None) => return Err(VerdictError::NoProvider),
        };
        Ok(FeedbackClassifier::new(provider, self.retry))
    }
}

impl Default for VerdictBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Classifier that always produces a result.
///
/// Per invocation the flow is a small state machine: `Attempting(n)`
/// succeeds and finishes, or on a retryable failure with attempts left
/// sleeps the backoff and moves to `Attempting(n+1)`, or on a permanent
/// failure (or exhaustion) drops to the heuristic fallback and finishes.
/// Calls are independent: no state is shared between concurrent
/// invocations and each call's backoff is local to itself.
pub struct FeedbackClassifier {
    provider: Arc<dyn AnalysisProvider>,
    retry: RetryConfig,
}

impl FeedbackClassifier {
    /// Create a classifier from a provider and retry configuration.
    pub fn new(provider: Arc<dyn AnalysisProvider>, retry: RetryConfig) -> Self {
        Self { provider, retry }
    }

    /// Classify one piece of feedback. Never fails.
    ///
    /// Callers cannot tell a model-backed result from a heuristic one
    /// through this method; use
    /// [`classify_detailed`](Self::classify_detailed) when provenance
    /// matters.
    pub async fn classify(&self, request: &FeedbackRequest) -> FeedbackClassification {
        self.classify_detailed(request).await.classification
    }

    /// Classify one piece of feedback, reporting provenance and the
    /// number of upstream attempts made.
    pub async fn classify_detailed(&self, request: &FeedbackRequest) -> ClassificationOutcome {
        let provider_name = self.provider.name().to_owned();
        let start = Instant::now();

        let attempted = with_retry(&self.retry, &provider_name, || {
            self.provider.analyze(request)
        })
        .await;

        metrics::histogram!(telemetry::REQUEST_DURATION_SECONDS,
            "provider" => provider_name.clone(),
        )
        .record(start.elapsed().as_secs_f64());

        match attempted.result {
            Ok(classification) => {
                metrics::counter!(telemetry::REQUESTS_TOTAL,
                    "provider" => provider_name.clone(),
                    "status" => "ok",
                )
                .increment(1);
                debug!(
                    provider = %provider_name,
                    attempts = attempted.attempts,
                    "model classification succeeded"
                );
                ClassificationOutcome {
                    classification: classification.truncate_tags(),
                    provenance: Provenance::Model,
                    attempts: attempted.attempts,
                }
            }
            Err(e) => {
                metrics::counter!(telemetry::REQUESTS_TOTAL,
                    "provider" => provider_name.clone(),
                    "status" => "error",
                )
                .increment(1);
                // still transient after the loop means the ceiling was hit
                let reason = if e.is_transient() {
                    "exhausted"
                } else {
                    "permanent"
                };
                metrics::counter!(telemetry::FALLBACKS_TOTAL,
                    "provider" => provider_name.clone(),
                    "reason" => reason,
                )
                .increment(1);
                warn!(
                    provider = %provider_name,
                    attempts = attempted.attempts,
                    reason,
                    error = %e,
                    "model classification failed, falling back to heuristic"
                );
                ClassificationOutcome {
                    classification: heuristic::analyze(&request.text),
                    provenance: Provenance::Heuristic,
                    attempts: attempted.attempts,
                }
            }
        }
    }
}
