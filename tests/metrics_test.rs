//! Tests for metrics integration.
//!
//! Uses `metrics_util::debugging::DebuggingRecorder` to capture and assert
//! on emitted metrics without needing a real exporter.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use metrics_util::MetricKind;
use metrics_util::debugging::{DebugValue, DebuggingRecorder};

use verdict::telemetry;
use verdict::{
    AnalysisProvider, FeedbackClassification, FeedbackClassifier, FeedbackRequest, Result,
    RetryConfig, Sentiment, VerdictError,
};

// ============================================================================
// Mock providers
// ============================================================================

struct OkProvider;

#[async_trait]
impl AnalysisProvider for OkProvider {
    fn name(&self) -> &str {
        "mock-ok"
    }

    async fn analyze(&self, _request: &FeedbackRequest) -> Result<FeedbackClassification> {
        Ok(FeedbackClassification {
            sentiment: Sentiment::Neutral,
            emotion: "indifferent".into(),
            intent: "give feedback".into(),
            tags: vec![],
        })
    }
}

struct FailingProvider {
    error: fn() -> VerdictError,
}

#[async_trait]
impl AnalysisProvider for FailingProvider {
    fn name(&self) -> &str {
        "mock-failing"
    }

    async fn analyze(&self, _request: &FeedbackRequest) -> Result<FeedbackClassification> {
        Err((self.error)())
    }
}

// ============================================================================
// Snapshot helpers
// ============================================================================

type SnapshotVec = Vec<(
    metrics_util::CompositeKey,
    Option<metrics::Unit>,
    Option<metrics::SharedString>,
    DebugValue,
)>;

/// Sum all counter values matching a given metric name and label pair.
fn counter_total_with_label(snapshot: &SnapshotVec, name: &str, label: (&str, &str)) -> u64 {
    snapshot
        .iter()
        .filter(|(key, _, _, _)| {
            key.kind() == MetricKind::Counter
                && key.key().name() == name
                && key
                    .key()
                    .labels()
                    .any(|l| l.key() == label.0 && l.value() == label.1)
        })
        .map(|(_, _, _, value)| match value {
            DebugValue::Counter(v) => *v,
            _ => 0,
        })
        .sum()
}

/// Sum all counter values matching a given metric name.
fn counter_total(snapshot: &SnapshotVec, name: &str) -> u64 {
    snapshot
        .iter()
        .filter(|(key, _, _, _)| key.kind() == MetricKind::Counter && key.key().name() == name)
        .map(|(_, _, _, value)| match value {
            DebugValue::Counter(v) => *v,
            _ => 0,
        })
        .sum()
}

/// Check if any histogram entries exist for a given metric name.
fn has_histogram(snapshot: &SnapshotVec, name: &str) -> bool {
    snapshot
        .iter()
        .any(|(key, _, _, _)| key.kind() == MetricKind::Histogram && key.key().name() == name)
}

fn fast_retry() -> RetryConfig {
    RetryConfig::new()
        .initial_delay(Duration::from_millis(1))
        .jitter(Duration::ZERO)
}

// ============================================================================
// Tests
// ============================================================================

/// Runs async code within a local recorder scope on the multi-thread runtime.
///
/// `block_in_place` ensures the sync `with_local_recorder` closure stays
/// on the current thread while `block_on` drives the inner async work.
#[tokio::test(flavor = "multi_thread", worker_threads = 1)]
async fn successful_classification_records_metrics() {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();

    metrics::with_local_recorder(&recorder, || {
        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async {
                let classifier = FeedbackClassifier::new(Arc::new(OkProvider), fast_retry());
                classifier
                    .classify(&FeedbackRequest::new("fine", "Widget"))
                    .await
            })
        })
    });

    let snapshot = snapshotter.snapshot().into_vec();

    assert_eq!(
        counter_total_with_label(&snapshot, telemetry::REQUESTS_TOTAL, ("status", "ok")),
        1
    );
    assert_eq!(counter_total(&snapshot, telemetry::FALLBACKS_TOTAL), 0);
    assert!(
        has_histogram(&snapshot, telemetry::REQUEST_DURATION_SECONDS),
        "expected a duration histogram entry"
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 1)]
async fn permanent_failure_records_fallback() {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();

    metrics::with_local_recorder(&recorder, || {
        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async {
                let provider = Arc::new(FailingProvider {
                    error: || VerdictError::AuthenticationFailed,
                });
                let classifier = FeedbackClassifier::new(provider, fast_retry());
                classifier
                    .classify(&FeedbackRequest::new("fine", "Widget"))
                    .await
            })
        })
    });

    let snapshot = snapshotter.snapshot().into_vec();

    assert_eq!(
        counter_total_with_label(&snapshot, telemetry::REQUESTS_TOTAL, ("status", "error")),
        1
    );
    assert_eq!(
        counter_total_with_label(&snapshot, telemetry::FALLBACKS_TOTAL, ("reason", "permanent")),
        1
    );
    assert_eq!(counter_total(&snapshot, telemetry::RETRIES_TOTAL), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 1)]
async fn exhausted_retries_record_retry_and_fallback_counters() {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();

    metrics::with_local_recorder(&recorder, || {
        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async {
                let provider = Arc::new(FailingProvider {
                    error: || VerdictError::RateLimited { retry_after: None },
                });
                let classifier = FeedbackClassifier::new(provider, fast_retry());
                classifier
                    .classify(&FeedbackRequest::new("fine", "Widget"))
                    .await
            })
        })
    });

    let snapshot = snapshotter.snapshot().into_vec();

    // 4 attempts = 3 retries
    assert_eq!(counter_total(&snapshot, telemetry::RETRIES_TOTAL), 3);
    assert_eq!(
        counter_total_with_label(&snapshot, telemetry::FALLBACKS_TOTAL, ("reason", "exhausted")),
        1
    );
}

#[tokio::test]
async fn metrics_are_noop_without_recorder() {
    // Verify no panics when no recorder is installed.
    let classifier = FeedbackClassifier::new(Arc::new(OkProvider), fast_retry());
    let result = classifier
        .classify(&FeedbackRequest::new("fine", "Widget"))
        .await;
    assert_eq!(result.sentiment, Sentiment::Neutral);
}
