//! Telemetry metric name constants.
//!
//! Centralised metric names for verdict operations. Consumers install
//! their own `metrics` recorder (e.g. prometheus, statsd); without a
//! recorder installed, all metric calls are no-ops.
//!
//! # Metric naming conventions
//!
//! All metrics are prefixed with `verdict_`. Counters end in `_total`,
//! histograms use meaningful units (e.g. `_seconds`).
//!
//! # Common labels
//!
//! - `provider` — provider name (e.g. "gemini")
//! - `status` — outcome: "ok" or "error"
//! - `reason` — why a fallback fired: "permanent" or "exhausted"

/// Total classification requests dispatched to a provider.
///
/// Labels: `provider`, `status` ("ok" | "error").
pub const REQUESTS_TOTAL: &str = "verdict_requests_total";

/// Provider request duration in seconds, including backoff sleeps.
///
/// Labels: `provider`.
pub const REQUEST_DURATION_SECONDS: &str = "verdict_request_duration_seconds";

/// Total retry attempts (not counting the initial request).
///
/// Labels: `provider`.
pub const RETRIES_TOTAL: &str = "verdict_retries_total";

/// Total heuristic fallbacks.
///
/// Labels: `provider`, `reason` ("permanent" | "exhausted").
pub const FALLBACKS_TOTAL: &str = "verdict_fallbacks_total";
