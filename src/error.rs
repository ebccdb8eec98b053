//! Verdict error types

use std::time::Duration;

/// Verdict error types
#[derive(Debug, thiserror::Error)]
pub enum VerdictError {
    // Provider/network errors
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("rate limited, retry after {retry_after:?}")]
    RateLimited { retry_after: Option<Duration> },

    #[error("authentication failed")]
    AuthenticationFailed,

    // Data errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Model returned JSON that does not match the classification shape
    /// (unknown sentiment value, missing field, wrong type).
    #[error("schema violation: {0}")]
    SchemaViolation(String),

    #[error("empty response from model")]
    EmptyResponse,

    // Configuration errors
    #[error("no provider configured")]
    NoProvider,

    #[error("configuration error: {0}")]
    Configuration(String),
}

/// Retryability of an upstream failure, decided from its message alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    Retryable,
    NonRetryable,
}

/// Retry-signal vocabulary, matched case-insensitively.
const RETRY_SIGNALS: [&str; 4] = ["quota exceeded", "429", "too many requests", "rate limit"];

/// Classify an opaque upstream error message as retryable or not.
///
/// Upstream failures arrive as free text; a failure is retryable iff the
/// message contains one of the rate-limit/quota signals. Anything else
/// (auth failure, malformed response, network refusal) is permanent.
pub fn classify_failure(message: &str) -> FailureClass {
    let lower = message.to_lowercase();
    if RETRY_SIGNALS.iter().any(|sig| lower.contains(sig)) {
        FailureClass::Retryable
    } else {
        FailureClass::NonRetryable
    }
}

impl VerdictError {
    /// Whether this error is worth retrying with backoff.
    ///
    /// `RateLimited` is always transient; other provider errors are
    /// classified by [`classify_failure`] over their rendered message,
    /// so an `Api { status: 429, .. }` is caught by the "429" signal.
    pub fn is_transient(&self) -> bool {
        match self {
            VerdictError::RateLimited { .. } => true,
            VerdictError::Http(_) | VerdictError::Api { .. } => {
                classify_failure(&self.to_string()) == FailureClass::Retryable
            }
            _ => false,
        }
    }

    /// Provider-suggested delay before retrying, if any.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            VerdictError::RateLimited { retry_after } => *retry_after,
            _ => None,
        }
    }
}

/// Result type alias for Verdict operations
pub type Result<T> = std::result::Result<T, VerdictError>;
