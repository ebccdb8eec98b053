//! Retry configuration, delay calculation, and the shared retry loop.
//!
//! Provides [`RetryConfig`] for controlling backoff behaviour and the
//! `with_retry()` helper that drives a bounded attempt loop over any
//! async operation. Transient errors (as classified by
//! [`VerdictError::is_transient()`]) are retried with exponential
//! backoff plus uniform jitter; permanent errors and exhaustion are
//! returned to the caller, which decides what degradation looks like.

use std::future::Future;
use std::time::Duration;

use rand::Rng;
use tracing::warn;

use crate::telemetry;
use crate::{Result, VerdictError};

/// Configuration for retry behaviour on transient errors.
///
/// Uses exponential backoff with uniform jitter:
///
/// ```rust
/// # use verdict::RetryConfig;
/// # use std::time::Duration;
/// let config = RetryConfig::new()
///     .max_attempts(6)
///     .initial_delay(Duration::from_millis(200))
///     .jitter(Duration::from_millis(50));
/// ```
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of attempts (including the initial request).
    /// 1 = no retry. Default: 4 (one initial try plus three retries).
    pub max_attempts: u32,
    /// Base delay before the first retry. Default: 1s.
    pub initial_delay: Duration,
    /// Maximum delay between retries (caps exponential growth). Default: 30s.
    pub max_delay: Duration,
    /// Upper bound of the uniform random jitter added to each delay.
    /// `Duration::ZERO` disables jitter. Default: 300ms.
    pub jitter: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 4,
            initial_delay: Duration::from_millis(1000),
            max_delay: Duration::from_secs(30),
            jitter: Duration::from_millis(300),
        }
    }
}

impl RetryConfig {
    /// Create a new config with sensible defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a config that disables retries (single attempt).
    pub fn disabled() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }

    /// Set maximum attempts (including the initial request).
    pub fn max_attempts(mut self, n: u32) -> Self {
        self.max_attempts = n;
        self
    }

    /// Set the base delay before the first retry.
    pub fn initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    /// Set the maximum delay between retries.
    pub fn max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    /// Set the jitter upper bound (`Duration::ZERO` disables jitter).
    pub fn jitter(mut self, max: Duration) -> Self {
        self.jitter = max;
        self
    }

    /// Calculate the delay for a given attempt number (0-indexed).
    ///
    /// Uses exponential backoff: `initial_delay * 2^attempt`, capped at
    /// `max_delay`. Does NOT include jitter — see
    /// [`sample_jitter()`](Self::sample_jitter).
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let delay = self
            .initial_delay
            .saturating_mul(2u32.saturating_pow(attempt));
        delay.min(self.max_delay)
    }

    /// Calculate the base delay, respecting provider `retry_after` hints.
    ///
    /// If a `retry_after` duration is provided (from a `RateLimited`
    /// error), it takes precedence over the calculated backoff.
    pub fn effective_delay(&self, attempt: u32, retry_after: Option<Duration>) -> Duration {
        retry_after.unwrap_or_else(|| self.delay_for_attempt(attempt))
    }

    /// Sample a uniform random jitter in `[0, self.jitter)`.
    pub fn sample_jitter(&self) -> Duration {
        let max_ms = self.jitter.as_millis() as u64;
        if max_ms == 0 {
            return Duration::ZERO;
        }
        Duration::from_millis(rand::rng().random_range(0..max_ms))
    }
}

/// Result of a retried operation plus how many tries it took.
pub(crate) struct Attempted<T> {
    pub result: Result<T>,
    pub attempts: u32,
}

/// Execute an async operation with retry logic.
///
/// Retries on transient errors up to `config.max_attempts`, sleeping a
/// jittered exponential backoff between tries (non-blocking, the task
/// just suspends). Permanent errors are returned immediately; after
/// exhaustion the last transient error is returned. Either way the
/// caller learns how many attempts were made.
pub(crate) async fn with_retry<F, Fut, T>(
    config: &RetryConfig,
    provider_name: &str,
    f: F,
) -> Attempted<T>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut last_err = None;
    let mut attempts = 0;
    for attempt in 0..config.max_attempts {
        attempts += 1;
        match f().await {
            Ok(result) => {
                return Attempted {
                    result: Ok(result),
                    attempts,
                };
            }
            Err(e) if e.is_transient() => {
                if attempt + 1 < config.max_attempts {
                    metrics::counter!(telemetry::RETRIES_TOTAL,
                        "provider" => provider_name.to_owned(),
                    )
                    .increment(1);
                    let delay =
                        config.effective_delay(attempt, e.retry_after()) + config.sample_jitter();
                    warn!(
                        provider = provider_name,
                        attempt = attempt + 1,
                        max_attempts = config.max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "retrying after transient error"
                    );
                    tokio::time::sleep(delay).await;
                }
                last_err = Some(e);
            }
            // permanent error, no retry
            Err(e) => {
                return Attempted {
                    result: Err(e),
                    attempts,
                };
            }
        }
    }
    Attempted {
        result: Err(last_err.unwrap_or(VerdictError::NoProvider)),
        attempts,
    }
}
