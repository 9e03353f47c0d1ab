//! Bounded retry wrapper for fallible backend invocations.

use std::future::Future;
use tessera_error::{RetryableError, TesseraError, TesseraResult};
use tokio_retry2::{Retry, RetryError, strategy::ExponentialBackoff, strategy::jitter};
use tracing::warn;

/// Attempt budget and backoff shape for one call site.
///
/// Only decode and validation failures are retried; any other error class
/// propagates on the first attempt. On exhaustion the last error is
/// re-raised unchanged.
///
/// # Examples
///
/// ```
/// use tessera_backend::RetryPolicy;
///
/// let policy = RetryPolicy::default();
/// assert_eq!(policy.max_attempts(), 5);
///
/// let patient = RetryPolicy::new(8).with_initial_backoff_ms(1000);
/// assert_eq!(patient.max_attempts(), 8);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: usize,
    initial_backoff_ms: u64,
    max_delay_secs: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            initial_backoff_ms: 500,
            max_delay_secs: 30,
        }
    }
}

impl RetryPolicy {
    /// A policy with the given attempt budget and default backoff.
    pub fn new(max_attempts: usize) -> Self {
        Self {
            max_attempts,
            ..Self::default()
        }
    }

    /// Total attempts, first invocation included.
    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// Override the initial backoff delay.
    pub fn with_initial_backoff_ms(mut self, ms: u64) -> Self {
        self.initial_backoff_ms = ms;
        self
    }

    /// Override the backoff delay cap.
    pub fn with_max_delay_secs(mut self, secs: u64) -> Self {
        self.max_delay_secs = secs;
        self
    }
}

/// Invoke a fallible async operation under a retry policy.
///
/// Retries only errors whose kind reports
/// [`is_retryable`](RetryableError::is_retryable) — decode and validation
/// failures at the backend boundary. Each retry is logged; after the
/// attempt budget is exhausted the last error is returned unchanged. Any
/// other error propagates immediately.
///
/// # Errors
///
/// Returns the operation's error, unchanged, on a permanent failure or on
/// retry exhaustion.
pub async fn invoke_with_retry<T, F, Fut>(policy: &RetryPolicy, operation: F) -> TesseraResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = TesseraResult<T>>,
{
    let strategy = ExponentialBackoff::from_millis(policy.initial_backoff_ms)
        .factor(2)
        .max_delay(std::time::Duration::from_secs(policy.max_delay_secs))
        .map(jitter)
        .take(policy.max_attempts.saturating_sub(1));

    let mut operation = operation;
    Retry::spawn(strategy, move || {
        let attempt = operation();
        async move {
            match attempt.await {
                Ok(value) => Ok(value),
                Err(e) if e.is_retryable() => {
                    warn!(error = %e, "transient backend failure, will retry");
                    Err(RetryError::Transient {
                        err: e,
                        retry_after: None,
                    })
                }
                Err(e) => Err(RetryError::Permanent(e)),
            }
        }
    })
    .await
}

/// Convenience: retry with the default policy.
///
/// # Errors
///
/// Same as [`invoke_with_retry`].
pub async fn invoke_with_default_retry<T, F, Fut>(operation: F) -> TesseraResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, TesseraError>>,
{
    invoke_with_retry(&RetryPolicy::default(), operation).await
}
