//! Bounded exponential-backoff retry for remote calls.
//!
//! Wraps a single asynchronous operation and retries it only on
//! timeout-classified failures. Any other error class propagates to the
//! caller unchanged, with no further attempts.

use std::future::Future;
use std::time::Duration;
use tracing::warn;

use crate::config::RetryConfig;
use crate::platform::PlatformError;

// ---------------------------------------------------------------------------
// Policy
// ---------------------------------------------------------------------------

/// Retry limits, fixed at startup and passed into the executor.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Maximum number of invocations of the wrapped operation.
    pub max_attempts: u32,
    /// Delay after the first timeout; doubles after each subsequent one.
    pub base_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            base_backoff: Duration::from_millis(10_000),
        }
    }
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(cfg: &RetryConfig) -> Self {
        Self {
            max_attempts: cfg.max_attempts,
            base_backoff: Duration::from_millis(cfg.base_backoff_ms),
        }
    }
}

impl RetryPolicy {
    /// Backoff before retrying after failure number `attempt` (1-indexed):
    /// `base * 2^(attempt - 1)`.
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        self.base_backoff
            .saturating_mul(2u32.saturating_pow(attempt.saturating_sub(1)))
    }
}

// ---------------------------------------------------------------------------
// Executor
// ---------------------------------------------------------------------------

/// Invoke `call` until it succeeds, fails with a non-retryable error, or
/// exhausts the attempt budget.
///
/// A first-try success returns immediately with no retry overhead. Each
/// timeout-classified failure logs one line and sleeps the computed
/// backoff before the next attempt — except the last permitted attempt,
/// which falls through to [`PlatformError::RetryExhausted`] without
/// sleeping again.
pub async fn execute_with_retry<T, F, Fut>(
    policy: &RetryPolicy,
    operation: &str,
    mut call: F,
) -> Result<T, PlatformError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, PlatformError>>,
{
    let mut attempt = 0u32;

    loop {
        match call().await {
            Ok(value) => return Ok(value),
            Err(err) if err.is_timeout() => {
                attempt += 1;
                if attempt >= policy.max_attempts {
                    return Err(PlatformError::RetryExhausted {
                        operation: operation.to_string(),
                        attempts: policy.max_attempts,
                    });
                }

                let delay = policy.backoff_delay(attempt);
                warn!(
                    operation,
                    attempt,
                    max_attempts = policy.max_attempts,
                    delay_ms = delay.as_millis() as u64,
                    "Request timed out, backing off before retry"
                );
                tokio::time::sleep(delay).await;
            }
            Err(err) => return Err(err),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
