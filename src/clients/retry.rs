use std::{fmt::Display, future::Future, time::Duration};

use log::warn;
use rand::Rng;

/// Errors that know whether re-issuing the failed call can succeed.
pub trait Retryable {
    /// Rate limiting, temporary server failures and refused connections.
    fn is_transient(&self) -> bool;

    /// Delay requested by the service itself, if any.
    fn retry_after(&self) -> Option<Duration> {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy {
            max_retries: 2,
            base_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(30),
        }
    }
}

impl RetryPolicy {
    /// Policy that gives up on the first failure.
    pub fn none() -> Self {
        RetryPolicy {
            max_retries: 0,
            ..Default::default()
        }
    }

    /// Exponential backoff with up to 50% jitter, never shorter than what the
    /// service asked for and never longer than `max_delay`.
    pub fn delay_for(&self, attempt: u32, retry_after: Option<Duration>) -> Duration {
        let base_ms = u64::try_from(self.base_delay.as_millis()).unwrap_or(u64::MAX);
        let backoff_ms = base_ms.saturating_mul(1u64 << attempt.min(16));
        let jitter_ms = if base_ms > 1 {
            rand::rng().random_range(0..=base_ms / 2)
        } else {
            0
        };
        let mut delay = Duration::from_millis(backoff_ms.saturating_add(jitter_ms));
        if let Some(requested) = retry_after {
            delay = delay.max(requested);
        }
        delay.min(self.max_delay)
    }
}

/// Runs `call` until it succeeds, fails permanently, or the policy runs out of retries.
pub async fn with_retry<T, E, F, Fut>(policy: &RetryPolicy, operation: &str, call: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Retryable + Display,
{
    with_retry_when(policy, operation, E::is_transient, call).await
}

/// Like [`with_retry`], but only errors accepted by `should_retry` are retried.
///
/// Non-idempotent calls pass a stricter predicate than [`Retryable::is_transient`].
pub async fn with_retry_when<T, E, P, F, Fut>(
    policy: &RetryPolicy,
    operation: &str,
    should_retry: P,
    mut call: F,
) -> Result<T, E>
where
    P: Fn(&E) -> bool,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Retryable + Display,
{
    let mut attempt = 0;
    loop {
        match call().await {
            Ok(value) => return Ok(value),
            Err(err) if attempt < policy.max_retries && should_retry(&err) => {
                let delay = policy.delay_for(attempt, err.retry_after());
                warn!(
                    "{operation} failed ({err}), retry {}/{} in {delay:?}",
                    attempt + 1,
                    policy.max_retries
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}
