//! Retry policy and the generic call-with-retry helper.

use std::future::Future;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::ports::ResumeAIError;

/// How many times to retry and how long to wait in between.
///
/// The delay before retry `n` (1-based) is `base_delay * 2^(n-1)`,
/// optionally capped by `max_delay`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay: Duration,
    pub max_delay: Option<Duration>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_secs(1),
            max_delay: None,
        }
    }
}

impl RetryPolicy {
    pub fn new(max_retries: u32, base_delay: Duration) -> Self {
        Self {
            max_retries,
            base_delay,
            max_delay: None,
        }
    }

    /// A policy that makes a single attempt.
    pub fn none() -> Self {
        Self::new(0, Duration::ZERO)
    }

    pub fn with_max_delay(mut self, max_delay: Duration) -> Self {
        self.max_delay = Some(max_delay);
        self
    }

    /// Total attempts, the first call included.
    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// Backoff to wait after failed attempt number `attempt` (1-based).
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(31);
        let delay = self.base_delay.saturating_mul(1u32 << exponent);
        match self.max_delay {
            Some(cap) => delay.min(cap),
            None => delay,
        }
    }
}

/// Runs `call` until it succeeds, fails permanently, runs out of attempts,
/// or `cancel` fires.
///
/// Only retryable provider errors are retried. Exhaustion returns
/// [`ResumeAIError::RetriesExhausted`] carrying the last cause.
pub async fn call_with_retry<T, F, Fut>(
    policy: &RetryPolicy,
    cancel: &CancellationToken,
    operation: &str,
    mut call: F,
) -> Result<T, ResumeAIError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ResumeAIError>>,
{
    let max_attempts = policy.max_attempts();
    let mut attempt = 1;

    loop {
        if cancel.is_cancelled() {
            return Err(ResumeAIError::Cancelled);
        }

        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(ResumeAIError::Cancelled),
            result = call() => result,
        };

        let last_error = match result {
            Ok(value) => {
                if attempt > 1 {
                    tracing::info!(operation, attempt, "AI call recovered after retry");
                }
                return Ok(value);
            }
            Err(ResumeAIError::Provider(err)) if err.is_retryable() => err,
            Err(err) => return Err(err),
        };

        if attempt >= max_attempts {
            tracing::error!(
                operation,
                attempts = attempt,
                error = %last_error,
                "AI call failed, retries exhausted"
            );
            return Err(ResumeAIError::RetriesExhausted {
                attempts: attempt,
                last_error,
            });
        }

        let delay = policy.delay_for(attempt);
        tracing::warn!(
            operation,
            attempt,
            delay_ms = delay.as_millis() as u64,
            error = %last_error,
            "AI call failed, retrying"
        );

        tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(ResumeAIError::Cancelled),
            _ = tokio::time::sleep(delay) => {}
        }
        attempt += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::AIError;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;
    use tokio::time::Instant;

    fn failing_then_ok(
        failures: u32,
        error: AIError,
    ) -> (Arc<AtomicU32>, impl FnMut() -> std::future::Ready<Result<u32, ResumeAIError>>) {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();
        let call = move || {
            let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
            let result = if n <= failures {
                Err(ResumeAIError::Provider(error.clone()))
            } else {
                Ok(n)
            };
            std::future::ready(result)
        };
        (calls, call)
    }

    #[test]
    fn delay_doubles_per_attempt() {
        let policy = RetryPolicy::new(3, Duration::from_millis(100));
        assert_eq!(policy.delay_for(1), Duration::from_millis(100));
        assert_eq!(policy.delay_for(2), Duration::from_millis(200));
        assert_eq!(policy.delay_for(3), Duration::from_millis(400));
        assert_eq!(policy.max_attempts(), 4);
    }

    #[test]
    fn delay_respects_cap() {
        let policy = RetryPolicy::new(10, Duration::from_secs(1)).with_max_delay(Duration::from_secs(5));
        assert_eq!(policy.delay_for(8), Duration::from_secs(5));
        assert_eq!(policy.delay_for(u32::MAX), Duration::from_secs(5));
    }

    #[tokio::test(start_paused = true)]
    async fn recovers_after_two_rate_limits() {
        let policy = RetryPolicy::default();
        let (calls, call) = failing_then_ok(2, AIError::rate_limited(1));
        let start = Instant::now();

        let result = call_with_retry(&policy, &CancellationToken::new(), "score_match", call).await;

        assert_eq!(result.unwrap(), 3);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        // 1s + 2s of backoff
        assert_eq!(start.elapsed(), Duration::from_secs(3));
    }

    #[tokio::test(start_paused = true)]
    async fn exhausts_after_max_retries_plus_one_attempts() {
        let policy = RetryPolicy::new(3, Duration::from_secs(1));
        let (calls, call) = failing_then_ok(u32::MAX, AIError::unavailable("down"));

        let err = call_with_retry(&policy, &CancellationToken::new(), "analyze_job", call)
            .await
            .unwrap_err();

        assert_eq!(calls.load(Ordering::SeqCst), 4);
        assert_eq!(
            err,
            ResumeAIError::RetriesExhausted {
                attempts: 4,
                last_error: AIError::unavailable("down"),
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn permanent_errors_are_not_retried() {
        let policy = RetryPolicy::default();
        let (calls, call) = failing_then_ok(u32::MAX, AIError::AuthenticationFailed);

        let err = call_with_retry(&policy, &CancellationToken::new(), "tailor_bullet", call)
            .await
            .unwrap_err();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(err, ResumeAIError::Provider(AIError::AuthenticationFailed));
    }

    #[tokio::test(start_paused = true)]
    async fn malformed_output_is_not_retried() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();
        let policy = RetryPolicy::default();

        let err = call_with_retry(&policy, &CancellationToken::new(), "score_match", || {
            counter.fetch_add(1, Ordering::SeqCst);
            std::future::ready(Err::<(), _>(ResumeAIError::malformed("score_match", "no JSON")))
        })
        .await
        .unwrap_err();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(matches!(err, ResumeAIError::MalformedOutput { .. }));
    }

    #[tokio::test(start_paused = true)]
    async fn cancellation_aborts_pending_sleep() {
        let policy = RetryPolicy::new(3, Duration::from_secs(60));
        let cancel = CancellationToken::new();
        let (calls, call) = failing_then_ok(u32::MAX, AIError::rate_limited(60));

        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(5)).await;
            trigger.cancel();
        });

        let start = Instant::now();
        let err = call_with_retry(&policy, &cancel, "analyze_job", call)
            .await
            .unwrap_err();

        assert_eq!(err, ResumeAIError::Cancelled);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(start.elapsed() < Duration::from_secs(60));
    }

    #[tokio::test]
    async fn already_cancelled_makes_no_attempt() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let (calls, call) = failing_then_ok(0, AIError::rate_limited(1));

        let err = call_with_retry(&RetryPolicy::default(), &cancel, "analyze_job", call)
            .await
            .unwrap_err();

        assert_eq!(err, ResumeAIError::Cancelled);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}
