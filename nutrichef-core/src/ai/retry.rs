//! Retry wrapper for AI clients.
//!
//! Wraps any `AiClient` and re-issues failed calls according to a
//! `RetryPolicy`. The default policy makes a single attempt.

use async_trait::async_trait;
use std::time::Duration;

use super::client::{AiClient, AiError};
use super::types::{ChatRequest, ChatResponse};

/// How many times to try a provider call and how long to wait in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts including the first one. Always at least 1.
    pub max_attempts: u32,
    /// Delay before the second attempt; doubles for each further attempt.
    pub initial_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::single_attempt()
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, initial_backoff: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            initial_backoff,
        }
    }

    pub fn single_attempt() -> Self {
        Self::new(1, Duration::ZERO)
    }

    /// Delay to wait after the given failed attempt (1-based).
    pub fn backoff_after(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(16);
        self.initial_backoff.saturating_mul(1 << exponent)
    }
}

/// An `AiClient` that retries retryable failures of an inner client.
pub struct RetryingClient {
    inner: Box<dyn AiClient>,
    policy: RetryPolicy,
}

impl RetryingClient {
    pub fn new(inner: Box<dyn AiClient>, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }
}

#[async_trait]
impl AiClient for RetryingClient {
    async fn complete(
        &self,
        prompt_name: &str,
        request: ChatRequest,
    ) -> Result<ChatResponse, AiError> {
        let mut attempt = 1;
        loop {
            match self.inner.complete(prompt_name, request.clone()).await {
                Ok(response) => return Ok(response),
                Err(e) if e.is_retryable() && attempt < self.policy.max_attempts => {
                    let delay = self.policy.backoff_after(attempt);
                    tracing::warn!(
                        prompt_name = prompt_name,
                        attempt = attempt,
                        max_attempts = self.policy.max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "AI call failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn model_name(&self) -> &str {
        self.inner.model_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::FakeAiClient;

    #[test]
    fn test_backoff_doubles() {
        let policy = RetryPolicy::new(4, Duration::from_millis(100));
        assert_eq!(policy.backoff_after(1), Duration::from_millis(100));
        assert_eq!(policy.backoff_after(2), Duration::from_millis(200));
        assert_eq!(policy.backoff_after(3), Duration::from_millis(400));
    }

    #[test]
    fn test_zero_attempts_clamped() {
        assert_eq!(RetryPolicy::new(0, Duration::ZERO).max_attempts, 1);
    }

    #[tokio::test]
    async fn test_retries_until_success() {
        let fake = FakeAiClient::new()
            .with_failures(2)
            .with_default_response("ok");
        let log = fake.call_log();
        let client = RetryingClient::new(Box::new(fake), RetryPolicy::new(3, Duration::ZERO));

        let response = client
            .complete("test", ChatRequest::default())
            .await
            .unwrap();
        assert_eq!(response.content, "ok");
        assert_eq!(log.count(), 3);
    }

    #[tokio::test]
    async fn test_single_attempt_does_not_retry() {
        let fake = FakeAiClient::new()
            .with_failures(1)
            .with_default_response("ok");
        let log = fake.call_log();
        let client = RetryingClient::new(Box::new(fake), RetryPolicy::default());

        let result = client.complete("test", ChatRequest::default()).await;
        assert!(result.is_err());
        assert_eq!(log.count(), 1);
    }

    #[tokio::test]
    async fn test_non_retryable_error_is_returned_immediately() {
        // No responses configured: the fake reports EmptyResponse, which is final.
        let fake = FakeAiClient::new();
        let log = fake.call_log();
        let client = RetryingClient::new(Box::new(fake), RetryPolicy::new(5, Duration::ZERO));

        let result = client.complete("test", ChatRequest::default()).await;
        assert!(matches!(result, Err(AiError::EmptyResponse)));
        assert_eq!(log.count(), 1);
    }
}
