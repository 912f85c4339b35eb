//! Bounded per-provider retry
//!
//! [`RetryExecutor`] runs one provider's operation up to
//! [`RetryPolicy::max_attempts`] times, waiting [`RetryPolicy::delay`]
//! between failed attempts but never after the last one. Every error counts
//! as retryable; the executor does not inspect error kinds.

use crate::core::providers::ProviderId;
use crate::utils::error::AiError;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

/// Retry budget shared by every provider of one router
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Attempts per provider, always at least 1
    pub max_attempts: u32,
    /// Fixed wait between failed attempts against the same provider
    pub delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }

    /// Policy without any wait between attempts
    pub fn immediate(max_attempts: u32) -> Self {
        Self::new(max_attempts, Duration::ZERO)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_secs(2))
    }
}

/// A provider ran out of attempts.
///
/// Consumed by the failover orchestrator; never surfaced to callers as is.
#[derive(Debug, Clone)]
pub struct TerminalFailure {
    pub provider: ProviderId,
    pub attempts: u32,
    pub last_error: AiError,
}

/// Runs an operation under a [`RetryPolicy`]
#[derive(Debug, Clone, Copy)]
pub struct RetryExecutor {
    policy: RetryPolicy,
}

impl RetryExecutor {
    pub fn new(policy: RetryPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Run `operation` (given the 1-based attempt number) until it succeeds
    /// or the budget is spent. Returns the value and the attempt it took.
    ///
    /// Attempts are strictly sequential. The wait is a `tokio` sleep, so
    /// dropping the returned future cancels a pending wait as well.
    pub async fn execute<T, F, Fut>(
        &self,
        provider: ProviderId,
        mut operation: F,
    ) -> Result<(T, u32), TerminalFailure>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, AiError>>,
    {
        let max_attempts = self.policy.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            debug!(provider = %provider, attempt, max_attempts, "attempting provider");

            match operation(attempt).await {
                Ok(value) => return Ok((value, attempt)),
                Err(err) => {
                    warn!(
                        provider = %provider,
                        attempt,
                        max_attempts,
                        error = %err,
                        "provider attempt failed"
                    );

                    if attempt >= max_attempts {
                        return Err(TerminalFailure {
                            provider,
                            attempts: attempt,
                            last_error: err,
                        });
                    }

                    if !self.policy.delay.is_zero() {
                        tokio::time::sleep(self.policy.delay).await;
                    }
                    attempt += 1;
                }
            }
        }
    }
}
