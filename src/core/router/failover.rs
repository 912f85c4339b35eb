//! Failover across the provider chain
//!
//! Walks the chain in order. Each provider gets a fresh retry budget; a
//! [`TerminalFailure`] moves on to the next provider and nothing is carried
//! across. When the chain runs out the caller sees one exhaustion error:
//!
//! - single-provider chain: `"Max retries exceeded ..."`
//! - longer chain: `"All providers failed ..."`
//!
//! Both name the last provider attempted and its last error.

use super::chain::ProviderChain;
use super::retry::{RetryExecutor, TerminalFailure};
use crate::core::providers::ProviderId;
use crate::core::types::{CallRequest, ProviderResult};
use crate::utils::error::AiError;
use tracing::{error, info};

/// Successful outcome of a failover run
#[derive(Debug, Clone)]
pub struct FailoverSuccess {
    pub provider: ProviderId,
    pub result: ProviderResult,
    /// Attempts made across every provider tried, including the winning one
    pub total_attempts: u32,
    /// Whether a provider other than the first one answered
    pub used_fallback: bool,
}

pub struct FailoverOrchestrator<'a> {
    chain: &'a ProviderChain,
    executor: RetryExecutor,
}

impl<'a> FailoverOrchestrator<'a> {
    pub fn new(chain: &'a ProviderChain, executor: RetryExecutor) -> Self {
        Self { chain, executor }
    }

    /// Run `request` against the chain until a provider answers
    pub async fn run(&self, request: &CallRequest) -> Result<FailoverSuccess, AiError> {
        let mut last_failure: Option<TerminalFailure> = None;
        let mut total_attempts = 0;

        for (index, entry) in self.chain.entries().iter().enumerate() {
            if let Some(previous) = &last_failure {
                info!(
                    from = %previous.provider,
                    to = %entry.provider,
                    "failing over to next provider"
                );
            }

            let adapter = entry.adapter.as_ref();
            let outcome = self
                .executor
                .execute(entry.provider, move |_attempt| {
                    adapter.call(
                        &request.prompt,
                        request.model.as_deref(),
                        request.temperature,
                        request.max_tokens,
                        request.json_mode,
                    )
                })
                .await;

            match outcome {
                Ok((result, attempts)) => {
                    total_attempts += attempts;
                    return Ok(FailoverSuccess {
                        provider: entry.provider,
                        result,
                        total_attempts,
                        used_fallback: index > 0,
                    });
                }
                Err(failure) => {
                    total_attempts += failure.attempts;
                    last_failure = Some(failure);
                }
            }
        }

        match last_failure {
            Some(failure) => Err(self.exhaustion_error(failure)),
            None => Err(AiError::configuration("Provider chain is empty")),
        }
    }

    fn exhaustion_error(&self, failure: TerminalFailure) -> AiError {
        let message = if self.chain.len() == 1 {
            format!(
                "Max retries exceeded for {} after {} attempts: {}",
                failure.provider, failure.attempts, failure.last_error
            )
        } else {
            format!(
                "All providers failed (last provider: {}): {}",
                failure.provider, failure.last_error
            )
        };

        error!(
            chain = ?self.chain.providers(),
            last_provider = %failure.provider,
            error = %failure.last_error,
            "provider chain exhausted"
        );

        AiError::exhausted(failure.provider, message)
    }
}
