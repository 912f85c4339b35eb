//! Router: the public dispatch entry point

use super::chain::ProviderChain;
use super::failover::FailoverOrchestrator;
use super::normalize::build_response;
use super::retry::{RetryExecutor, RetryPolicy};
use crate::config::RouterConfig;
use crate::core::providers::{HttpClient, ProviderAdapter, ProviderId, build_adapter};
use crate::core::types::{AiResponse, CallRequest};
use crate::utils::error::Result;
use std::sync::Arc;
use tokio::time::Instant;
use tracing::{debug, info};

/// Dispatches completion requests across the configured provider chain.
///
/// Configuration and the chain are fixed at construction, so one router can
/// be shared (e.g. behind an `Arc` or in a static) and called concurrently.
/// Each `dispatch` has at most one upstream request in flight.
#[derive(Debug)]
pub struct Router {
    config: RouterConfig,
    chain: ProviderChain,
}

impl Router {
    /// Build a router with the HTTP adapters for every configured provider
    pub fn new(config: RouterConfig) -> Result<Self> {
        let http = HttpClient::new(config.request_timeout)?;
        Ok(Self::with_adapter_factory(config, |provider, config| {
            build_adapter(provider, config, &http)
        }))
    }

    /// Resolve configuration from the environment and build a router
    pub fn from_env() -> Result<Self> {
        Self::new(RouterConfig::from_env()?)
    }

    /// Build a router whose adapters come from `factory`
    pub fn with_adapter_factory<F>(config: RouterConfig, factory: F) -> Self
    where
        F: FnMut(ProviderId, &RouterConfig) -> Arc<dyn ProviderAdapter>,
    {
        let chain = ProviderChain::resolve(&config, factory);
        info!(
            chain = ?chain.providers(),
            max_attempts = config.retry.max_attempts,
            delay_secs = config.retry.delay.as_secs(),
            "router initialized"
        );
        Self { config, chain }
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    pub fn chain(&self) -> &ProviderChain {
        &self.chain
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.config.retry
    }

    /// Run one completion, failing over along the chain.
    ///
    /// # Errors
    ///
    /// Returns an exhaustion [`AiError`](crate::AiError) once every provider
    /// in the chain has used up its retry budget. Per-attempt failures are
    /// never surfaced on their own.
    pub async fn dispatch(&self, request: CallRequest) -> Result<AiResponse> {
        let start = Instant::now();
        debug!(
            chain = ?self.chain.providers(),
            model = ?request.model,
            json_mode = request.json_mode,
            "dispatching completion"
        );

        let executor = RetryExecutor::new(self.config.retry);
        let orchestrator = FailoverOrchestrator::new(&self.chain, executor);
        let success = orchestrator.run(&request).await?;

        let elapsed = start.elapsed();
        let response = build_response(success.result, success.provider, &request.meta, elapsed);

        info!(
            provider = %response.provider,
            model = %response.model,
            tokens = response.tokens_used,
            latency_ms = response.latency_ms,
            attempts = success.total_attempts,
            used_fallback = success.used_fallback,
            "completion succeeded"
        );

        Ok(response)
    }
}
