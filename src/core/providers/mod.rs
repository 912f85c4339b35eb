//! Provider adapters
//!
//! Each upstream provider is reached through one [`ProviderAdapter`]. An
//! adapter turns the normalized request surface into that provider's call and
//! the reply into a [`ProviderResult`], or fails with an [`AiError`].
//!
//! Adapters never retry on their own; retrying and failover belong to the
//! router. Adding a provider means adding a [`ProviderId`] variant, an adapter
//! type and one arm in [`build_adapter`].

pub mod anthropic;
pub mod gemini;
pub mod http;
pub mod ollama;
pub mod openai;
pub mod provider_id;

pub use anthropic::AnthropicAdapter;
pub use gemini::GeminiAdapter;
pub use http::HttpClient;
pub use ollama::OllamaAdapter;
pub use openai::OpenAiAdapter;
pub use provider_id::ProviderId;

use crate::config::RouterConfig;
use crate::core::types::ProviderResult;
use crate::utils::error::AiError;
use async_trait::async_trait;
use std::sync::Arc;

/// One upstream completion provider
#[async_trait]
pub trait ProviderAdapter: Send + Sync {
    /// Which provider this adapter talks to
    fn provider(&self) -> ProviderId;

    /// Model used when the caller does not pick one
    fn default_model(&self) -> &str;

    /// Run one completion.
    ///
    /// The override surface is positional and always in this order. Any of
    /// `model`, `temperature` and `max_tokens` may be unset, in which case
    /// the provider's own default applies.
    ///
    /// # Errors
    ///
    /// Fails before any network traffic when the adapter's credential is not
    /// configured (the message names the missing key). Transport errors,
    /// non-success statuses and undecodable replies are upstream errors.
    async fn call(
        &self,
        prompt: &str,
        model: Option<&str>,
        temperature: Option<f64>,
        max_tokens: Option<u32>,
        json_mode: bool,
    ) -> Result<ProviderResult, AiError>;
}

/// Construct the adapter for `provider` from resolved configuration
pub fn build_adapter(
    provider: ProviderId,
    config: &RouterConfig,
    http: &HttpClient,
) -> Arc<dyn ProviderAdapter> {
    let settings = config.provider_settings(provider);
    match provider {
        ProviderId::OpenAi => Arc::new(OpenAiAdapter::new(settings, http.clone())),
        ProviderId::Gemini => Arc::new(GeminiAdapter::new(settings, http.clone())),
        ProviderId::Anthropic => Arc::new(AnthropicAdapter::new(settings, http.clone())),
        ProviderId::Ollama => Arc::new(OllamaAdapter::new(settings, http.clone())),
    }
}
