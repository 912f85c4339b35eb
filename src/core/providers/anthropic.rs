//! Anthropic messages adapter

use super::http::{HttpClient, join_url};
use super::{ProviderAdapter, ProviderId};
use crate::config::ProviderSettings;
use crate::config::keys;
use crate::core::types::ProviderResult;
use crate::utils::error::AiError;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
pub const DEFAULT_MODEL: &str = "claude-3-5-sonnet-latest";
pub const API_VERSION: &str = "2023-06-01";
/// The messages API requires `max_tokens`
pub const DEFAULT_MAX_TOKENS: u32 = 1024;

const JSON_MODE_SYSTEM_PROMPT: &str =
    "Respond only with a single valid JSON value. Do not wrap it in prose or code fences.";

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    id: Option<String>,
    model: Option<String>,
    #[serde(default)]
    content: Vec<ContentBlock>,
    stop_reason: Option<String>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    #[serde(default)]
    input_tokens: u64,
    #[serde(default)]
    output_tokens: u64,
}

#[derive(Debug, Clone)]
pub struct AnthropicAdapter {
    settings: ProviderSettings,
    http: HttpClient,
}

impl AnthropicAdapter {
    pub fn new(settings: ProviderSettings, http: HttpClient) -> Self {
        Self { settings, http }
    }

    fn base_url(&self) -> &str {
        self.settings.base_url_or(DEFAULT_BASE_URL)
    }
}

#[async_trait]
impl ProviderAdapter for AnthropicAdapter {
    fn provider(&self) -> ProviderId {
        ProviderId::Anthropic
    }

    fn default_model(&self) -> &str {
        DEFAULT_MODEL
    }

    async fn call(
        &self,
        prompt: &str,
        model: Option<&str>,
        temperature: Option<f64>,
        max_tokens: Option<u32>,
        json_mode: bool,
    ) -> Result<ProviderResult, AiError> {
        let api_key = self.settings.credential.as_deref().ok_or_else(|| {
            AiError::missing_credential(ProviderId::Anthropic, keys::ANTHROPIC_API_KEY)
        })?;

        let requested_model = model.unwrap_or(DEFAULT_MODEL);
        let mut body = json!({
            "model": requested_model,
            "max_tokens": max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            "messages": [{"role": "user", "content": prompt}],
        });
        if let Some(temperature) = temperature {
            body["temperature"] = json!(temperature);
        }
        if json_mode {
            body["system"] = json!(JSON_MODE_SYSTEM_PROMPT);
        }

        let response: MessagesResponse = self
            .http
            .post_json(
                ProviderId::Anthropic,
                &join_url(self.base_url(), "v1/messages"),
                &[("x-api-key", api_key), ("anthropic-version", API_VERSION)],
                &body,
            )
            .await?;

        let content: String = response
            .content
            .into_iter()
            .filter(|block| block.kind == "text")
            .filter_map(|block| block.text)
            .collect();

        let tokens = response
            .usage
            .map(|u| u.input_tokens.saturating_add(u.output_tokens))
            .unwrap_or(0);

        let model = response.model.unwrap_or_else(|| requested_model.into());
        let mut result = ProviderResult::new(content, model).with_tokens(tokens);
        if let Some(id) = response.id {
            result = result.with_metadata("response_id", id);
        }
        if let Some(reason) = response.stop_reason {
            result = result.with_metadata("stop_reason", reason);
        }

        Ok(result)
    }
}
