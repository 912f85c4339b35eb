//! OpenAI chat completions adapter
//!
//! Authenticates with the generic `LLM_API_KEY`.

use super::http::{HttpClient, join_url};
use super::{ProviderAdapter, ProviderId};
use crate::config::ProviderSettings;
use crate::config::keys;
use crate::core::types::ProviderResult;
use crate::utils::error::AiError;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    id: Option<String>,
    model: Option<String>,
    #[serde(default)]
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    total_tokens: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct OpenAiAdapter {
    settings: ProviderSettings,
    http: HttpClient,
}

impl OpenAiAdapter {
    pub fn new(settings: ProviderSettings, http: HttpClient) -> Self {
        Self { settings, http }
    }

    fn base_url(&self) -> &str {
        self.settings.base_url_or(DEFAULT_BASE_URL)
    }
}

#[async_trait]
impl ProviderAdapter for OpenAiAdapter {
    fn provider(&self) -> ProviderId {
        ProviderId::OpenAi
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
        let api_key = self
            .settings
            .credential
            .as_deref()
            .ok_or_else(|| AiError::missing_credential(ProviderId::OpenAi, keys::LLM_API_KEY))?;

        let requested_model = model.unwrap_or(DEFAULT_MODEL);
        let mut body = json!({
            "model": requested_model,
            "messages": [{"role": "user", "content": prompt}],
        });
        if let Some(temperature) = temperature {
            body["temperature"] = json!(temperature);
        }
        if let Some(max_tokens) = max_tokens {
            body["max_tokens"] = json!(max_tokens);
        }
        if json_mode {
            body["response_format"] = json!({"type": "json_object"});
        }

        let authorization = format!("Bearer {}", api_key);
        let response: ChatCompletionResponse = self
            .http
            .post_json(
                ProviderId::OpenAi,
                &join_url(self.base_url(), "chat/completions"),
                &[("Authorization", authorization.as_str())],
                &body,
            )
            .await?;

        let choice = response.choices.into_iter().next().ok_or_else(|| {
            AiError::upstream(ProviderId::OpenAi, "OpenAI response contained no choices")
        })?;

        let content = choice.message.content.unwrap_or_default();
        let model = response.model.unwrap_or_else(|| requested_model.into());
        let tokens = response.usage.and_then(|u| u.total_tokens).unwrap_or(0);
        let mut result = ProviderResult::new(content, model).with_tokens(tokens);
        if let Some(id) = response.id {
            result = result.with_metadata("response_id", id);
        }
        if let Some(reason) = choice.finish_reason {
            result = result.with_metadata("finish_reason", reason);
        }

        Ok(result)
    }
}
