//! Ollama chat adapter
//!
//! Ollama needs no API key; `OLLAMA_BASE_URL` is the setting it cannot run
//! without.

use super::http::{HttpClient, join_url};
use super::{ProviderAdapter, ProviderId};
use crate::config::ProviderSettings;
use crate::config::keys;
use crate::core::types::ProviderResult;
use crate::utils::error::AiError;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

pub const DEFAULT_MODEL: &str = "llama3.1";

#[derive(Debug, Deserialize)]
struct ChatResponse {
    model: Option<String>,
    message: Option<ChatMessage>,
    #[serde(default)]
    prompt_eval_count: u64,
    #[serde(default)]
    eval_count: u64,
    done_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: String,
}

#[derive(Debug, Clone)]
pub struct OllamaAdapter {
    settings: ProviderSettings,
    http: HttpClient,
}

impl OllamaAdapter {
    pub fn new(settings: ProviderSettings, http: HttpClient) -> Self {
        Self { settings, http }
    }
}

#[async_trait]
impl ProviderAdapter for OllamaAdapter {
    fn provider(&self) -> ProviderId {
        ProviderId::Ollama
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
        let base_url = self
            .settings
            .credential
            .as_deref()
            .ok_or_else(|| AiError::missing_credential(ProviderId::Ollama, keys::OLLAMA_BASE_URL))?;

        let requested_model = model.unwrap_or(DEFAULT_MODEL);

        let mut options = serde_json::Map::new();
        if let Some(temperature) = temperature {
            options.insert("temperature".into(), json!(temperature));
        }
        if let Some(max_tokens) = max_tokens {
            options.insert("num_predict".into(), json!(max_tokens));
        }

        let mut body = json!({
            "model": requested_model,
            "messages": [{"role": "user", "content": prompt}],
            "stream": false,
        });
        if !options.is_empty() {
            body["options"] = serde_json::Value::Object(options);
        }
        if json_mode {
            body["format"] = json!("json");
        }

        let response: ChatResponse = self
            .http
            .post_json(
                ProviderId::Ollama,
                &join_url(base_url, "api/chat"),
                &[],
                &body,
            )
            .await?;

        let message = response.message.ok_or_else(|| {
            AiError::upstream(ProviderId::Ollama, "Ollama response contained no message")
        })?;

        let tokens = u64::saturating_add(response.prompt_eval_count, response.eval_count);
        let model = response.model.unwrap_or_else(|| requested_model.into());
        let mut result = ProviderResult::new(message.content, model).with_tokens(tokens);
        if let Some(reason) = response.done_reason {
            result = result.with_metadata("done_reason", reason);
        }

        Ok(result)
    }
}
