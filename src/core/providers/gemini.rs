//! Google Gemini `generateContent` adapter

use super::http::{HttpClient, join_url};
use super::{ProviderAdapter, ProviderId};
use crate::config::ProviderSettings;
use crate::config::keys;
use crate::core::types::ProviderResult;
use crate::utils::error::{AiError, AiErrorKind};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    usage_metadata: Option<UsageMetadata>,
    model_version: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    total_token_count: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct GeminiAdapter {
    settings: ProviderSettings,
    http: HttpClient,
}

impl GeminiAdapter {
    pub fn new(settings: ProviderSettings, http: HttpClient) -> Self {
        Self { settings, http }
    }

    fn base_url(&self) -> &str {
        self.settings.base_url_or(DEFAULT_BASE_URL)
    }
}

#[async_trait]
impl ProviderAdapter for GeminiAdapter {
    fn provider(&self) -> ProviderId {
        ProviderId::Gemini
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
            .ok_or_else(|| AiError::missing_credential(ProviderId::Gemini, keys::GEMINI_API_KEY))?;

        let requested_model = model_id(model.unwrap_or(DEFAULT_MODEL))?;

        let mut generation_config = serde_json::Map::new();
        if let Some(temperature) = temperature {
            generation_config.insert("temperature".into(), json!(temperature));
        }
        if let Some(max_tokens) = max_tokens {
            generation_config.insert("maxOutputTokens".into(), json!(max_tokens));
        }
        if json_mode {
            generation_config.insert("responseMimeType".into(), json!("application/json"));
        }

        let mut body = json!({
            "contents": [{"role": "user", "parts": [{"text": prompt}]}],
        });
        if !generation_config.is_empty() {
            body["generationConfig"] = serde_json::Value::Object(generation_config);
        }

        let path = format!("v1beta/models/{requested_model}:generateContent");
        let response: GenerateContentResponse = self
            .http
            .post_json(
                ProviderId::Gemini,
                &join_url(self.base_url(), &path),
                &[("x-goog-api-key", api_key)],
                &body,
            )
            .await?;

        let candidate = response.candidates.into_iter().next().ok_or_else(|| {
            AiError::upstream(ProviderId::Gemini, "Gemini response had no candidates")
        })?;

        let content: String = candidate
            .content
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        let version = response.model_version;
        let model = version.unwrap_or_else(|| requested_model.into());
        let tokens = response.usage_metadata.and_then(|u| u.total_token_count);
        let mut result = ProviderResult::new(content, model).with_tokens(tokens.unwrap_or(0));
        if let Some(reason) = candidate.finish_reason {
            result = result.with_metadata("finish_reason", reason);
        }

        Ok(result)
    }
}

/// Model name as it goes into the request path. Accepts the `models/` resource
/// prefix Gemini itself reports; anything else that would change the path is
/// rejected.
fn model_id(model: &str) -> Result<&str, AiError> {
    let id = model.strip_prefix("models/").unwrap_or(model);
    if id.is_empty() || id.contains(['/', '?', '#']) {
        return Err(AiError::new(
            AiErrorKind::Configuration,
            format!("Invalid Gemini model name '{}'", model),
            Some(ProviderId::Gemini),
        ));
    }
    Ok(id)
}
