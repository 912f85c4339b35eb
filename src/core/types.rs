//! Request and response types shared by the router and its adapters

use crate::core::providers::ProviderId;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// One logical completion request.
///
/// Built once per call and threaded unchanged into every adapter attempt of
/// the provider chain. Unset overrides are left to each adapter's defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CallRequest {
    pub prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(default)]
    pub json_mode: bool,
    /// Caller metadata, passed through to the response
    #[serde(default)]
    pub meta: HashMap<String, Value>,
}

impl CallRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    #[must_use]
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    #[must_use]
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    #[must_use]
    pub fn with_json_mode(mut self, json_mode: bool) -> Self {
        self.json_mode = json_mode;
        self
    }

    /// Add one caller metadata entry
    #[must_use]
    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.meta.insert(key.into(), value.into());
        self
    }

    /// Replace the caller metadata mapping
    #[must_use]
    pub fn with_meta_map(mut self, meta: HashMap<String, Value>) -> Self {
        self.meta = meta;
        self
    }
}

/// What an adapter returns for one successful upstream call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProviderResult {
    /// Completion text
    pub content: String,
    /// Model the provider actually used (may be a resolved alias)
    pub model: String,
    /// Total token usage, `0` if the provider did not report it
    pub tokens: u64,
    /// Provider-specific extras
    pub metadata: HashMap<String, Value>,
}

impl ProviderResult {
    pub fn new(content: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            model: model.into(),
            tokens: 0,
            metadata: HashMap::new(),
        }
    }

    #[must_use]
    pub fn with_tokens(mut self, tokens: u64) -> Self {
        self.tokens = tokens;
        self
    }

    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

/// Public, immutable result of a dispatch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiResponse {
    pub content: String,
    pub model: String,
    pub provider: ProviderId,
    pub tokens_used: u64,
    pub latency_ms: u64,
    pub metadata: HashMap<String, Value>,
}

impl AiResponse {
    /// Structured view with keys `content, model, provider, tokens_used,
    /// latency_ms, metadata`
    pub fn to_dict(&self) -> serde_json::Map<String, Value> {
        // A struct with string-keyed fields always serializes to an object
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => serde_json::Map::new(),
        }
    }

    /// Serialized text view of [`AiResponse::to_dict`]
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    pub fn from_dict(map: serde_json::Map<String, Value>) -> serde_json::Result<Self> {
        serde_json::from_value(Value::Object(map))
    }
}
