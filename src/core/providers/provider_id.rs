//! Provider identifiers

use crate::utils::error::AiError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Upstream provider kinds the router can dispatch to.
///
/// Used both as a configuration value (`AI_PROVIDER_PRIMARY=gemini`) and as
/// the `provider` field of a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    OpenAi,
    Gemini,
    Anthropic,
    Ollama,
}

impl ProviderId {
    pub const ALL: [ProviderId; 4] = [
        ProviderId::OpenAi,
        ProviderId::Gemini,
        ProviderId::Anthropic,
        ProviderId::Ollama,
    ];

    /// Identifier as written in configuration and responses
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::OpenAi => "openai",
            ProviderId::Gemini => "gemini",
            ProviderId::Anthropic => "anthropic",
            ProviderId::Ollama => "ollama",
        }
    }

    /// Human-readable vendor name for messages
    pub fn display_name(&self) -> &'static str {
        match self {
            ProviderId::OpenAi => "OpenAI",
            ProviderId::Gemini => "Gemini",
            ProviderId::Anthropic => "Anthropic",
            ProviderId::Ollama => "Ollama",
        }
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderId {
    type Err = AiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "openai" => Ok(ProviderId::OpenAi),
            "gemini" | "google" => Ok(ProviderId::Gemini),
            "anthropic" | "claude" => Ok(ProviderId::Anthropic),
            "ollama" => Ok(ProviderId::Ollama),
            _ => Err(AiError::configuration(format!(
                "Unknown AI provider '{}'. Supported providers: openai, gemini, anthropic, ollama",
                s.trim()
            ))),
        }
    }
}
