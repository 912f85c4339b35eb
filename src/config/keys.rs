//! Configuration key names

use crate::core::providers::ProviderId;

pub const PRIMARY: &str = "AI_PROVIDER_PRIMARY";
/// Older deployments still name the primary provider with this key
pub const LEGACY_PRIMARY: &str = "IPAI_AI_PROVIDER";
pub const SECONDARY: &str = "AI_PROVIDER_SECONDARY";
pub const TERTIARY: &str = "AI_PROVIDER_TERTIARY";
pub const RETRY_ATTEMPTS: &str = "AI_PROVIDER_RETRY_ATTEMPTS";
pub const RETRY_DELAY: &str = "AI_PROVIDER_RETRY_DELAY";
pub const REQUEST_TIMEOUT: &str = "AI_PROVIDER_TIMEOUT";

pub const LLM_API_KEY: &str = "LLM_API_KEY";
pub const ANTHROPIC_API_KEY: &str = "ANTHROPIC_API_KEY";
pub const GEMINI_API_KEY: &str = "GEMINI_API_KEY";
pub const OLLAMA_BASE_URL: &str = "OLLAMA_BASE_URL";

pub const OPENAI_BASE_URL: &str = "OPENAI_BASE_URL";
pub const ANTHROPIC_BASE_URL: &str = "ANTHROPIC_BASE_URL";
pub const GEMINI_BASE_URL: &str = "GEMINI_BASE_URL";

/// Key holding the setting an adapter cannot run without
pub fn credential_key(provider: ProviderId) -> &'static str {
    match provider {
        ProviderId::OpenAi => LLM_API_KEY,
        ProviderId::Anthropic => ANTHROPIC_API_KEY,
        ProviderId::Gemini => GEMINI_API_KEY,
        ProviderId::Ollama => OLLAMA_BASE_URL,
    }
}

/// Key overriding a hosted provider's endpoint. Ollama has none: its
/// endpoint is its credential.
pub fn base_url_key(provider: ProviderId) -> Option<&'static str> {
    match provider {
        ProviderId::OpenAi => Some(OPENAI_BASE_URL),
        ProviderId::Anthropic => Some(ANTHROPIC_BASE_URL),
        ProviderId::Gemini => Some(GEMINI_BASE_URL),
        ProviderId::Ollama => None,
    }
}
