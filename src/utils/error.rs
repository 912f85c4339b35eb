//! Error handling for the provider router
//!
//! A single caller-visible error type, [`AiError`], covers every failure the
//! router can surface. Errors are classified by origin rather than by a deep
//! variant tree:
//!
//! | Kind | Origin | Recovered locally |
//! |------|--------|-------------------|
//! | Configuration | missing credential or invalid setting | retried, then failed over |
//! | Upstream | transport error, bad status or payload | retried, then failed over |
//! | Exhausted | every provider ran out of attempts | no, surfaced to the caller |
//!
//! Callers are expected to match on [`AiError::kind`], [`AiError::provider`]
//! or the message text.

use crate::core::providers::ProviderId;

/// Result type alias for the router
pub type Result<T> = std::result::Result<T, AiError>;

/// Origin of an [`AiError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiErrorKind {
    /// A setting or credential is missing or invalid
    Configuration,
    /// A live call to a provider failed
    Upstream,
    /// Every provider in the chain exhausted its retry budget
    Exhausted,
}

/// Caller-visible router error
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct AiError {
    kind: AiErrorKind,
    message: String,
    provider: Option<ProviderId>,
}

impl AiError {
    /// Create an error of the given kind
    pub fn new(
        kind: AiErrorKind,
        message: impl Into<String>,
        provider: Option<ProviderId>,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            provider,
        }
    }

    /// Create configuration error not tied to one provider
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(AiErrorKind::Configuration, message, None)
    }

    /// Create the error an adapter raises when its credential is not configured
    pub fn missing_credential(provider: ProviderId, key: &str) -> Self {
        let name = provider.display_name();
        let message = format!("{key} not configured for {name} provider");
        Self::new(AiErrorKind::Configuration, message, Some(provider))
    }

    /// Create upstream (live call) error
    pub fn upstream(provider: ProviderId, message: impl Into<String>) -> Self {
        Self::new(AiErrorKind::Upstream, message, Some(provider))
    }

    /// Create terminal exhaustion error naming the last provider attempted
    pub fn exhausted(provider: ProviderId, message: impl Into<String>) -> Self {
        Self::new(AiErrorKind::Exhausted, message, Some(provider))
    }

    pub fn kind(&self) -> AiErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Provider the error is attributed to, if any
    pub fn provider(&self) -> Option<ProviderId> {
        self.provider
    }

    pub fn is_configuration(&self) -> bool {
        self.kind == AiErrorKind::Configuration
    }

    pub fn is_exhausted(&self) -> bool {
        self.kind == AiErrorKind::Exhausted
    }
}
