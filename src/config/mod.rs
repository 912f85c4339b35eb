//! Router configuration
//!
//! [`RouterConfig`] is resolved exactly once from a [`ConfigSource`] and is
//! immutable afterwards. Nothing in the router reads the environment after
//! construction, so later changes to the source have no effect on a built
//! router.
//!
//! | Key | Meaning | Default |
//! |---|---|---|
//! | `AI_PROVIDER_PRIMARY` | primary provider | `openai` |
//! | `IPAI_AI_PROVIDER` | legacy fallback for the primary | none |
//! | `AI_PROVIDER_SECONDARY` | secondary provider | none |
//! | `AI_PROVIDER_TERTIARY` | tertiary provider | none |
//! | `AI_PROVIDER_RETRY_ATTEMPTS` | attempts per provider | `3` |
//! | `AI_PROVIDER_RETRY_DELAY` | seconds between attempts | `2` |
//! | `AI_PROVIDER_TIMEOUT` | per-request timeout in seconds | `60` |

pub mod keys;

use crate::core::providers::ProviderId;
use crate::core::router::RetryPolicy;
use crate::utils::config::{ConfigSource, EnvSource};
use crate::utils::error::{AiError, Result};
use std::collections::HashMap;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, warn};

pub const DEFAULT_PRIMARY: ProviderId = ProviderId::OpenAi;
pub const DEFAULT_RETRY_ATTEMPTS: u32 = 3;
pub const DEFAULT_RETRY_DELAY_SECS: u64 = 2;
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Per-provider settings captured at resolution time
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ProviderSettings {
    /// API key, or the endpoint for providers whose only requirement is one
    pub credential: Option<String>,
    /// Endpoint override for hosted providers
    pub base_url: Option<String>,
}

impl ProviderSettings {
    pub fn with_credential(credential: impl Into<String>) -> Self {
        Self {
            credential: Some(credential.into()),
            base_url: None,
        }
    }

    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Endpoint override, or `default` when none is set
    pub fn base_url_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.base_url.as_deref().unwrap_or(default)
    }
}

impl std::fmt::Debug for ProviderSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderSettings")
            .field(
                "credential",
                &self.credential.as_ref().map(|_| "[REDACTED]"),
            )
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Immutable router configuration
#[derive(Debug, Clone)]
pub struct RouterConfig {
    pub primary: ProviderId,
    pub secondary: Option<ProviderId>,
    pub tertiary: Option<ProviderId>,
    pub retry: RetryPolicy,
    /// Timeout each adapter applies to its own upstream request
    pub request_timeout: Duration,
    providers: HashMap<ProviderId, ProviderSettings>,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            primary: DEFAULT_PRIMARY,
            secondary: None,
            tertiary: None,
            retry: RetryPolicy::default(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            providers: HashMap::new(),
        }
    }
}

impl RouterConfig {
    /// Resolve from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_source(&EnvSource)
    }

    /// Resolve from any key/value source
    pub fn from_source(source: &dyn ConfigSource) -> Result<Self> {
        let primary = match source
            .get(keys::PRIMARY)
            .or_else(|| source.get(keys::LEGACY_PRIMARY))
        {
            Some(value) => value.parse()?,
            None => DEFAULT_PRIMARY,
        };
        let secondary = parse_provider(source, keys::SECONDARY)?;
        let tertiary = parse_provider(source, keys::TERTIARY)?;

        let mut max_attempts = parse_integer(source, keys::RETRY_ATTEMPTS, DEFAULT_RETRY_ATTEMPTS)?;
        if max_attempts == 0 {
            warn!(
                key = keys::RETRY_ATTEMPTS,
                "retry attempts must be at least 1, using 1"
            );
            max_attempts = 1;
        }
        let delay_secs = parse_integer(source, keys::RETRY_DELAY, DEFAULT_RETRY_DELAY_SECS)?;

        let timeout_secs = parse_integer(source, keys::REQUEST_TIMEOUT, DEFAULT_TIMEOUT_SECS)?;
        if timeout_secs == 0 {
            return Err(AiError::configuration(format!(
                "{} must be greater than 0",
                keys::REQUEST_TIMEOUT
            )));
        }

        let providers = ProviderId::ALL
            .into_iter()
            .map(|id| {
                let settings = ProviderSettings {
                    credential: source.get(keys::credential_key(id)),
                    base_url: keys::base_url_key(id).and_then(|key| source.get(key)),
                };
                (id, settings)
            })
            .collect();

        let config = Self {
            primary,
            secondary,
            tertiary,
            retry: RetryPolicy::new(max_attempts, Duration::from_secs(delay_secs)),
            request_timeout: Duration::from_secs(timeout_secs),
            providers,
        };

        debug!(
            primary = %config.primary,
            secondary = ?config.secondary,
            tertiary = ?config.tertiary,
            max_attempts = config.retry.max_attempts,
            delay_secs = config.retry.delay.as_secs(),
            "router configuration resolved"
        );

        Ok(config)
    }

    #[must_use]
    pub fn with_primary(mut self, provider: ProviderId) -> Self {
        self.primary = provider;
        self
    }

    #[must_use]
    pub fn with_secondary(mut self, provider: ProviderId) -> Self {
        self.secondary = Some(provider);
        self
    }

    #[must_use]
    pub fn with_tertiary(mut self, provider: ProviderId) -> Self {
        self.tertiary = Some(provider);
        self
    }

    #[must_use]
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    #[must_use]
    pub fn with_provider_settings(
        mut self,
        provider: ProviderId,
        settings: ProviderSettings,
    ) -> Self {
        self.providers.insert(provider, settings);
        self
    }

    /// Settings for `provider`; empty when nothing was configured
    pub fn provider_settings(&self, provider: ProviderId) -> ProviderSettings {
        self.providers.get(&provider).cloned().unwrap_or_default()
    }

    /// Configured slots in primary → secondary → tertiary order
    pub fn provider_slots(&self) -> Vec<ProviderId> {
        std::iter::once(self.primary)
            .chain(self.secondary)
            .chain(self.tertiary)
            .collect()
    }
}

fn parse_provider(source: &dyn ConfigSource, key: &str) -> Result<Option<ProviderId>> {
    source
        .get(key)
        .map(|value| value.parse::<ProviderId>())
        .transpose()
}

fn parse_integer<T: FromStr>(source: &dyn ConfigSource, key: &str, default: T) -> Result<T> {
    match source.get(key) {
        None => Ok(default),
        Some(value) => value.parse().map_err(|_| {
            AiError::configuration(format!(
                "{} must be a non-negative integer, got '{}'",
                key, value
            ))
        }),
    }
}
