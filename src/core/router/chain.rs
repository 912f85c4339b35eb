//! Ordered provider chain

use crate::config::RouterConfig;
use crate::core::providers::{ProviderAdapter, ProviderId};
use std::sync::Arc;

/// One provider in the chain together with its adapter
#[derive(Clone)]
pub struct ChainEntry {
    pub provider: ProviderId,
    pub adapter: Arc<dyn ProviderAdapter>,
}

impl std::fmt::Debug for ChainEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChainEntry")
            .field("provider", &self.provider)
            .finish_non_exhaustive()
    }
}

/// Non-empty, de-duplicated sequence of providers in primary → secondary →
/// tertiary order. Adapters are selected once, when the chain is built.
#[derive(Debug, Clone)]
pub struct ProviderChain {
    entries: Vec<ChainEntry>,
}

impl ProviderChain {
    /// Build the chain from configured slots, asking `factory` for each
    /// provider's adapter. A provider configured in two slots keeps only its
    /// first position.
    pub fn resolve<F>(config: &RouterConfig, mut factory: F) -> Self
    where
        F: FnMut(ProviderId, &RouterConfig) -> Arc<dyn ProviderAdapter>,
    {
        let mut entries: Vec<ChainEntry> = Vec::with_capacity(3);
        for provider in config.provider_slots() {
            if entries.iter().any(|e| e.provider == provider) {
                continue;
            }
            entries.push(ChainEntry {
                provider,
                adapter: factory(provider, config),
            });
        }
        Self { entries }
    }

    pub fn entries(&self) -> &[ChainEntry] {
        &self.entries
    }

    pub fn providers(&self) -> Vec<ProviderId> {
        self.entries.iter().map(|e| e.provider).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Never true for a chain built by [`ProviderChain::resolve`]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn primary(&self) -> Option<ProviderId> {
        self.entries.first().map(|e| e.provider)
    }
}
