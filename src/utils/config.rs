//! Key/value configuration sources
//!
//! Everything the router reads at construction goes through [`ConfigSource`],
//! so the environment, a YAML file and in-memory maps are interchangeable.
//! Empty values are treated as absent by every source.

use crate::utils::error::{AiError, Result};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// A read-only key/value lookup
pub trait ConfigSource: Send + Sync {
    /// Look up `key`, returning `None` when it is unset or empty
    fn get(&self, key: &str) -> Option<String>;
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvSource;

impl ConfigSource for EnvSource {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok().and_then(non_empty)
    }
}

/// In-memory map, mostly for tests and embedding callers
#[derive(Debug, Clone, Default)]
pub struct MapSource {
    values: HashMap<String, String>,
}

impl MapSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a value (builder pattern)
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.values.remove(key)
    }
}

impl<K, V> FromIterator<(K, V)> for MapSource
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl ConfigSource for MapSource {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned().and_then(non_empty)
    }
}

/// A flat YAML mapping of configuration keys, e.g.
///
/// ```yaml
/// AI_PROVIDER_PRIMARY: gemini
/// AI_PROVIDER_RETRY_ATTEMPTS: 5
/// GEMINI_API_KEY: "..."
/// ```
#[derive(Debug, Clone, Default)]
pub struct YamlFileSource {
    values: HashMap<String, String>,
}

impl YamlFileSource {
    /// Read and parse a YAML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            let message = format!("Failed to read config file {}: {}", path.display(), e);
            AiError::configuration(message)
        })?;
        Self::parse(&content)
    }

    /// Parse YAML text. Scalar values are kept as their string form; nested
    /// mappings and sequences are rejected.
    pub fn parse(content: &str) -> Result<Self> {
        let raw: HashMap<String, serde_yaml::Value> = serde_yaml::from_str(content)
            .map_err(|e| AiError::configuration(format!("Failed to parse YAML config: {}", e)))?;

        let mut values = HashMap::with_capacity(raw.len());
        for (key, value) in raw {
            let text = match value {
                serde_yaml::Value::Null => continue,
                serde_yaml::Value::String(s) => s,
                serde_yaml::Value::Bool(b) => b.to_string(),
                serde_yaml::Value::Number(n) => n.to_string(),
                _ => {
                    return Err(AiError::configuration(format!(
                        "Config key {} must be a scalar value",
                        key
                    )));
                }
            };
            values.insert(key, text);
        }

        Ok(Self { values })
    }
}

impl ConfigSource for YamlFileSource {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned().and_then(non_empty)
    }
}

/// Ordered stack of sources; the first one holding a value wins
#[derive(Default)]
pub struct LayeredSource {
    layers: Vec<Box<dyn ConfigSource>>,
}

impl LayeredSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a lower-priority layer (builder pattern)
    pub fn with_layer(mut self, source: impl ConfigSource + 'static) -> Self {
        self.layers.push(Box::new(source));
        self
    }
}

impl ConfigSource for LayeredSource {
    fn get(&self, key: &str) -> Option<String> {
        self.layers.iter().find_map(|layer| layer.get(key))
    }
}
