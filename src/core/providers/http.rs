//! Shared HTTP plumbing for provider adapters
//!
//! One `reqwest` client is built per router and cloned into every adapter.
//! Every failure mode of a call (transport, status, decoding) is mapped into
//! an upstream [`AiError`] attributed to the calling provider.

use crate::core::providers::ProviderId;
use crate::utils::error::AiError;
use reqwest::{Client, ClientBuilder};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Longest slice of an error body kept in messages
const MAX_ERROR_BODY: usize = 500;

/// Thin wrapper over a configured `reqwest::Client`
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Build a client whose requests time out after `timeout`
    pub fn new(timeout: Duration) -> Result<Self, AiError> {
        let client = ClientBuilder::new()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(10))
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .map_err(|e| AiError::configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    /// POST `body` as JSON and decode a JSON reply
    pub async fn post_json<T: DeserializeOwned>(
        &self,
        provider: ProviderId,
        url: &str,
        headers: &[(&str, &str)],
        body: &Value,
    ) -> Result<T, AiError> {
        debug!(provider = %provider, url = %url, "sending upstream request");
        let name = provider.display_name();

        let mut request = self.client.post(url).json(body);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }

        let response = request.send().await.map_err(|e| {
            let kind = if e.is_timeout() { "timed out" } else { "failed" };
            AiError::upstream(provider, format!("{name} request {kind}: {e}"))
        })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let code = status.as_u16();
            let detail = truncate(&text, MAX_ERROR_BODY);
            let message = format!("{name} API error (status {code}): {detail}");
            return Err(AiError::upstream(provider, message));
        }

        let bytes = response.bytes().await.map_err(|e| {
            AiError::upstream(provider, format!("Failed to read {name} response: {e}"))
        })?;

        serde_json::from_slice(&bytes).map_err(|e| {
            AiError::upstream(provider, format!("Failed to parse {name} response: {e}"))
        })
    }
}

/// Join a base URL and a path without doubling slashes
pub fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    format!("{base}/{path}")
}

fn truncate(text: &str, max: usize) -> &str {
    if text.len() <= max {
        return text;
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}
