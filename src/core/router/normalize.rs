//! Building the public response from an adapter result

use crate::core::providers::ProviderId;
use crate::core::types::{AiResponse, ProviderResult};
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;

/// Merge caller metadata with adapter metadata.
///
/// Caller entries always survive. Adapter entries are added for every key the
/// caller did not set; on a collision the caller's value is kept.
pub fn merge_metadata(
    caller: &HashMap<String, Value>,
    adapter: HashMap<String, Value>,
) -> HashMap<String, Value> {
    let mut merged = caller.clone();
    for (key, value) in adapter {
        merged.entry(key).or_insert(value);
    }
    merged
}

/// Assemble the [`AiResponse`] for the winning provider.
///
/// `elapsed` is measured from the start of dispatch, so waits between retries
/// and time spent on failed providers are included.
pub fn build_response(
    result: ProviderResult,
    provider: ProviderId,
    caller_meta: &HashMap<String, Value>,
    elapsed: Duration,
) -> AiResponse {
    AiResponse {
        content: result.content,
        model: result.model,
        provider,
        tokens_used: result.tokens,
        latency_ms: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
        metadata: merge_metadata(caller_meta, result.metadata),
    }
}
