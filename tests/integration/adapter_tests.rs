//! Adapter tests against mock provider endpoints

use crate::common::fixtures::{
    anthropic_message, error_body, gemini_generate_content, ollama_chat, openai_chat_completion,
};
use crate::common::{TEST_API_KEY, mock_config};
use provider_router::core::providers::{HttpClient, build_adapter};
use provider_router::{AiErrorKind, ProviderAdapter, ProviderId, ProviderSettings, RouterConfig};
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn adapter_for(config: &RouterConfig, provider: ProviderId) -> Arc<dyn ProviderAdapter> {
    let http = HttpClient::new(config.request_timeout).unwrap();
    build_adapter(provider, config, &http)
}

#[tokio::test]
async fn test_openai_chat_completion() {
    let server = MockServer::start().await;
    let bearer = format!("Bearer {TEST_API_KEY}");
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("Authorization", bearer.as_str()))
        .and(body_partial_json(json!({
            "model": "gpt-4o-mini",
            "messages": [{"role": "user", "content": "Hello"}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(openai_chat_completion("Hi there")))
        .expect(1)
        .mount(&server)
        .await;

    let config = mock_config(&server, &[ProviderId::OpenAi], 1);
    let result = adapter_for(&config, ProviderId::OpenAi)
        .call("Hello", None, None, None, false)
        .await
        .unwrap();

    assert_eq!(result.content, "Hi there");
    assert_eq!(result.model, "gpt-4o-mini-2024-07-18");
    assert_eq!(result.tokens, 21);
    assert_eq!(result.metadata["finish_reason"], json!("stop"));
    assert_eq!(result.metadata["response_id"], json!("chatcmpl-123"));
}

#[tokio::test]
async fn test_openai_overrides_and_json_mode() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_partial_json(json!({
            "model": "gpt-4",
            "temperature": 0.5,
            "max_tokens": 100,
            "response_format": {"type": "json_object"}
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(openai_chat_completion("{\"ok\":true}")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let config = mock_config(&server, &[ProviderId::OpenAi], 1);
    let result = adapter_for(&config, ProviderId::OpenAi)
        .call("Reply in JSON", Some("gpt-4"), Some(0.5), Some(100), true)
        .await
        .unwrap();

    assert_eq!(result.content, "{\"ok\":true}");
}

#[tokio::test]
async fn test_openai_status_error_is_upstream() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_json(error_body("overloaded")))
        .mount(&server)
        .await;

    let config = mock_config(&server, &[ProviderId::OpenAi], 1);
    let err = adapter_for(&config, ProviderId::OpenAi)
        .call("Hello", None, None, None, false)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), AiErrorKind::Upstream);
    assert_eq!(err.provider(), Some(ProviderId::OpenAi));
    assert!(err.to_string().contains("status 500"));
    assert!(err.to_string().contains("overloaded"));
}

#[tokio::test]
async fn test_openai_undecodable_reply_is_upstream() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let config = mock_config(&server, &[ProviderId::OpenAi], 1);
    let err = adapter_for(&config, ProviderId::OpenAi)
        .call("Hello", None, None, None, false)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), AiErrorKind::Upstream);
    assert!(err.to_string().contains("Failed to parse OpenAI response"));
}

#[tokio::test]
async fn test_anthropic_messages() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .and(header("x-api-key", TEST_API_KEY))
        .and(header("anthropic-version", "2023-06-01"))
        .and(body_partial_json(json!({
            "model": "claude-3-5-sonnet-latest",
            "max_tokens": 1024
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(anthropic_message("Bonjour")))
        .expect(1)
        .mount(&server)
        .await;

    let config = mock_config(&server, &[ProviderId::Anthropic], 1);
    let result = adapter_for(&config, ProviderId::Anthropic)
        .call("Hello", None, None, None, false)
        .await
        .unwrap();

    assert_eq!(result.content, "Bonjour");
    assert_eq!(result.model, "claude-3-5-sonnet-20241022");
    assert_eq!(result.tokens, 35);
    assert_eq!(result.metadata["stop_reason"], json!("end_turn"));
}

#[tokio::test]
async fn test_anthropic_json_mode_sets_system_prompt() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .and(body_partial_json(json!({"max_tokens": 64, "temperature": 0.2})))
        .respond_with(ResponseTemplate::new(200).set_body_json(anthropic_message("{}")))
        .expect(1)
        .mount(&server)
        .await;

    let config = mock_config(&server, &[ProviderId::Anthropic], 1);
    adapter_for(&config, ProviderId::Anthropic)
        .call("Hello", None, Some(0.2), Some(64), true)
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = requests[0].body_json().unwrap();
    assert!(body["system"].as_str().is_some_and(|s| s.contains("JSON")));
}

#[tokio::test]
async fn test_gemini_generate_content() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-1.5-pro:generateContent"))
        .and(header("x-goog-api-key", TEST_API_KEY))
        .and(body_partial_json(json!({
            "contents": [{"role": "user", "parts": [{"text": "Hello"}]}],
            "generationConfig": {
                "temperature": 0.7,
                "maxOutputTokens": 256,
                "responseMimeType": "application/json"
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_generate_content("Hallo")))
        .expect(1)
        .mount(&server)
        .await;

    let config = mock_config(&server, &[ProviderId::Gemini], 1);
    let result = adapter_for(&config, ProviderId::Gemini)
        .call("Hello", Some("gemini-1.5-pro"), Some(0.7), Some(256), true)
        .await
        .unwrap();

    assert_eq!(result.content, "Hallo");
    assert_eq!(result.model, "gemini-1.5-flash-002");
    assert_eq!(result.tokens, 12);
    assert_eq!(result.metadata["finish_reason"], json!("STOP"));
}

#[tokio::test]
async fn test_gemini_without_candidates_is_upstream() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-1.5-flash:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"candidates": []})))
        .mount(&server)
        .await;

    let config = mock_config(&server, &[ProviderId::Gemini], 1);
    let err = adapter_for(&config, ProviderId::Gemini)
        .call("Hello", None, None, None, false)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), AiErrorKind::Upstream);
    assert!(err.to_string().contains("no candidates"));
}

#[tokio::test]
async fn test_ollama_chat() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(body_partial_json(json!({
            "model": "llama3.1",
            "stream": false,
            "format": "json",
            "options": {"num_predict": 50}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(ollama_chat("Hola")))
        .expect(1)
        .mount(&server)
        .await;

    let config = mock_config(&server, &[ProviderId::Ollama], 1);
    let result = adapter_for(&config, ProviderId::Ollama)
        .call("Hello", None, None, Some(50), true)
        .await
        .unwrap();

    assert_eq!(result.content, "Hola");
    assert_eq!(result.model, "llama3.1");
    assert_eq!(result.tokens, 316);
    assert_eq!(result.metadata["done_reason"], json!("stop"));
}

#[tokio::test]
async fn test_missing_credential_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(anthropic_message("unused")))
        .expect(0)
        .mount(&server)
        .await;

    let settings = ProviderSettings {
        credential: None,
        base_url: Some(server.uri()),
    };
    let config = mock_config(&server, &[ProviderId::Anthropic], 1)
        .with_provider_settings(ProviderId::Anthropic, settings);
    let err = adapter_for(&config, ProviderId::Anthropic)
        .call("Hello", None, None, None, false)
        .await
        .unwrap_err();

    assert!(err.is_configuration());
    assert_eq!(
        err.to_string(),
        "ANTHROPIC_API_KEY not configured for Anthropic provider"
    );
    server.verify().await;
}

#[tokio::test]
async fn test_gemini_accepts_resource_model_name() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-1.5-pro:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_generate_content("Hallo")))
        .expect(1)
        .mount(&server)
        .await;

    let config = mock_config(&server, &[ProviderId::Gemini], 1);
    let result = adapter_for(&config, ProviderId::Gemini)
        .call("Hello", Some("models/gemini-1.5-pro"), None, None, false)
        .await
        .unwrap();

    assert_eq!(result.content, "Hallo");
}

#[tokio::test]
async fn test_gemini_rejects_model_that_rewrites_the_path() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let config = mock_config(&server, &[ProviderId::Gemini], 1);
    let err = adapter_for(&config, ProviderId::Gemini)
        .call("Hello", Some("gemini-pro?alt=sse"), None, None, false)
        .await
        .unwrap_err();

    assert!(err.is_configuration());
    assert!(err.to_string().contains("gemini-pro?alt=sse"));
}

#[tokio::test]
async fn test_token_counts_saturate() {
    let server = MockServer::start().await;
    let mut anthropic = anthropic_message("big");
    anthropic["usage"] = json!({"input_tokens": u64::MAX, "output_tokens": 5});
    let mut ollama = ollama_chat("big");
    ollama["prompt_eval_count"] = json!(u64::MAX);
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(anthropic))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ollama))
        .mount(&server)
        .await;

    let config = mock_config(&server, &[ProviderId::Anthropic, ProviderId::Ollama], 1);
    for provider in [ProviderId::Anthropic, ProviderId::Ollama] {
        let result = adapter_for(&config, provider)
            .call("Hello", None, None, None, false)
            .await
            .unwrap();
        assert_eq!(result.tokens, u64::MAX, "{provider}");
    }
}
