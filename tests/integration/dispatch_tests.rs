//! End-to-end dispatch over HTTP: retry, failover and normalization

use crate::common::fixtures::{
    anthropic_message, error_body, gemini_generate_content, ollama_chat, openai_chat_completion,
};
use crate::common::mock_config;
use provider_router::{AiErrorKind, CallRequest, ProviderId, Router};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const OPENAI_PATH: &str = "/chat/completions";
const GEMINI_PATH: &str = "/v1beta/models/gemini-1.5-flash:generateContent";
const ANTHROPIC_PATH: &str = "/v1/messages";

async fn mount_failure(server: &MockServer, route: &str, status: u16) {
    Mock::given(method("POST"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status).set_body_json(error_body("unavailable")))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_primary_answers() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(OPENAI_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(openai_chat_completion("primary")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(GEMINI_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_generate_content("unused")))
        .expect(0)
        .mount(&server)
        .await;

    let config = mock_config(&server, &[ProviderId::OpenAi, ProviderId::Gemini], 3);
    let response = Router::new(config)
        .unwrap()
        .dispatch(CallRequest::new("Hello"))
        .await
        .unwrap();

    assert_eq!(response.provider, ProviderId::OpenAi);
    assert_eq!(response.content, "primary");
    assert_eq!(response.tokens_used, 21);
}

#[tokio::test]
async fn test_failover_after_retry_budget() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(OPENAI_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_json(error_body("down")))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(GEMINI_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_generate_content("fallback")))
        .expect(1)
        .mount(&server)
        .await;

    let config = mock_config(&server, &[ProviderId::OpenAi, ProviderId::Gemini], 2);
    let response = Router::new(config)
        .unwrap()
        .dispatch(CallRequest::new("Hello"))
        .await
        .unwrap();

    assert_eq!(response.provider, ProviderId::Gemini);
    assert_eq!(response.content, "fallback");
    assert_eq!(response.model, "gemini-1.5-flash-002");
}

#[tokio::test]
async fn test_transient_failure_is_retried_on_same_provider() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(OPENAI_PATH))
        .respond_with(ResponseTemplate::new(503).set_body_json(error_body("busy")))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(OPENAI_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(openai_chat_completion("third time")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let config = mock_config(&server, &[ProviderId::OpenAi, ProviderId::Gemini], 3);
    let response = Router::new(config)
        .unwrap()
        .dispatch(CallRequest::new("Hello"))
        .await
        .unwrap();

    assert_eq!(response.provider, ProviderId::OpenAi);
    assert_eq!(response.content, "third time");
}

#[tokio::test]
async fn test_missing_credential_fails_over() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ollama_chat("local")))
        .expect(1)
        .mount(&server)
        .await;

    let mut config = mock_config(&server, &[ProviderId::OpenAi, ProviderId::Ollama], 1);
    config = config.with_provider_settings(ProviderId::OpenAi, Default::default());

    let response = Router::new(config)
        .unwrap()
        .dispatch(CallRequest::new("Hello"))
        .await
        .unwrap();

    assert_eq!(response.provider, ProviderId::Ollama);
    assert_eq!(response.content, "local");
    assert_eq!(response.tokens_used, 316);
}

#[tokio::test]
async fn test_all_providers_exhausted() {
    let server = MockServer::start().await;
    mount_failure(&server, OPENAI_PATH, 500).await;
    mount_failure(&server, GEMINI_PATH, 502).await;
    mount_failure(&server, ANTHROPIC_PATH, 529).await;

    let config = mock_config(
        &server,
        &[
            ProviderId::OpenAi,
            ProviderId::Gemini,
            ProviderId::Anthropic,
        ],
        2,
    );
    let err = Router::new(config)
        .unwrap()
        .dispatch(CallRequest::new("Hello"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), AiErrorKind::Exhausted);
    assert_eq!(err.provider(), Some(ProviderId::Anthropic));
    assert!(err.to_string().contains("All providers failed"));
    assert!(err.to_string().contains("status 529"));
    assert_eq!(server.received_requests().await.unwrap().len(), 6);
}

#[tokio::test]
async fn test_single_provider_exhausted() {
    let server = MockServer::start().await;
    mount_failure(&server, OPENAI_PATH, 500).await;

    let config = mock_config(&server, &[ProviderId::OpenAi], 3);
    let err = Router::new(config)
        .unwrap()
        .dispatch(CallRequest::new("Hello"))
        .await
        .unwrap_err();

    let message = err.to_string();
    assert!(err.is_exhausted());
    assert!(message.contains("Max retries exceeded for openai after 3 attempts"));
}

#[tokio::test]
async fn test_response_carries_merged_metadata() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ANTHROPIC_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(anthropic_message("merged")))
        .mount(&server)
        .await;

    let config = mock_config(&server, &[ProviderId::Anthropic], 1);
    let request = CallRequest::new("Hello")
        .with_meta("request_id", "abc")
        .with_meta("stop_reason", "caller value");
    let response = Router::new(config)
        .unwrap()
        .dispatch(request)
        .await
        .unwrap();

    assert_eq!(response.metadata["request_id"], json!("abc"));
    assert_eq!(response.metadata["stop_reason"], json!("caller value"));
    let response_id = &response.metadata["response_id"];
    assert_eq!(response_id, "msg_013Zva2CMHLNnXjNJJKqJ2EF");

    let parsed: serde_json::Value = serde_json::from_str(&response.to_json().unwrap()).unwrap();
    assert_eq!(parsed["provider"], json!("anthropic"));
    assert_eq!(parsed["tokens_used"], json!(35));
    assert!(parsed["latency_ms"].is_u64());
}
