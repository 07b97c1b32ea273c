//! Error scenario integration tests
//!
//! Runs the chat client against a mock API:
//! 1. Successful blocking responses
//! 2. Transient failures and retry
//! 3. Non-retryable statuses
//! 4. Undecodable bodies

use std::time::Duration;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use newsdigest::llm::{ChatClient, DocumentSource};
use newsdigest::utils::error::UpstreamError;
use newsdigest::NewsCategory;

use super::fixtures::{answer_envelope, LEGACY_DIGEST};
use crate::common::upstream_config;

#[tokio::test]
async fn test_fetch_document_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat-messages"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_partial_json(serde_json::json!({
            "inputs": {"category": "テクノロジー (technology)"},
            "response_mode": "blocking",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(answer_envelope(LEGACY_DIGEST)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = ChatClient::new(upstream_config(&mock_server.uri())).unwrap();
    let envelope = client.fetch_document(NewsCategory::Technology).await.unwrap();

    assert_eq!(envelope["answer"], LEGACY_DIGEST);
}

#[tokio::test]
async fn test_gateway_timeout_is_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(504))
        .expect(2) // first attempt + 1 retry
        .mount(&mock_server)
        .await;

    let client = ChatClient::new(upstream_config(&mock_server.uri())).unwrap();
    let result = client.fetch_document(NewsCategory::Business).await;

    match result {
        Err(UpstreamError::Timeout) => {}
        other => panic!("Expected timeout, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_server_error_then_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(answer_envelope("本文")))
        .mount(&mock_server)
        .await;

    let client = ChatClient::new(upstream_config(&mock_server.uri())).unwrap();
    let envelope = client.fetch_document(NewsCategory::Politics).await.unwrap();
    assert_eq!(envelope["answer"], "本文");
}

#[tokio::test]
async fn test_unauthorized_is_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = ChatClient::new(upstream_config(&mock_server.uri())).unwrap();
    let result = client.fetch_document(NewsCategory::Business).await;

    assert!(matches!(result, Err(UpstreamError::Status(401, _))));
}

#[tokio::test]
async fn test_quota_exhaustion_is_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).set_body_string("quota exceeded for this month"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = ChatClient::new(upstream_config(&mock_server.uri())).unwrap();
    let result = client.fetch_document(NewsCategory::Business).await;

    assert!(matches!(result, Err(UpstreamError::QuotaExceeded(_))));
}

#[tokio::test]
async fn test_undecodable_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&mock_server)
        .await;

    let client = ChatClient::new(upstream_config(&mock_server.uri())).unwrap();
    let result = client.fetch_document(NewsCategory::Business).await;

    assert!(matches!(result, Err(UpstreamError::Decode(_))));
}

#[tokio::test]
async fn test_client_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(answer_envelope("late"))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;

    let mut config = upstream_config(&mock_server.uri());
    config.timeout_secs = 1;
    config.max_retries = 0;
    let client = ChatClient::new(config).unwrap();

    let result = client.fetch_document(NewsCategory::Business).await;
    assert!(matches!(result, Err(UpstreamError::Timeout)));
}

#[tokio::test]
async fn test_health_check() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(answer_envelope("OK")))
        .mount(&mock_server)
        .await;

    let client = ChatClient::new(upstream_config(&mock_server.uri())).unwrap();
    assert!(client.health_check().await);

    let unreachable = ChatClient::new(upstream_config("http://127.0.0.1:1")).unwrap();
    assert!(!unreachable.health_check().await);
}
