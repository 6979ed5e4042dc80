//! Authentication integration tests
//!
//! When AUTH_TOKEN is configured, chat and model endpoints require
//! `Authorization: Bearer <token>`; public endpoints stay open.

use axum::http::{header, HeaderValue, StatusCode};
use serde_json::Value;

use crate::common::{constants::TEST_AUTH_TOKEN, test_config, test_data, test_server};
use crate::mocks::MockChatUpstream;

fn server_with_auth(upstream: &MockChatUpstream) -> axum_test::TestServer {
    let mut config = test_config(&upstream.chat_url());
    config.auth_token = Some(TEST_AUTH_TOKEN.to_string());
    test_server(config)
}

#[tokio::test]
async fn test_missing_token_is_rejected_before_upstream() {
    let upstream = MockChatUpstream::start().await;
    upstream.expect_no_calls().await;
    let server = server_with_auth(&upstream);

    let response = server
        .post("/v1/chat/completions")
        .json(&test_data::chat_request("deepseek", false))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_wrong_token_is_rejected() {
    let upstream = MockChatUpstream::start().await;
    upstream.expect_no_calls().await;
    let server = server_with_auth(&upstream);

    for value in ["Bearer wrong", "Basic abc", TEST_AUTH_TOKEN] {
        let response = server
            .post("/v1/chat/completions")
            .add_header(header::AUTHORIZATION, HeaderValue::from_static(value))
            .json(&test_data::chat_request("deepseek", false))
            .await;
        assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED, "{}", value);
    }
}

#[tokio::test]
async fn test_valid_token_is_accepted() {
    let upstream = MockChatUpstream::start().await;
    upstream.mock_answer(&["hi"]).await;
    let server = server_with_auth(&upstream);

    let response = server
        .post("/v1/chat/completions")
        .add_header(
            header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", TEST_AUTH_TOKEN)).unwrap(),
        )
        .json(&test_data::chat_request("deepseek", false))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["choices"][0]["message"]["content"], "hi");
}

#[tokio::test]
async fn test_models_endpoint_requires_token() {
    let upstream = MockChatUpstream::start().await;
    let server = server_with_auth(&upstream);

    let response = server.get("/v1/models").await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_public_endpoints_stay_open() {
    let upstream = MockChatUpstream::start().await;
    let server = server_with_auth(&upstream);

    assert_eq!(server.get("/").await.status_code(), StatusCode::OK);
    assert_eq!(server.get("/health/live").await.status_code(), StatusCode::OK);
}
