//! Banner, health and models endpoint integration tests

use axum::http::StatusCode;
use serde_json::{json, Value};

use crate::common::{test_config, test_server};
use crate::mocks::MockChatUpstream;

async fn server() -> (MockChatUpstream, axum_test::TestServer) {
    let upstream = MockChatUpstream::start().await;
    let server = test_server(test_config(&upstream.chat_url()));
    (upstream, server)
}

#[tokio::test]
async fn test_root_returns_service_banner() {
    let (_upstream, server) = server().await;

    let response = server.get("/").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["status"], "Service Running");
}

#[tokio::test]
async fn test_unknown_path_returns_service_banner() {
    let (_upstream, server) = server().await;

    let response = server.get("/some/other/path").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["status"], "Service Running");
}

#[tokio::test]
async fn test_health_endpoint() {
    let (_upstream, server) = server().await;

    let response = server.get("/health").await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(body["upstream"], "chat-gateway");
    assert_eq!(body["models"], 5);
    assert!(body["uptime_seconds"].is_u64());
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_liveness_endpoint() {
    let (_upstream, server) = server().await;

    let response = server.get("/health/live").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>(), json!({"status": "healthy"}));
}

#[tokio::test]
async fn test_models_endpoint_lists_caller_names() {
    let (_upstream, server) = server().await;

    let response = server.get("/v1/models").await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: Value = response.json();
    assert_eq!(body["object"], "list");
    let ids: Vec<_> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(
        ids,
        vec!["deepseek", "gpt-4o-mini", "gemini-flash-1.5", "deepseek-reasoner", "minimax-01"]
    );
}
