//! Common test utilities for Chatbridge
//!
//! Shared fixtures and helpers for building a real router against a mock upstream.

#![allow(dead_code)]

use std::sync::Arc;

use axum_test::TestServer;
use chatbridge::{routes::create_router, AppState, Config};
use serde_json::{json, Value};

/// Test configuration constants
pub mod constants {
    /// Bearer token used when auth is enabled
    pub const TEST_AUTH_TOKEN: &str = "test-auth-token";
}

/// Config pointing at the given upstream URL
pub fn test_config(upstream_url: &str) -> Config {
    Config::for_upstream(upstream_url).expect("valid upstream url")
}

/// Build a test server around the real router
pub fn test_server(config: Config) -> TestServer {
    let state = Arc::new(AppState::new(config).expect("app state"));
    TestServer::new(create_router(state)).expect("test server")
}

/// Parse the `data:` events of an SSE body into JSON values
pub fn parse_sse_events(body: &str) -> Vec<Value> {
    body.split("\n\n")
        .filter(|event| !event.is_empty())
        .map(|event| {
            let payload = event
                .strip_prefix("data: ")
                .unwrap_or_else(|| panic!("not a data event: {:?}", event));
            serde_json::from_str(payload).expect("event payload is JSON")
        })
        .collect()
}

/// Sample request data for tests
pub mod test_data {
    use super::*;

    /// Single-turn chat request
    pub fn chat_request(model: &str, stream: bool) -> Value {
        json!({
            "model": model,
            "stream": stream,
            "messages": [
                {"role": "user", "content": "Hello?"}
            ]
        })
    }

    /// Multi-turn chat request with a system prompt
    pub fn multi_turn_request(model: &str) -> Value {
        json!({
            "model": model,
            "messages": [
                {"role": "system", "content": "You are helpful."},
                {"role": "user", "content": "A"},
                {"role": "assistant", "content": "B"},
                {"role": "user", "content": "C"}
            ]
        })
    }
}
