//! Mock upstream chat gateway for testing
//!
//! Speaks the sentinel-marker SSE protocol:
//!
//! ```text
//! data: [ANSWER_START]
//! data: <answer fragment>
//! data: [RELATE_Q_START]...
//! data: [ANSWER_DONE]
//! ```

use serde_json::Value;
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

/// Path the mock upstream listens on
pub const UPSTREAM_PATH: &str = "/api/ha/v1/chat";

/// Mock upstream chat gateway wrapper
pub struct MockChatUpstream {
    server: MockServer,
}

impl MockChatUpstream {
    /// Start a new mock upstream server
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Full URL of the upstream chat endpoint
    pub fn chat_url(&self) -> String {
        format!("{}{}", self.server.uri(), UPSTREAM_PATH)
    }

    /// Answer every chat call with the given SSE body, expecting `calls` calls
    pub async fn mock_sse_body(&self, body: String, calls: u64) {
        Mock::given(method("POST"))
            .and(path(UPSTREAM_PATH))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(body)
                    .insert_header("Content-Type", "text/event-stream")
                    .insert_header("Cache-Control", "no-cache"),
            )
            .expect(calls)
            .named("upstream chat")
            .mount(&self.server)
            .await;
    }

    /// Answer with a complete, well-formed answer made of `fragments`
    pub async fn mock_answer(&self, fragments: &[&str]) {
        self.mock_sse_body(UpstreamSse::answer(fragments), 1).await;
    }

    /// Answer with a non-success status
    pub async fn mock_status(&self, status: u16) {
        Mock::given(method("POST"))
            .and(path(UPSTREAM_PATH))
            .respond_with(ResponseTemplate::new(status).set_body_string("upstream exploded"))
            .expect(1)
            .named("upstream chat error")
            .mount(&self.server)
            .await;
    }

    /// Fail the test if any chat call reaches the upstream
    pub async fn expect_no_calls(&self) {
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .named("no upstream calls")
            .mount(&self.server)
            .await;
    }

    /// JSON bodies of all requests the upstream received
    pub async fn received_bodies(&self) -> Vec<Value> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .map(|r| serde_json::from_slice(&r.body).expect("upstream body is JSON"))
            .collect()
    }

    /// Header values of the first received request
    pub async fn first_request_header(&self, name: &str) -> Option<String> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .first()
            .and_then(|r| r.headers.get(name))
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    }
}

/// Builders for upstream SSE bodies
pub struct UpstreamSse;

impl UpstreamSse {
    /// One `data:` event per line
    pub fn lines(lines: &[&str]) -> String {
        lines.iter().map(|l| format!("data: {}\n\n", l)).collect()
    }

    /// A complete answer, followed by a related-questions block
    pub fn answer(fragments: &[&str]) -> String {
        let mut lines = vec!["[ANSWER_START]"];
        lines.extend_from_slice(fragments);
        lines.extend_from_slice(&[
            "[RELATE_Q_START]",
            "[RELATE_Q_DONE]What else?",
            "[ANSWER_DONE]",
        ]);
        Self::lines(&lines)
    }

    /// An answer that stops without `[ANSWER_DONE]`
    pub fn truncated(fragments: &[&str]) -> String {
        let mut lines = vec!["[ANSWER_START]"];
        lines.extend_from_slice(fragments);
        Self::lines(&lines)
    }
}
