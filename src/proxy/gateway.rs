//! Upstream chat gateway client
//!
//! Posts translated requests to the sentinel-marker SSE chat endpoint.

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use tracing::{debug, error, instrument};

use super::{headers::build_upstream_headers, provider::ByteStream, request::UpstreamRequest, ChatUpstream};
use crate::{
    config::Config,
    error::{AppError, AppResult},
};

/// reqwest-backed client for the upstream chat gateway
pub struct ChatGateway {
    client: reqwest::Client,
    url: String,
    headers: HeaderMap,
}

impl ChatGateway {
    /// Create a new gateway client
    pub fn new(client: reqwest::Client, config: &Config) -> AppResult<Self> {
        Ok(Self {
            client,
            url: config.upstream_url.clone(),
            headers: build_upstream_headers(&config.upstream_user_agent, &config.upstream_host)?,
        })
    }

    /// Build the shared HTTP client with bounded upstream timeouts
    pub fn http_client(config: &Config) -> AppResult<reqwest::Client> {
        let client = reqwest::Client::builder()
            .pool_max_idle_per_host(100)
            .connect_timeout(config.connect_timeout())
            .timeout(config.request_timeout())
            .build()?;
        Ok(client)
    }
}

#[async_trait]
impl ChatUpstream for ChatGateway {
    fn name(&self) -> &'static str {
        "chat-gateway"
    }

    #[instrument(skip_all, fields(session_id = %request.session_id, model = %request.model))]
    async fn open_chat(&self, request: &UpstreamRequest) -> AppResult<ByteStream> {
        debug!(
            url = %self.url,
            question_len = request.question.len(),
            has_previous = !request.previous_question.is_empty(),
            "Sending request to upstream"
        );

        let response = self
            .client
            .post(&self.url)
            .headers(self.headers.clone())
            .json(request)
            .send()
            .await
            .map_err(|e| {
                error!(url = %self.url, error = %e, "Failed to send request to upstream");
                e
            })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            error!(status = %status, body_len = text.len(), "Upstream returned an error status");
            return Err(AppError::UpstreamError(format!(
                "Upstream error {}: {}",
                status, text
            )));
        }

        debug!(status = %status, "Upstream stream opened");
        Ok(Box::pin(response.bytes_stream()))
    }
}
