//! Chatbridge - OpenAI-compatible gateway for a sentinel-marker SSE chat upstream
//!
//! This library translates OpenAI-style chat completion requests into calls
//! against an upstream chat service, and translates the upstream's
//! `[ANSWER_START]` / `[ANSWER_DONE]` framed SSE stream back into
//! `chat.completion.chunk` events or a single `chat.completion` object.

pub mod config;
pub mod conversation;
pub mod error;
pub mod middleware;
pub mod models;
pub mod proxy;
pub mod response;
pub mod routes;
pub mod streaming;
pub mod types;

use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;

pub use crate::config::Config;
pub use crate::models::ModelTable;
pub use crate::proxy::{ChatGateway, ChatUpstream};

/// Application state shared across all request handlers.
///
/// Nothing in here is mutated after startup.
pub struct AppState {
    pub config: Config,
    /// Caller model → upstream model table
    pub models: ModelTable,
    /// Upstream chat service
    pub upstream: Arc<dyn ChatUpstream>,
    pub start_time: Instant,
}

impl AppState {
    /// Create a new application state talking to the configured gateway
    pub fn new(config: Config) -> Result<Self> {
        // Shared HTTP client with connection pooling and bounded timeouts
        let http_client = ChatGateway::http_client(&config)?;
        let upstream: Arc<dyn ChatUpstream> = Arc::new(ChatGateway::new(http_client, &config)?);

        Ok(Self::with_upstream(config, upstream))
    }

    /// Create an application state around an existing upstream implementation
    pub fn with_upstream(config: Config, upstream: Arc<dyn ChatUpstream>) -> Self {
        Self {
            config,
            models: ModelTable::new(),
            upstream,
            start_time: Instant::now(),
        }
    }
}
