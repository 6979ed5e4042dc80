//! Upstream chat provider abstraction
//!
//! Defines the trait the chat handler talks to, so the reqwest-backed
//! gateway client can be swapped for a stub in tests.

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use std::pin::Pin;

use super::request::UpstreamRequest;
use crate::error::AppResult;

/// Raw upstream response body
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, reqwest::Error>> + Send>>;

/// Trait defining the interface to the upstream chat service
///
/// Implementations MUST:
/// - Make exactly one upstream call per invocation, with no retry
/// - Return an error for transport failures and non-success statuses
///   before yielding any body bytes
#[async_trait]
pub trait ChatUpstream: Send + Sync {
    /// Provider name for logging and metrics
    fn name(&self) -> &'static str;

    /// Open a chat call and return the SSE body as a byte stream.
    ///
    /// Dropping the returned stream releases the upstream connection.
    async fn open_chat(&self, request: &UpstreamRequest) -> AppResult<ByteStream>;
}
