//! Pull-based answer event stream
//!
//! Wraps the upstream body in a lazy stream of [`AnswerEvent`]s. Streaming
//! callers forward each event as it arrives; non-streaming callers fold
//! them with [`collect_answer`]. Both share the same parsing path.

use std::time::Duration;

use futures::{Stream, StreamExt};
use thiserror::Error;
use tracing::{debug, warn};

use super::{AnswerEvent, AnswerTranslator, SseLineBuffer};
use crate::proxy::ByteStream;

/// Ways the upstream answer can fail after the call was accepted
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StreamError {
    #[error("upstream transport error: {0}")]
    Transport(String),

    #[error("upstream sent nothing for {0:?}")]
    Timeout(Duration),

    #[error("upstream answer exceeded the overall request timeout")]
    Deadline,

    #[error("upstream stream ended before [ANSWER_DONE]")]
    Truncated,
}

impl StreamError {
    /// Code used in SSE error events and metrics
    pub fn code(&self) -> &'static str {
        match self {
            StreamError::Transport(_) => "upstream_error",
            StreamError::Timeout(_) | StreamError::Deadline => "upstream_timeout",
            StreamError::Truncated => "upstream_truncated",
        }
    }
}

/// Translate an upstream body into answer events.
///
/// The stream ends right after [`AnswerEvent::Finish`]; the upstream body
/// is dropped at that point, or after the first error. An upstream that
/// closes without `[ANSWER_DONE]` yields [`StreamError::Truncated`] last.
/// Each read waits at most `read_timeout`; the client's overall request
/// timeout also bounds the body and surfaces as [`StreamError::Deadline`].
pub fn answer_events(
    body: ByteStream,
    read_timeout: Duration,
) -> impl Stream<Item = Result<AnswerEvent, StreamError>> + Send {
    async_stream::stream! {
        let mut body = body;
        let mut buffer = SseLineBuffer::new();
        let mut translator = AnswerTranslator::new();

        loop {
            let (lines, at_eof) = match tokio::time::timeout(read_timeout, body.next()).await {
                Ok(Some(Ok(bytes))) => (buffer.feed(&bytes), false),
                Ok(None) => (buffer.finish().into_iter().collect(), true),
                Ok(Some(Err(e))) if e.is_timeout() => {
                    warn!(error = %e, state = ?translator.state(), "Upstream request deadline hit while reading");
                    yield Err(StreamError::Deadline);
                    return;
                }
                Ok(Some(Err(e))) => {
                    warn!(error = %e, state = ?translator.state(), "Upstream body read failed");
                    yield Err(StreamError::Transport(e.to_string()));
                    return;
                }
                Err(_) => {
                    warn!(timeout = ?read_timeout, state = ?translator.state(), "Upstream body read timed out");
                    yield Err(StreamError::Timeout(read_timeout));
                    return;
                }
            };

            for line in lines {
                if let Some(event) = translator.feed_line(&line) {
                    yield Ok(event);
                }
                if translator.is_done() {
                    debug!("Upstream answer complete");
                    return;
                }
            }

            if at_eof {
                warn!(state = ?translator.state(), "Upstream closed before the answer finished");
                yield Err(StreamError::Truncated);
                return;
            }
        }
    }
}

/// Accumulate answer events into the full answer text
pub async fn collect_answer<S>(events: S) -> Result<String, StreamError>
where
    S: Stream<Item = Result<AnswerEvent, StreamError>>,
{
    futures::pin_mut!(events);
    let mut answer = String::new();

    while let Some(event) = events.next().await {
        match event? {
            AnswerEvent::RoleOpen => {}
            AnswerEvent::Content(text) => answer.push_str(&text),
            AnswerEvent::Finish => return Ok(answer),
        }
    }

    Err(StreamError::Truncated)
}
