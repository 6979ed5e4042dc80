//! SSE (Server-Sent Events) streaming
//!
//! Line buffering for the upstream byte stream, the sentinel-marker
//! translation engine, and SSE framing for caller-facing events.

pub mod events;
pub mod translator;

use bytes::Bytes;
use serde::Serialize;

pub use events::{answer_events, collect_answer, StreamError};
pub use translator::{AnswerEvent, AnswerTranslator, TranslationState};

/// Buffer for accumulating incomplete SSE lines across chunk boundaries.
///
/// Bytes are kept raw until a full line is available, so a multi-byte
/// UTF-8 character split across two network chunks decodes correctly.
///
/// # Example
/// ```
/// use chatbridge::streaming::SseLineBuffer;
///
/// let mut buffer = SseLineBuffer::new();
///
/// // First chunk contains partial line
/// let lines1 = buffer.feed(b"data: hel");
/// assert!(lines1.is_empty()); // No complete lines yet
///
/// // Second chunk completes the line
/// let lines2 = buffer.feed(b"lo\r\n\n");
/// assert_eq!(lines2, vec!["data: hello"]);
/// ```
#[derive(Debug, Default)]
pub struct SseLineBuffer {
    /// Accumulated incomplete line data
    incomplete: Vec<u8>,
}

impl SseLineBuffer {
    /// Create a new empty buffer
    pub fn new() -> Self {
        Self {
            incomplete: Vec::new(),
        }
    }

    /// Feed bytes into the buffer and return any complete lines.
    ///
    /// Lines are split on `\n`; a trailing `\r` is dropped and blank
    /// separator lines are skipped. Incomplete trailing data is retained
    /// for the next call.
    pub fn feed(&mut self, bytes: &[u8]) -> Vec<String> {
        self.incomplete.extend_from_slice(bytes);

        let mut complete_lines = Vec::new();
        let mut start = 0;

        while let Some(offset) = self.incomplete[start..].iter().position(|b| *b == b'\n') {
            let end = start + offset;
            if let Some(line) = decode_line(&self.incomplete[start..end]) {
                complete_lines.push(line);
            }
            start = end + 1;
        }

        self.incomplete.drain(..start);
        complete_lines
    }

    /// Flush a final unterminated line at end of stream
    pub fn finish(&mut self) -> Option<String> {
        let rest = std::mem::take(&mut self.incomplete);
        decode_line(&rest)
    }
}

fn decode_line(raw: &[u8]) -> Option<String> {
    let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
    if raw.is_empty() {
        None
    } else {
        // Invalid UTF-8 is replaced rather than aborting the answer
        Some(String::from_utf8_lossy(raw).into_owned())
    }
}

/// Format a serializable value as an SSE data event: `data: {json}\n\n`
pub fn format_sse_event<T: Serialize>(event: &T) -> Bytes {
    let json = serde_json::to_string(event).expect("SSE events should always serialize");
    Bytes::from(format!("data: {}\n\n", json))
}

/// SSE error event structure for stream errors.
#[derive(Debug, Serialize)]
struct SseErrorEvent {
    error: SseErrorDetails,
}

#[derive(Debug, Serialize)]
struct SseErrorDetails {
    message: String,
    #[serde(rename = "type")]
    error_type: &'static str,
    code: &'static str,
}

/// Format an error as an SSE error event.
///
/// Sent when the stream fails after headers are already committed, so the
/// caller can tell a broken answer from a finished one.
pub fn format_error_event(message: &str, code: &'static str) -> Bytes {
    format_sse_event(&SseErrorEvent {
        error: SseErrorDetails {
            message: message.to_string(),
            error_type: "stream_error",
            code,
        },
    })
}
