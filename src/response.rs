//! Caller-facing response envelopes
//!
//! Shapes answer events into OpenAI-compatible `chat.completion.chunk`
//! objects (streaming) or one `chat.completion` object (non-streaming).

use bytes::Bytes;
use serde::Serialize;

use crate::streaming::{format_sse_event, AnswerEvent};

const ASSISTANT_ROLE: &str = "assistant";
const FINISH_STOP: &str = "stop";

/// Incremental delta in a streaming chunk
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Delta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

/// Streaming choice
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StreamChoice {
    pub index: u32,
    pub delta: Delta,
    pub finish_reason: Option<&'static str>,
}

/// One `chat.completion.chunk` event
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatCompletionChunk {
    pub id: String,
    pub object: &'static str,
    pub created: i64,
    pub model: String,
    pub choices: Vec<StreamChoice>,
}

/// Full assistant message in a non-streaming response
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssistantMessage {
    pub role: &'static str,
    pub content: String,
}

/// Non-streaming choice
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionChoice {
    pub index: u32,
    pub message: AssistantMessage,
    pub finish_reason: Option<&'static str>,
}

/// Aggregated `chat.completion` response
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatCompletion {
    pub id: String,
    pub object: &'static str,
    pub created: i64,
    pub model: String,
    pub choices: Vec<CompletionChoice>,
}

/// Builds envelopes for one request.
///
/// The id and model are fixed for the request; `created` is stamped
/// at each emission.
#[derive(Debug, Clone)]
pub struct ResponseAssembler {
    id: String,
    model: String,
}

impl ResponseAssembler {
    /// `model` must be the caller-requested name, not the upstream one
    pub fn new(id: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            model: model.into(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Build the streaming chunk for one answer event
    pub fn chunk(&self, event: AnswerEvent) -> ChatCompletionChunk {
        let (delta, finish_reason) = match event {
            AnswerEvent::RoleOpen => (
                Delta {
                    role: Some(ASSISTANT_ROLE),
                    content: None,
                },
                None,
            ),
            AnswerEvent::Content(text) => (
                Delta {
                    role: None,
                    content: Some(text),
                },
                None,
            ),
            AnswerEvent::Finish => (Delta::default(), Some(FINISH_STOP)),
        };

        ChatCompletionChunk {
            id: self.id.clone(),
            object: "chat.completion.chunk",
            created: now(),
            model: self.model.clone(),
            choices: vec![StreamChoice {
                index: 0,
                delta,
                finish_reason,
            }],
        }
    }

    /// Build the chunk for one event, framed as an SSE `data:` event
    pub fn sse_chunk(&self, event: AnswerEvent) -> Bytes {
        format_sse_event(&self.chunk(event))
    }

    /// Build the final non-streaming response from the accumulated answer
    pub fn completion(&self, content: String) -> ChatCompletion {
        ChatCompletion {
            id: self.id.clone(),
            object: "chat.completion",
            created: now(),
            model: self.model.clone(),
            choices: vec![CompletionChoice {
                index: 0,
                message: AssistantMessage {
                    role: ASSISTANT_ROLE,
                    content,
                },
                finish_reason: Some(FINISH_STOP),
            }],
        }
    }
}

fn now() -> i64 {
    chrono::Utc::now().timestamp()
}
