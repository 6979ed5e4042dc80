//! Caller-facing request types
//!
//! OpenAI-style chat completion request as accepted on `/v1/chat/completions`.
//! Message content is normalised to a single string at deserialization time
//! so nothing downstream has to care about its original JSON shape.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Message content as it arrives on the wire
#[derive(Debug, Clone, PartialEq)]
pub enum MessageContent {
    /// Plain string content
    Text(String),
    /// Sequence of fragments, concatenated in order
    Fragments(Vec<Value>),
    /// Absent or `null`
    Empty,
    /// Any other JSON value, stringified
    Other(Value),
}

impl MessageContent {
    /// Flatten the content into one string
    pub fn into_text(self) -> String {
        match self {
            MessageContent::Text(text) => text,
            MessageContent::Fragments(parts) => parts.into_iter().map(fragment_text).collect(),
            MessageContent::Empty => String::new(),
            MessageContent::Other(value) => value.to_string(),
        }
    }
}

/// Text of one array element: strings verbatim, `{"type":"text","text":...}`
/// parts by their text, anything else stringified
fn fragment_text(part: Value) -> String {
    match part {
        Value::String(s) => s,
        Value::Object(mut map) => match map.remove("text") {
            Some(Value::String(text)) => text,
            _ => Value::Object(map).to_string(),
        },
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

impl<'de> Deserialize<'de> for MessageContent {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(match value {
            None | Some(Value::Null) => MessageContent::Empty,
            Some(Value::String(s)) => MessageContent::Text(s),
            Some(Value::Array(parts)) => MessageContent::Fragments(parts),
            Some(other) => MessageContent::Other(other),
        })
    }
}

/// Chat message with its content already flattened to text.
///
/// A missing role decodes as `""`, which matches neither `user` nor `assistant`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChatMessage {
    #[serde(default)]
    pub role: String,
    #[serde(default, deserialize_with = "deserialize_content")]
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }

    pub fn is_user(&self) -> bool {
        self.role == "user"
    }

    pub fn is_assistant(&self) -> bool {
        self.role == "assistant"
    }
}

fn deserialize_content<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    MessageContent::deserialize(deserializer).map(MessageContent::into_text)
}

/// Chat completion request
#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionRequest {
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
    #[serde(default)]
    pub stream: bool,
    pub model: String,
}
