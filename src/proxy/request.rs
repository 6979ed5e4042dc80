//! Upstream request body
//!
//! The upstream chat endpoint takes one question plus an optional prior
//! exchange. Absent context is sent as empty strings, never omitted.

use serde::Serialize;
use uuid::Uuid;

use crate::conversation::ConversationContext;

/// JSON body posted to the upstream chat endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpstreamRequest {
    pub model: String,
    pub question: String,
    pub language: String,
    pub session_id: String,
    pub previous_question: String,
    pub previous_answer: String,
}

impl UpstreamRequest {
    /// Build the upstream body for one caller request
    pub fn build(
        context: &ConversationContext,
        session_id: &str,
        upstream_model: &str,
        language: &str,
    ) -> Self {
        Self {
            model: upstream_model.to_string(),
            question: context.question.clone(),
            language: language.to_string(),
            session_id: session_id.to_string(),
            previous_question: context.previous_question.clone(),
            previous_answer: context.previous_answer.clone(),
        }
    }
}

/// Generate a fresh upstream session id, one per caller request
pub fn new_session_id() -> String {
    Uuid::new_v4().to_string()
}
