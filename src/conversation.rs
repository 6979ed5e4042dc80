//! Conversation context extraction
//!
//! The upstream takes a single question plus at most one prior exchange,
//! not a full history. This module derives both from the caller's messages.

use crate::types::ChatMessage;

/// What the upstream is asked now, plus the one preceding exchange
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversationContext {
    /// Content of the last user message
    pub question: String,
    /// Content of the nearest user message before the final one
    pub previous_question: String,
    /// Assistant reply directly following `previous_question`, if any
    pub previous_answer: String,
}

impl ConversationContext {
    /// Extract the question and previous exchange from an ordered history.
    ///
    /// The question is found by scanning from the tail, so trailing system or
    /// assistant messages are skipped. The previous exchange is searched from
    /// the second-to-last message backwards, independently of where the
    /// question was found.
    pub fn extract(history: &[ChatMessage]) -> Self {
        let question = history
            .iter()
            .rev()
            .find(|m| m.is_user())
            .map(|m| m.content.clone())
            .unwrap_or_default();

        let mut context = Self {
            question,
            ..Self::default()
        };

        if history.len() < 2 {
            return context;
        }

        if let Some(idx) = history[..history.len() - 1]
            .iter()
            .rposition(ChatMessage::is_user)
        {
            context.previous_question = history[idx].content.clone();
            if let Some(next) = history.get(idx + 1).filter(|m| m.is_assistant()) {
                context.previous_answer = next.content.clone();
            }
        }

        context
    }

    pub fn has_previous(&self) -> bool {
        !self.previous_question.is_empty()
    }
}
