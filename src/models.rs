//! Caller model resolution
//!
//! Maps the model names callers ask for onto upstream model identifiers.
//! The table is fixed at build time and shared read-only across requests.

use serde::Serialize;

use crate::error::{AppError, AppResult};

/// Known caller model → upstream model pairs
const MODEL_MAPPING: &[(&str, &str)] = &[
    ("deepseek", "deepseek/deepseek-chat"),
    ("gpt-4o-mini", "openai/gpt-4o-mini"),
    ("gemini-flash-1.5", "google/gemini-flash-1.5"),
    ("deepseek-reasoner", "deepseek-reasoner"),
    ("minimax-01", "minimax/minimax-01"),
];

/// Immutable lookup table from caller model names to upstream model names
#[derive(Debug, Clone)]
pub struct ModelTable {
    entries: &'static [(&'static str, &'static str)],
}

impl Default for ModelTable {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelTable {
    /// Create the table with the built-in mapping
    pub fn new() -> Self {
        Self {
            entries: MODEL_MAPPING,
        }
    }

    /// Resolve a caller model to its upstream model.
    ///
    /// Matching is exact: no case folding, no prefix matching.
    pub fn resolve(&self, caller_model: &str) -> AppResult<&'static str> {
        self.entries
            .iter()
            .find(|(caller, _)| *caller == caller_model)
            .map(|(_, upstream)| *upstream)
            .ok_or_else(|| AppError::UnsupportedModel(caller_model.to_string()))
    }

    /// Caller-facing model names in table order
    pub fn caller_models(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(caller, _)| *caller)
    }

    /// Model list in the OpenAI `/v1/models` shape
    pub fn list(&self) -> ModelList {
        ModelList {
            object: "list",
            data: self
                .entries
                .iter()
                .map(|(caller, upstream)| ModelEntry {
                    id: caller,
                    object: "model",
                    owned_by: upstream.split('/').next().unwrap_or(upstream),
                })
                .collect(),
        }
    }
}

/// `/v1/models` response body
#[derive(Debug, Serialize)]
pub struct ModelList {
    pub object: &'static str,
    pub data: Vec<ModelEntry>,
}

/// One model in the `/v1/models` response
#[derive(Debug, Serialize)]
pub struct ModelEntry {
    pub id: &'static str,
    pub object: &'static str,
    pub owned_by: &'static str,
}
