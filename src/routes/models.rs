//! Models endpoint
//!
//! Lists the caller-facing model names the gateway accepts.

use std::sync::Arc;

use axum::{extract::State, Json};

use crate::{models::ModelList, AppState};

/// List supported models
pub async fn list_models(State(state): State<Arc<AppState>>) -> Json<ModelList> {
    Json(state.models.list())
}
