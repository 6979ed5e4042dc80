//! Health check endpoints
//!
//! Provides endpoints for monitoring and container orchestration:
//! - `/` and unknown paths - Service banner
//! - `/health` - Health summary with version and uptime
//! - `/health/live` - Liveness probe

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::AppState;

/// Health status enum
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
}

/// Full health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: String,
    pub uptime_seconds: u64,
    pub timestamp: String,
    pub upstream: &'static str,
    pub models: usize,
}

/// Simple health response for liveness
#[derive(Debug, Serialize)]
pub struct SimpleHealthResponse {
    pub status: HealthStatus,
}

/// Service banner returned for the root and any unrouted path
#[derive(Debug, Serialize)]
pub struct ServiceStatus {
    pub status: &'static str,
    pub message: &'static str,
}

/// Service banner endpoint
pub async fn service_status() -> (StatusCode, Json<ServiceStatus>) {
    (
        StatusCode::OK,
        Json(ServiceStatus {
            status: "Service Running",
            message: "OpenAI-compatible chat gateway. POST /v1/chat/completions",
        }),
    )
}

/// Health check endpoint
///
/// The upstream is not probed: a probe would cost a real chat call.
pub async fn health_check(State(state): State<Arc<AppState>>) -> (StatusCode, Json<HealthResponse>) {
    let response = HealthResponse {
        status: HealthStatus::Healthy,
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        upstream: state.upstream.name(),
        models: state.models.caller_models().count(),
    };

    (StatusCode::OK, Json(response))
}

/// Liveness probe endpoint
pub async fn liveness_check() -> (StatusCode, Json<SimpleHealthResponse>) {
    (
        StatusCode::OK,
        Json(SimpleHealthResponse {
            status: HealthStatus::Healthy,
        }),
    )
}
