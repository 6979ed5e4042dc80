//! HTTP routes for Chatbridge
//!
//! This module defines all HTTP endpoints exposed by the gateway.

pub mod chat;
pub mod health;
pub mod metrics;
pub mod models;

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri},
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    error::AppError,
    middleware::auth::{auth_middleware, authorize},
    AppState,
};

/// Chat completions path; also served under any path prefix
pub const CHAT_COMPLETIONS_PATH: &str = "/v1/chat/completions";

/// Create the main application router
pub fn create_router(state: Arc<AppState>) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Routes that require the bearer token when one is configured
    let protected_routes = Router::new()
        .route(CHAT_COMPLETIONS_PATH, post(chat::chat_completions))
        .route("/v1/models", get(models::list_models))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Public routes - no auth required
    let public_routes = Router::new()
        .route("/", get(health::service_status))
        .route("/health", get(health::health_check))
        .route("/health/live", get(health::liveness_check))
        .route("/metrics", get(metrics::prometheus_metrics));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .fallback(fallback)
        // Global middleware (applied to all routes)
        // Trace is inner, CORS outermost (same order as ServiceBuilder)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Handle unrouted paths
///
/// A path ending in `/v1/chat/completions` (a deployment behind a prefix such
/// as `/api`) goes to the chat handler under the same auth rules. Everything
/// else gets the service banner.
async fn fallback(
    State(state): State<Arc<AppState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, AppError> {
    if !uri.path().ends_with(CHAT_COMPLETIONS_PATH) {
        return Ok(health::service_status().await.into_response());
    }

    authorize(state.config.auth_token.as_deref(), &headers)?;

    if method != Method::POST {
        return Ok(StatusCode::METHOD_NOT_ALLOWED.into_response());
    }

    chat::chat_completions(State(state), body).await
}
