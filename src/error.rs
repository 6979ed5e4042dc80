//! Error types for Chatbridge
//!
//! This module defines the error taxonomy surfaced to callers and the
//! JSON error envelope they are rendered into.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::streaming::StreamError;

/// Application-level errors
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Authentication required")]
    Unauthorized,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unsupported model: {0}")]
    UnsupportedModel(String),

    #[error("Upstream error: {0}")]
    UpstreamError(String),

    #[error("Upstream request timed out")]
    UpstreamTimeout,

    #[error("Upstream stream ended before the answer completed")]
    StreamTruncated,

    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Short label used for metrics and logs
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Unauthorized => "unauthorized",
            AppError::BadRequest(_) | AppError::JsonError(_) => "bad_request",
            AppError::UnsupportedModel(_) => "unsupported_model",
            AppError::UpstreamError(_) => "upstream_error",
            AppError::UpstreamTimeout => "upstream_timeout",
            AppError::StreamTruncated => "upstream_truncated",
            AppError::HttpError(e) if e.is_timeout() => "upstream_timeout",
            AppError::HttpError(_) => "upstream_error",
            AppError::Internal(_) => "internal",
        }
    }
}

impl From<StreamError> for AppError {
    fn from(err: StreamError) -> Self {
        match err {
            StreamError::Truncated => AppError::StreamTruncated,
            StreamError::Timeout(_) | StreamError::Deadline => AppError::UpstreamTimeout,
            StreamError::Transport(msg) => AppError::UpstreamError(msg),
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

/// Error details
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                "Unauthorized Access".to_string(),
            ),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::UnsupportedModel(model) => (
                StatusCode::BAD_REQUEST,
                "UNSUPPORTED_MODEL",
                format!("Unsupported model: {}", model),
            ),
            // Upstream details stay in the logs
            AppError::UpstreamError(_) => (
                StatusCode::BAD_GATEWAY,
                "UPSTREAM_ERROR",
                "Upstream service error".to_string(),
            ),
            AppError::UpstreamTimeout => (
                StatusCode::GATEWAY_TIMEOUT,
                "UPSTREAM_TIMEOUT",
                "Upstream service timed out".to_string(),
            ),
            AppError::StreamTruncated => (
                StatusCode::BAD_GATEWAY,
                "UPSTREAM_TRUNCATED",
                "Upstream service ended the answer prematurely".to_string(),
            ),
            AppError::HttpError(e) if e.is_timeout() => (
                StatusCode::GATEWAY_TIMEOUT,
                "UPSTREAM_TIMEOUT",
                "Upstream service timed out".to_string(),
            ),
            AppError::HttpError(_) => (
                StatusCode::BAD_GATEWAY,
                "UPSTREAM_ERROR",
                "Upstream service error".to_string(),
            ),
            AppError::JsonError(_) => (
                StatusCode::BAD_REQUEST,
                "INVALID_JSON",
                "Invalid JSON in request".to_string(),
            ),
            AppError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "Internal server error".to_string(),
            ),
        };

        let body = ErrorResponse {
            error: ErrorBody {
                code: code.to_string(),
                message,
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;
