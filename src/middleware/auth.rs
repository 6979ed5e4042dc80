//! Authentication middleware
//!
//! Checks the caller's bearer token against `AUTH_TOKEN` when one is configured.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use sha2::{Digest, Sha256};
use tracing::{debug, instrument, warn};

use crate::{error::AppError, AppState};

/// Extract the Authorization header and return the bearer token
pub fn extract_bearer_token(auth_header: &str) -> Option<&str> {
    auth_header.strip_prefix("Bearer ")
}

/// Hash a token so comparisons never touch the raw secrets byte by byte
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}

/// Check the request headers against the configured token.
///
/// When no token is configured every request passes. Otherwise the
/// request must carry `Authorization: Bearer <AUTH_TOKEN>`.
pub fn authorize(expected: Option<&str>, headers: &HeaderMap) -> Result<(), AppError> {
    let Some(expected) = expected else {
        return Ok(());
    };

    let presented = headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(extract_bearer_token);

    match presented {
        Some(token) if hash_token(token) == hash_token(expected) => {
            debug!("Caller authenticated");
            Ok(())
        }
        Some(_) => {
            warn!("Rejected request with invalid bearer token");
            Err(AppError::Unauthorized)
        }
        None => {
            warn!("Rejected request without bearer token");
            Err(AppError::Unauthorized)
        }
    }
}

/// Authentication middleware
#[instrument(skip_all, fields(path = %request.uri().path()))]
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    authorize(state.config.auth_token.as_deref(), request.headers())?;
    Ok(next.run(request).await)
}
