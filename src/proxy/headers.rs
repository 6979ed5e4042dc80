//! Header utilities for upstream requests
//!
//! The upstream expects a browser-like client: JSON content type, a static
//! user agent and an explicit Host header. Caller headers are never forwarded.

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE, HOST, USER_AGENT};

use crate::error::{AppError, AppResult};

/// Build the fixed header set for upstream chat requests
pub fn build_upstream_headers(user_agent: &str, host: &str) -> AppResult<HeaderMap> {
    let mut headers = HeaderMap::new();

    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(USER_AGENT, header_value("user agent", user_agent)?);
    headers.insert(HOST, header_value("host", host)?);

    Ok(headers)
}

fn header_value(what: &str, value: &str) -> AppResult<HeaderValue> {
    HeaderValue::from_str(value).map_err(|e| {
        AppError::Internal(anyhow::anyhow!("Invalid upstream {} header: {}", what, e))
    })
}
