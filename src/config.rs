//! Configuration management for Chatbridge
//!
//! Configuration is loaded from environment variables.

use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

/// Default upstream chat endpoint
pub const DEFAULT_UPSTREAM_URL: &str = "https://gateway.aiapilab.com/api/ha/v1/chat";

/// Default browser-like user agent sent upstream
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Default language tag sent upstream
pub const DEFAULT_LANGUAGE: &str = "Chinese";

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,

    /// Bearer token callers must present; auth is disabled when unset
    pub auth_token: Option<String>,

    /// Upstream chat endpoint URL
    pub upstream_url: String,
    /// Explicit Host header sent upstream
    pub upstream_host: String,
    /// User-Agent header sent upstream
    pub upstream_user_agent: String,
    /// Language tag placed in every upstream request body
    pub upstream_language: String,

    /// Timeout for establishing the upstream connection (in seconds)
    pub upstream_connect_timeout_seconds: u64,
    /// Maximum idle time between upstream body reads (in seconds)
    pub upstream_read_timeout_seconds: u64,
    /// Overall upstream request timeout (in seconds)
    pub upstream_timeout_seconds: u64,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    ///
    /// Missing keys take their defaults; present but unparseable numbers fail.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let upstream_url = var("UPSTREAM_URL", DEFAULT_UPSTREAM_URL);
        let upstream_host = match lookup("UPSTREAM_HOST") {
            Some(host) => host,
            None => host_of(&upstream_url)?,
        };

        Ok(Self {
            host: var("CHATBRIDGE_HOST", "0.0.0.0"),
            port: var("CHATBRIDGE_PORT", "8080")
                .parse()
                .context("Invalid CHATBRIDGE_PORT")?,

            auth_token: lookup("AUTH_TOKEN").filter(|t| !t.is_empty()),

            upstream_url,
            upstream_host,
            upstream_user_agent: var("UPSTREAM_USER_AGENT", DEFAULT_USER_AGENT),
            upstream_language: var("UPSTREAM_LANGUAGE", DEFAULT_LANGUAGE),

            upstream_connect_timeout_seconds: var("UPSTREAM_CONNECT_TIMEOUT_SECONDS", "10")
                .parse()
                .context("Invalid UPSTREAM_CONNECT_TIMEOUT_SECONDS")?,
            upstream_read_timeout_seconds: var("UPSTREAM_READ_TIMEOUT_SECONDS", "120")
                .parse()
                .context("Invalid UPSTREAM_READ_TIMEOUT_SECONDS")?,
            upstream_timeout_seconds: var("UPSTREAM_TIMEOUT_SECONDS", "300")
                .parse()
                .context("Invalid UPSTREAM_TIMEOUT_SECONDS")?,
        })
    }

    /// Build a config pointing at the given upstream URL with default settings.
    ///
    /// Used by tests and embedders that don't read the environment.
    pub fn for_upstream(upstream_url: &str) -> Result<Self> {
        Ok(Self {
            host: "127.0.0.1".to_string(),
            port: 0,
            auth_token: None,
            upstream_url: upstream_url.to_string(),
            upstream_host: host_of(upstream_url)?,
            upstream_user_agent: DEFAULT_USER_AGENT.to_string(),
            upstream_language: DEFAULT_LANGUAGE.to_string(),
            upstream_connect_timeout_seconds: 10,
            upstream_read_timeout_seconds: 120,
            upstream_timeout_seconds: 300,
        })
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_connect_timeout_seconds)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_read_timeout_seconds)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_seconds)
    }
}

/// Extract `host[:port]` from a URL for the explicit Host header
fn host_of(url: &str) -> Result<String> {
    let parsed = reqwest::Url::parse(url).with_context(|| format!("Invalid UPSTREAM_URL: {}", url))?;
    let host = parsed
        .host_str()
        .with_context(|| format!("UPSTREAM_URL has no host: {}", url))?;

    Ok(match parsed.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    })
}
