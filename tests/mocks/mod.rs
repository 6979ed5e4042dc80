//! Mock infrastructure for testing external services
//!
//! This module provides a wiremock-based stand-in for the upstream chat
//! gateway. Mocks support success, error and truncated-stream scenarios.

pub mod upstream;

pub use upstream::*;
