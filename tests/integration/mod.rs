//! Integration tests for the Chatbridge gateway
//!
//! These tests drive the real router against a wiremock upstream speaking
//! the sentinel-marker SSE protocol.

mod auth;
mod health;
