//! Proxy module
//!
//! Builds upstream requests and forwards them to the chat gateway.

pub mod gateway;
pub mod headers;
pub mod provider;
pub mod request;

pub use gateway::ChatGateway;
pub use provider::{ByteStream, ChatUpstream};
pub use request::{new_session_id, UpstreamRequest};
