//! Direct Claude API access
//!
//! API key lookup, a messages client and SSE streaming. Used by the
//! advisor when no backend proxy is configured.

pub mod auth;
pub mod client;
pub mod error;
pub mod models;
pub mod streaming;

pub use auth::ApiKeyManager;
pub use client::ClaudeClient;
pub use error::ClaudeError;
pub use models::{ClaudeModel, CreateMessageRequest, Message, MessageResponse, StreamEvent};
