//! Transports that carry advisor requests

use serde_json::Value;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

use super::claude::ClaudeTransport;
use super::models::AdvisorRequest;
use super::proxy::ProxyTransport;
use crate::claude::ClaudeError;

/// Why an advisor request produced no usable response
#[derive(Debug, Error)]
pub enum AdvisorError {
    /// No backend is configured, or it cannot be used (e.g. missing API key)
    #[error("Advisor unavailable: {0}")]
    Unavailable(String),

    /// Network-level failure
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Backend answered with a non-success status
    #[error("Backend returned {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body (may be empty)
        body: String,
    },

    /// Body was not the expected JSON
    #[error("Malformed response: {0}")]
    Malformed(#[from] serde_json::Error),

    /// Body parsed but violated the response schema
    #[error("Invalid response: {0}")]
    Invalid(String),

    /// Direct language-model call failed
    #[error(transparent)]
    Claude(#[from] ClaudeError),
}

/// Sends one advisor request and returns the raw JSON response
///
/// Responses have the backend's shape: an object for tips and study plans,
/// an array for quests and recommendations.
#[allow(async_fn_in_trait)]
pub trait AdvisorTransport {
    async fn send(&self, request: &AdvisorRequest) -> Result<Value, AdvisorError>;
}

/// A transport that is never available
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineTransport;

impl AdvisorTransport for OfflineTransport {
    async fn send(&self, _request: &AdvisorRequest) -> Result<Value, AdvisorError> {
        Err(AdvisorError::Unavailable("offline mode".to_string()))
    }
}

/// Runtime-selected transport
#[derive(Debug)]
pub enum Transport {
    Proxy(ProxyTransport),
    Claude(ClaudeTransport),
    Offline(OfflineTransport),
}

impl Transport {
    /// Token that aborts in-flight requests, for transports that support it
    pub fn cancel_token(&self) -> Option<CancellationToken> {
        match self {
            Self::Claude(t) => Some(t.cancel_token()),
            Self::Proxy(_) | Self::Offline(_) => None,
        }
    }
}

impl AdvisorTransport for Transport {
    async fn send(&self, request: &AdvisorRequest) -> Result<Value, AdvisorError> {
        match self {
            Self::Proxy(t) => t.send(request).await,
            Self::Claude(t) => t.send(request).await,
            Self::Offline(t) => t.send(request).await,
        }
    }
}
