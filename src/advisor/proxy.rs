//! Advisor requests via the backend's `/api/ai/*` routes

use reqwest::Client;
use serde_json::Value;

use super::models::AdvisorRequest;
use super::transport::{AdvisorError, AdvisorTransport};

/// Posts requests to a backend proxy that holds the language-model credential
#[derive(Debug, Clone)]
pub struct ProxyTransport {
    client: Client,
    base_url: String,
}

impl ProxyTransport {
    /// Create a transport for a backend such as `http://localhost:5000`
    pub fn new(base_url: impl Into<String>) -> Result<Self, AdvisorError> {
        let client = Client::builder().build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url_for(&self, request: &AdvisorRequest) -> String {
        format!("{}{}", self.base_url, request.path())
    }
}

impl AdvisorTransport for ProxyTransport {
    async fn send(&self, request: &AdvisorRequest) -> Result<Value, AdvisorError> {
        let response = self
            .client
            .post(self.url_for(request))
            .header("content-type", "application/json")
            .json(&request.body())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AdvisorError::Status { status: status.as_u16(), body });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}
