//! HTTP client for the Claude messages API

use reqwest::{Client, Response, StatusCode};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use super::auth::ApiKeyManager;
use super::error::ClaudeError;
use super::models::{CreateMessageRequest, MessageResponse, StreamEvent};
use super::streaming;

/// Claude API client
#[derive(Clone)]
pub struct ClaudeClient {
    client: Client,
    api_key: String,
    endpoint: String,
}

impl std::fmt::Debug for ClaudeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClaudeClient")
            .field("api_key", &ApiKeyManager::mask_key(&self.api_key))
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl ClaudeClient {
    const API_URL: &'static str = "https://api.anthropic.com/v1/messages";
    const API_VERSION: &'static str = "2023-06-01";

    /// Create a client for the public API
    pub fn new(api_key: String) -> Result<Self, ClaudeError> {
        let client = Client::builder().timeout(std::time::Duration::from_secs(120)).build()?;
        Ok(Self { client, api_key, endpoint: Self::API_URL.to_string() })
    }

    /// Point the client at a different messages endpoint
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    async fn post(&self, request: &CreateMessageRequest) -> Result<Response, ClaudeError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", Self::API_VERSION)
            .header("content-type", "application/json")
            .json(request)
            .send()
            .await?;
        check_status(response).await
    }

    /// Send a streaming request, forwarding events through `tx` until the
    /// stream ends or `cancel_token` fires.
    pub async fn send_streaming(
        &self,
        request: CreateMessageRequest,
        tx: mpsc::Sender<StreamEvent>,
        cancel_token: CancellationToken,
    ) -> Result<(), ClaudeError> {
        let request = CreateMessageRequest { stream: true, ..request };
        let response = tokio::select! {
            _ = cancel_token.cancelled() => return Err(ClaudeError::Cancelled),
            r = self.post(&request) => r?,
        };
        streaming::process_stream(response, tx, cancel_token).await
    }

    /// Send a request and wait for the complete response
    pub async fn send_message(
        &self,
        request: CreateMessageRequest,
    ) -> Result<MessageResponse, ClaudeError> {
        let request = request.without_streaming();
        let response = self.post(&request).await?;
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

async fn check_status(response: Response) -> Result<Response, ClaudeError> {
    let status = response.status();

    if status == StatusCode::TOO_MANY_REQUESTS {
        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse().ok())
            .unwrap_or(60);
        return Err(ClaudeError::RateLimited { retry_after_seconds: retry_after });
    }

    if status == StatusCode::UNAUTHORIZED {
        return Err(ClaudeError::ApiError { status: 401, message: "Invalid API key".to_string() });
    }

    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(ClaudeError::ApiError { status: status.as_u16(), message });
    }

    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::claude::models::{ClaudeModel, Message};
    use wiremock::matchers::{header, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn request() -> CreateMessageRequest {
        CreateMessageRequest::new(ClaudeModel::Haiku45, vec![Message::user("Hi")])
    }

    #[tokio::test]
    async fn send_message_returns_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(header("x-api-key", "sk-ant-test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "msg_1",
                "content": [{ "type": "text", "text": "Hello" }],
                "stop_reason": "end_turn",
                "usage": { "input_tokens": 3, "output_tokens": 1 }
            })))
            .mount(&server)
            .await;

        let client = ClaudeClient::new("sk-ant-test-key".into()).unwrap().with_endpoint(server.uri());
        let response = client.send_message(request()).await.unwrap();
        assert_eq!(response.text(), "Hello");
    }

    #[tokio::test]
    async fn rate_limit_reads_retry_after() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "7"))
            .mount(&server)
            .await;

        let client = ClaudeClient::new("sk-ant-test-key".into()).unwrap().with_endpoint(server.uri());
        let err = client.send_message(request()).await.unwrap_err();
        assert!(matches!(err, ClaudeError::RateLimited { retry_after_seconds: 7 }));
    }

    #[tokio::test]
    async fn unauthorized_requires_reauth() {
        let server = MockServer::start().await;
        Mock::given(method("POST")).respond_with(ResponseTemplate::new(401)).mount(&server).await;

        let client = ClaudeClient::new("sk-ant-bad".into()).unwrap().with_endpoint(server.uri());
        let err = client.send_message(request()).await.unwrap_err();
        assert!(err.requires_reauth());
    }
}
