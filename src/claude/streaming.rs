//! Server-Sent Events parsing for streamed Claude responses

use futures_util::StreamExt;
use reqwest::Response;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use super::error::ClaudeError;
use super::models::StreamEvent;

/// Incremental SSE line decoder
#[derive(Debug, Default)]
struct SseDecoder {
    buffer: String,
    event_type: String,
}

impl SseDecoder {
    /// Feed a chunk, returning every event it completes
    fn push(&mut self, chunk: &str) -> Vec<StreamEvent> {
        self.buffer.push_str(chunk);
        let mut events = Vec::new();
        while let Some(pos) = self.buffer.find('\n') {
            let line: String = self.buffer.drain(..=pos).collect();
            let line = line.trim_end();
            if let Some(event_type) = line.strip_prefix("event: ") {
                self.event_type = event_type.to_string();
            } else if let Some(data) = line.strip_prefix("data: ") {
                events.extend(parse_event(&self.event_type, data));
            }
        }
        events
    }
}

/// Read an SSE response body, forwarding parsed events through `tx`
pub async fn process_stream(
    response: Response,
    tx: mpsc::Sender<StreamEvent>,
    cancel_token: CancellationToken,
) -> Result<(), ClaudeError> {
    let mut stream = response.bytes_stream();
    let mut decoder = SseDecoder::default();

    loop {
        tokio::select! {
            _ = cancel_token.cancelled() => return Err(ClaudeError::Cancelled),
            chunk = stream.next() => match chunk {
                Some(Ok(bytes)) => {
                    for event in decoder.push(&String::from_utf8_lossy(&bytes)) {
                        // receiver dropped
                        if tx.send(event).await.is_err() {
                            return Ok(());
                        }
                    }
                }
                Some(Err(e)) => return Err(ClaudeError::RequestError(e)),
                None => return Ok(()),
            },
        }
    }
}

/// Drain `rx` into the full response text
pub async fn collect_text(mut rx: mpsc::Receiver<StreamEvent>) -> Result<String, ClaudeError> {
    let mut text = String::new();
    while let Some(event) = rx.recv().await {
        match event {
            StreamEvent::ContentBlockDelta { text: chunk } => text.push_str(&chunk),
            StreamEvent::Error { message } => return Err(ClaudeError::StreamError(message)),
            StreamEvent::MessageStop => break,
            _ => {}
        }
    }
    Ok(text)
}

fn parse_event(event_type: &str, data: &str) -> Option<StreamEvent> {
    let parsed = || serde_json::from_str::<serde_json::Value>(data).ok();
    match event_type {
        "message_start" => {
            let id = parsed()?["message"]["id"].as_str()?.to_string();
            Some(StreamEvent::MessageStart { id })
        }
        "content_block_delta" => {
            let text = parsed()?["delta"]["text"].as_str()?.to_string();
            Some(StreamEvent::ContentBlockDelta { text })
        }
        "message_delta" => {
            let stop_reason = parsed()?["delta"]["stop_reason"].as_str().map(str::to_string);
            Some(StreamEvent::MessageDelta { stop_reason })
        }
        "message_stop" => Some(StreamEvent::MessageStop),
        "ping" => Some(StreamEvent::Ping),
        "error" => {
            let message = parsed()
                .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
                .unwrap_or_else(|| "Unknown error".to_string());
            Some(StreamEvent::Error { message })
        }
        "content_block_start" | "content_block_stop" => None,
        _ => {
            tracing::debug!("Unknown SSE event type: {}", event_type);
            None
        }
    }
}
