//! Advisor requests sent straight to Claude
//!
//! Used when there is no backend proxy. The API key comes from the
//! environment or keyring; without one every request fails immediately
//! with [`AdvisorError::Unavailable`] and the caller falls back.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Value, json};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use super::models::AdvisorRequest;
use super::transport::{AdvisorError, AdvisorTransport};
use crate::claude::{ApiKeyManager, ClaudeClient, ClaudeModel, CreateMessageRequest, Message, streaming};

/// First `{` through last `}` of the model's reply
static JSON_OBJECT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)\{.*\}").unwrap());

/// Prompt pieces for one request
struct Prompt {
    system: &'static str,
    user: String,
    max_tokens: u32,
}

fn prompt_for(request: &AdvisorRequest) -> Prompt {
    let xp = json!(request.xp_data());
    match request {
        AdvisorRequest::StudyTip { .. } => Prompt {
            system: "You are an expert GCSE study advisor. Provide practical, evidence-based \
                     study tips that are specific and actionable for students.",
            user: format!(
                "Based on this GCSE student's XP levels: {xp}, provide a personalized study tip. \
                 Focus on their weakest subject or suggest optimization strategies for their \
                 strongest subjects.\n\n\
                 Respond with JSON in this format:\n\
                 {{\"title\": \"Brief motivating title\", \
                 \"content\": \"Specific, actionable study advice (2-3 sentences)\", \
                 \"priority\": \"high|medium|low\", \
                 \"subjects\": [\"relevant subject names\"], \
                 \"estimatedTime\": \"time estimate like '15 minutes' or '30 minutes'\"}}"
            ),
            max_tokens: 300,
        },
        AdvisorRequest::Quests { completed_quests, .. } => {
            let recent = &completed_quests[completed_quests.len().saturating_sub(5)..];
            Prompt {
                system: "You are a GCSE study planner. Create engaging, specific, and achievable \
                         daily study quests that help students improve systematically.",
                user: format!(
                    "Generate 3 personalized daily study quests for a GCSE student with XP \
                     levels: {xp}. Consider their strengths and weaknesses. Recent completed \
                     quests: {recent}.\n\n\
                     Focus on varied activities: practice problems, revision, reading, videos.\n\n\
                     Respond with JSON in this format:\n\
                     {{\"quests\": [{{\"title\": \"Quest title\", \
                     \"description\": \"Detailed description of what to do\", \
                     \"xp\": 15-40, \"subject\": \"subject name\", \
                     \"difficulty\": \"Easy|Medium|Hard\", \"estimatedTime\": \"time estimate\"}}]}}",
                    recent = json!(recent)
                ),
                max_tokens: 600,
            }
        }
        AdvisorRequest::Recommendations { current_subject, .. } => {
            let focus = current_subject
                .as_deref()
                .map(|s| format!(" and current focus on {}", s))
                .unwrap_or_default();
            Prompt {
                system: "You are a GCSE education specialist. Provide targeted recommendations \
                         that address specific subject weaknesses and build on strengths.",
                user: format!(
                    "Based on XP levels {xp}{focus}, recommend 3 specific study strategies or \
                     focus areas for GCSE students.\n\n\
                     Respond with JSON in this format:\n\
                     {{\"recommendations\": [{{\"type\": \"resource|topic|practice\", \
                     \"title\": \"Recommendation title\", \
                     \"description\": \"Why this helps and what to do\", \"priority\": 1-10}}]}}"
                ),
                max_tokens: 400,
            }
        }
        AdvisorRequest::StudyPlan { time_available, .. } => Prompt {
            system: "You are a GCSE study planner. Create practical, time-efficient study plans \
                     that help students maximize their learning.",
            user: format!(
                "Create a personalized study plan for a GCSE student with XP levels: {xp}. \
                 They have {time_available} available for study today.\n\n\
                 Focus on their weakest subjects while maintaining strong ones. Provide a \
                 practical, time-specific plan.\n\n\
                 Respond with a simple bulleted list format (no JSON needed)."
            ),
            max_tokens: 400,
        },
    }
}

/// Pull the JSON object out of a reply that may wrap it in prose or fences
fn extract_json(text: &str) -> Result<Value, AdvisorError> {
    let found = JSON_OBJECT
        .find(text)
        .ok_or_else(|| AdvisorError::Invalid("reply contained no JSON object".to_string()))?;
    Ok(serde_json::from_str(found.as_str())?)
}

/// Reshape the model's object into the backend response shape
fn shape_response(request: &AdvisorRequest, reply: Value) -> Result<Value, AdvisorError> {
    match request {
        AdvisorRequest::StudyTip { .. } => {
            let field = |name: &str, default: Value| reply.get(name).cloned().unwrap_or(default);
            Ok(json!({
                "title": field("title", json!("Keep studying!")),
                "content": field("content", json!("Continue your excellent progress across all subjects.")),
                "priority": field("priority", json!("medium")),
                "subjects": field("subjects", json!([])),
                "estimatedTime": field("estimatedTime", json!("15 minutes")),
            }))
        }
        AdvisorRequest::Quests { .. } => take_list(reply, "quests"),
        AdvisorRequest::Recommendations { .. } => take_list(reply, "recommendations"),
        AdvisorRequest::StudyPlan { .. } => Ok(reply),
    }
}

fn take_list(mut reply: Value, key: &str) -> Result<Value, AdvisorError> {
    match reply.get_mut(key).map(Value::take) {
        Some(list @ Value::Array(_)) => Ok(list),
        _ => Err(AdvisorError::Invalid(format!("reply has no \"{}\" list", key))),
    }
}

/// Talks to the Claude messages API directly
#[derive(Debug)]
pub struct ClaudeTransport {
    client: Option<ClaudeClient>,
    model: ClaudeModel,
    cancel: CancellationToken,
}

impl ClaudeTransport {
    pub fn new(client: ClaudeClient, model: ClaudeModel) -> Self {
        Self { client: Some(client), model, cancel: CancellationToken::new() }
    }

    /// Build from the configured key source; a missing key leaves the
    /// transport unconfigured rather than failing.
    pub fn from_key_source(model: ClaudeModel) -> Self {
        let client = match ApiKeyManager::resolve().and_then(ClaudeClient::new) {
            Ok(client) => Some(client),
            Err(e) => {
                tracing::debug!("Claude advisor not configured: {}", e);
                None
            }
        };
        Self { client, model, cancel: CancellationToken::new() }
    }

    pub fn is_configured(&self) -> bool {
        self.client.is_some()
    }

    pub fn model(&self) -> ClaudeModel {
        self.model
    }

    /// Abort in-flight requests
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Token that aborts in-flight requests when cancelled
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    async fn stream_plan(
        &self,
        client: &ClaudeClient,
        request: CreateMessageRequest,
    ) -> Result<Value, AdvisorError> {
        let (tx, rx) = mpsc::channel(64);
        let (sent, text) = tokio::join!(
            client.send_streaming(request, tx, self.cancel.clone()),
            streaming::collect_text(rx)
        );
        sent?;
        Ok(json!({ "content": text?.trim() }))
    }
}

impl AdvisorTransport for ClaudeTransport {
    async fn send(&self, request: &AdvisorRequest) -> Result<Value, AdvisorError> {
        let client = self
            .client
            .as_ref()
            .ok_or_else(|| AdvisorError::Unavailable("no Claude API key configured".to_string()))?;

        let prompt = prompt_for(request);
        let message = CreateMessageRequest::new(self.model, vec![Message::user(prompt.user)])
            .with_system(prompt.system)
            .with_max_tokens(prompt.max_tokens);

        if let AdvisorRequest::StudyPlan { .. } = request {
            return self.stream_plan(client, message).await;
        }

        let response = client.send_message(message).await?;
        tracing::debug!(
            "Claude {} reply: {} output tokens",
            request.name(),
            response.usage.output_tokens
        );
        shape_response(request, extract_json(&response.text())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Quest, SubjectXp};
    use wiremock::matchers::{body_partial_json, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn reply(text: &str) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(json!({
            "id": "msg_1",
            "content": [{ "type": "text", "text": text }],
            "stop_reason": "end_turn",
            "usage": { "input_tokens": 10, "output_tokens": 20 }
        }))
    }

    async fn transport_for(server: &MockServer) -> ClaudeTransport {
        let client = ClaudeClient::new("sk-ant-test-key".into()).unwrap().with_endpoint(server.uri());
        let transport = ClaudeTransport::new(client, ClaudeModel::Haiku45);
        assert!(transport.is_configured());
        transport
    }

    #[test]
    fn extracts_json_from_fenced_reply() {
        let value = extract_json("Sure!\n```json\n{\"title\": \"x\"}\n```").unwrap();
        assert_eq!(value["title"], "x");
        assert!(extract_json("no braces here").is_err());
    }

    #[test]
    fn quest_prompt_lists_only_recent_completions() {
        let quests: Vec<Quest> = (1..=7).map(|i| Quest::new(i, format!("Q{}", i), 10)).collect();
        let request = AdvisorRequest::Quests { xp_data: SubjectXp::default(), completed_quests: quests };
        let prompt = prompt_for(&request);
        assert!(!prompt.user.contains("\"Q2\""));
        assert!(prompt.user.contains("\"Q3\""));
        assert_eq!(prompt.max_tokens, 600);
    }

    #[test]
    fn tip_shape_fills_missing_fields() {
        let request = AdvisorRequest::StudyTip { xp_data: SubjectXp::default() };
        let value = shape_response(&request, json!({ "title": "Go" })).unwrap();
        assert_eq!(value["title"], "Go");
        assert_eq!(value["priority"], "medium");
        assert_eq!(value["estimatedTime"], "15 minutes");
    }

    #[tokio::test]
    async fn unconfigured_transport_is_unavailable() {
        let transport =
            ClaudeTransport { client: None, model: ClaudeModel::Haiku45, cancel: CancellationToken::new() };
        assert!(!transport.is_configured());
        let request = AdvisorRequest::StudyTip { xp_data: SubjectXp::default() };
        assert!(matches!(transport.send(&request).await, Err(AdvisorError::Unavailable(_))));
    }

    #[tokio::test]
    async fn recommendations_are_unwrapped() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({ "max_tokens": 400, "stream": false })))
            .respond_with(reply(
                r#"{"recommendations":[{"type":"practice","title":"Timed papers","description":"Do one","priority":9}]}"#,
            ))
            .mount(&server)
            .await;

        let transport = transport_for(&server).await;
        let request = AdvisorRequest::Recommendations {
            xp_data: SubjectXp::default(),
            current_subject: Some("Physics".into()),
        };
        let value = transport.send(&request).await.unwrap();
        assert_eq!(value[0]["title"], "Timed papers");
    }

    #[tokio::test]
    async fn missing_quest_list_is_invalid() {
        let server = MockServer::start().await;
        Mock::given(method("POST")).respond_with(reply(r#"{"items": []}"#)).mount(&server).await;

        let transport = transport_for(&server).await;
        let request =
            AdvisorRequest::Quests { xp_data: SubjectXp::default(), completed_quests: Vec::new() };
        assert!(matches!(transport.send(&request).await, Err(AdvisorError::Invalid(_))));
    }

    #[tokio::test]
    async fn study_plan_is_streamed() {
        let sse = concat!(
            "event: message_start\ndata: {\"message\":{\"id\":\"msg_1\"}}\n\n",
            "event: content_block_delta\ndata: {\"delta\":{\"text\":\"• Algebra \"}}\n\n",
            "event: content_block_delta\ndata: {\"delta\":{\"text\":\"(20 minutes)\"}}\n\n",
            "event: message_stop\ndata: {}\n\n",
        );
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({ "stream": true })))
            .respond_with(ResponseTemplate::new(200).set_body_raw(sse, "text/event-stream"))
            .mount(&server)
            .await;

        let transport = transport_for(&server).await;
        let request =
            AdvisorRequest::StudyPlan { xp_data: SubjectXp::default(), time_available: "1 hour".into() };
        let value = transport.send(&request).await.unwrap();
        assert_eq!(value["content"], "• Algebra (20 minutes)");
    }

    #[tokio::test]
    async fn cancelled_plan_reports_cancellation() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_delay(std::time::Duration::from_secs(5)))
            .mount(&server)
            .await;

        let transport = transport_for(&server).await;
        transport.cancel();
        let request =
            AdvisorRequest::StudyPlan { xp_data: SubjectXp::default(), time_available: "1 hour".into() };
        let err = transport.send(&request).await.unwrap_err();
        assert!(matches!(err, AdvisorError::Claude(crate::claude::ClaudeError::Cancelled)));
    }
}
