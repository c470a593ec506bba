//! AI study advisor
//!
//! Every operation makes a single attempt through an [`AdvisorTransport`].
//! Transport errors, malformed bodies and schema violations all end the
//! same way: the operation returns locally synthesized fallback content.
//! Nothing here mutates persisted state; accepting suggested quests is a
//! separate ledger operation.

pub mod claude;
pub mod fallback;
pub mod models;
pub mod proxy;
pub mod sequence;
pub mod transport;

pub use claude::ClaudeTransport;
pub use models::{
    AdvisorRequest, AiQuest, AiRecommendation, AiStudyTip, RecommendationKind, StudyPlan,
    TipPriority, Validate,
};
pub use proxy::ProxyTransport;
pub use sequence::{Latest, Ticket};
pub use transport::{AdvisorError, AdvisorTransport, OfflineTransport, Transport};

use serde::de::DeserializeOwned;

use crate::model::{Quest, SubjectXp};

/// Result of an advisor operation
#[derive(Debug, Clone, PartialEq)]
pub struct Advice<T> {
    pub value: T,
    /// Why fallback content was used, if it was
    pub notice: Option<String>,
}

impl<T> Advice<T> {
    fn remote(value: T) -> Self {
        Self { value, notice: None }
    }

    fn fallback(value: T, reason: String) -> Self {
        Self { value, notice: Some(reason) }
    }

    pub fn is_fallback(&self) -> bool {
        self.notice.is_some()
    }

    pub fn into_inner(self) -> T {
        self.value
    }

    fn map<U>(self, f: impl FnOnce(T) -> U) -> Advice<U> {
        Advice { value: f(self.value), notice: self.notice }
    }
}

/// Requests tips, quests, recommendations and study plans
#[derive(Debug)]
pub struct AdvisoryClient<T> {
    transport: T,
    tip: Latest<AiStudyTip>,
    quests: Latest<Vec<AiQuest>>,
    recommendations: Latest<Vec<AiRecommendation>>,
    plan: Latest<StudyPlan>,
}

impl<T: AdvisorTransport> AdvisoryClient<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            tip: Latest::new(),
            quests: Latest::new(),
            recommendations: Latest::new(),
            plan: Latest::new(),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Send, decode and validate one request
    async fn fetch<R>(&self, request: &AdvisorRequest) -> Result<R, AdvisorError>
    where
        R: DeserializeOwned + Validate,
    {
        let raw = self.transport.send(request).await?;
        let value: R = serde_json::from_value(raw)?;
        value.validate().map_err(AdvisorError::Invalid)?;
        Ok(value)
    }

    async fn ask<R>(
        &self,
        slot: &Latest<R>,
        request: AdvisorRequest,
        fallback: impl FnOnce() -> R,
    ) -> Advice<R>
    where
        R: DeserializeOwned + Validate + Clone,
    {
        let ticket = slot.ticket();
        let advice = match self.fetch(&request).await {
            Ok(value) => Advice::remote(value),
            Err(e) => {
                tracing::warn!("AI {} failed, using fallback: {}", request.name(), e);
                Advice::fallback(fallback(), e.to_string())
            }
        };
        slot.settle(ticket, advice.value.clone());
        advice
    }

    /// A study tip, falling back to one aimed at the weakest subject
    pub async fn personalized_tip(&self, xp: &SubjectXp) -> Advice<AiStudyTip> {
        let request = AdvisorRequest::StudyTip { xp_data: xp.clone() };
        self.ask(&self.tip, request, || fallback::study_tip(xp)).await
    }

    /// A batch of suggested daily quests
    pub async fn smart_quests(&self, xp: &SubjectXp, completed: &[Quest]) -> Advice<Vec<AiQuest>> {
        let request =
            AdvisorRequest::Quests { xp_data: xp.clone(), completed_quests: completed.to_vec() };
        self.ask(&self.quests, request, fallback::quests).await
    }

    /// Study strategy recommendations, optionally for one subject
    pub async fn recommendations(
        &self,
        xp: &SubjectXp,
        current_subject: Option<&str>,
    ) -> Advice<Vec<AiRecommendation>> {
        let request = AdvisorRequest::Recommendations {
            xp_data: xp.clone(),
            current_subject: current_subject.map(str::to_string),
        };
        self.ask(&self.recommendations, request, fallback::recommendations).await
    }

    /// A free-text study plan for the time available
    pub async fn study_plan(&self, xp: &SubjectXp, time_available: &str) -> Advice<String> {
        let request = AdvisorRequest::StudyPlan {
            xp_data: xp.clone(),
            time_available: time_available.to_string(),
        };
        self.ask(&self.plan, request, || StudyPlan { content: fallback::study_plan() })
            .await
            .map(|plan| plan.content)
    }

    /// Tip and recommendations together; each fails independently
    pub async fn insights(
        &self,
        xp: &SubjectXp,
    ) -> (Advice<AiStudyTip>, Advice<Vec<AiRecommendation>>) {
        tokio::join!(self.personalized_tip(xp), self.recommendations(xp, None))
    }

    pub fn current_tip(&self) -> Option<AiStudyTip> {
        self.tip.get()
    }

    pub fn current_quests(&self) -> Option<Vec<AiQuest>> {
        self.quests.get()
    }

    pub fn current_recommendations(&self) -> Option<Vec<AiRecommendation>> {
        self.recommendations.get()
    }

    pub fn current_plan(&self) -> Option<String> {
        self.plan.get().map(|plan| plan.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Difficulty, Subject};
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn xp() -> SubjectXp {
        crate::model::AppState::seed().xp
    }

    fn unreachable() -> AdvisoryClient<ProxyTransport> {
        // nothing listens on port 1
        AdvisoryClient::new(ProxyTransport::new("http://127.0.0.1:1").unwrap())
    }

    #[tokio::test]
    async fn rejected_calls_return_fallbacks() {
        let client = unreachable();
        let xp = xp();

        let tip = client.personalized_tip(&xp).await;
        assert!(tip.is_fallback());
        assert_eq!(tip.value, fallback::study_tip(&xp));

        let quests = client.smart_quests(&xp, &[]).await;
        assert!(quests.is_fallback());
        assert_eq!(quests.value, fallback::quests());

        let recs = client.recommendations(&xp, Some("Physics")).await;
        assert!(recs.is_fallback());
        assert_eq!(recs.value, fallback::recommendations());
        assert_eq!(client.current_recommendations(), Some(recs.value));

        let plan = client.study_plan(&xp, "1 hour").await;
        assert_eq!(plan.value, fallback::study_plan());
    }

    #[tokio::test]
    async fn offline_fallback_tip_targets_weakest_subject() {
        let client = AdvisoryClient::new(OfflineTransport);
        let xp = SubjectXp::default().with_added(Subject::Math, 10);
        let tip = client.personalized_tip(&xp).await.into_inner();
        assert_eq!(tip.subjects, vec![xp.weakest().display_name().to_string()]);
        assert_eq!(client.current_tip(), Some(tip));
    }

    #[tokio::test]
    async fn valid_backend_responses_are_used() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/ai/quests"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
                "title": "Balance 10 equations",
                "description": "Chemistry symbol equations",
                "xp": 35,
                "subject": "Chemistry",
                "difficulty": "Hard",
                "estimatedTime": "30 minutes"
            }])))
            .mount(&server)
            .await;

        let client = AdvisoryClient::new(ProxyTransport::new(server.uri()).unwrap());
        let advice = client.smart_quests(&xp(), &[]).await;
        assert!(!advice.is_fallback());
        assert_eq!(advice.value.len(), 1);
        assert_eq!(advice.value[0].difficulty, Difficulty::Hard);
        assert_eq!(client.current_quests(), Some(advice.value));
    }

    #[tokio::test]
    async fn schema_violations_fall_back() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/ai/study-tip"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "title": "Only a title" })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/ai/recommendations"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
                "type": "topic", "title": "Too keen", "description": "x", "priority": 42
            }])))
            .mount(&server)
            .await;

        let client = AdvisoryClient::new(ProxyTransport::new(server.uri()).unwrap());
        let (tip, recs) = client.insights(&xp()).await;
        assert!(tip.is_fallback());
        assert!(recs.is_fallback());
        assert_eq!(recs.value, fallback::recommendations());
    }

    /// Answers study-plan requests after a delay named in `time_available`
    struct DelayedTransport;

    impl AdvisorTransport for DelayedTransport {
        async fn send(&self, request: &AdvisorRequest) -> Result<Value, AdvisorError> {
            let AdvisorRequest::StudyPlan { time_available, .. } = request else {
                return Err(AdvisorError::Unavailable("plans only".into()));
            };
            let millis = if time_available == "slow" { 80 } else { 5 };
            tokio::time::sleep(Duration::from_millis(millis)).await;
            Ok(json!({ "content": format!("plan for {}", time_available) }))
        }
    }

    #[tokio::test]
    async fn late_response_does_not_replace_newer_plan() {
        let client = AdvisoryClient::new(DelayedTransport);
        let xp = xp();

        let (slow, fast) = tokio::join!(client.study_plan(&xp, "slow"), client.study_plan(&xp, "fast"));
        assert_eq!(slow.value, "plan for slow");
        assert_eq!(fast.value, "plan for fast");
        assert_eq!(client.current_plan().as_deref(), Some("plan for fast"));
    }
}
