//! Request and response shapes for the AI study advisor
//!
//! Responses are deserialized into these types and then checked with
//! [`Validate`]; anything that fails either step is treated exactly like a
//! transport failure.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::model::{Difficulty, Quest, SubjectXp};

/// How urgent a tip is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TipPriority {
    High,
    Medium,
    Low,
}

/// A personalized study tip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiStudyTip {
    pub title: String,
    pub content: String,
    pub priority: TipPriority,
    pub subjects: Vec<String>,
    pub estimated_time: String,
}

/// A suggested daily quest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiQuest {
    pub title: String,
    pub description: String,
    pub xp: u32,
    pub subject: String,
    pub difficulty: Difficulty,
    pub estimated_time: String,
}

/// What a recommendation points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationKind {
    Resource,
    Topic,
    Practice,
}

/// A study strategy or focus-area recommendation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiRecommendation {
    #[serde(rename = "type")]
    pub kind: RecommendationKind,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_url: Option<String>,
    /// 1 (low) to 10 (high)
    pub priority: u8,
}

/// Body of a study-plan response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyPlan {
    pub content: String,
}

/// Schema checks beyond what serde enforces
pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}

fn require_text(field: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() { Err(format!("{} is empty", field)) } else { Ok(()) }
}

impl Validate for AiStudyTip {
    fn validate(&self) -> Result<(), String> {
        require_text("tip title", &self.title)?;
        require_text("tip content", &self.content)
    }
}

impl Validate for AiQuest {
    fn validate(&self) -> Result<(), String> {
        require_text("quest title", &self.title)?;
        require_text("quest subject", &self.subject)?;
        if self.xp == 0 {
            return Err(format!("quest {:?} has no XP reward", self.title));
        }
        Ok(())
    }
}

impl Validate for AiRecommendation {
    fn validate(&self) -> Result<(), String> {
        require_text("recommendation title", &self.title)?;
        if !(1..=10).contains(&self.priority) {
            return Err(format!("recommendation priority {} outside 1-10", self.priority));
        }
        Ok(())
    }
}

impl Validate for StudyPlan {
    fn validate(&self) -> Result<(), String> {
        require_text("study plan", &self.content)
    }
}

impl<T: Validate> Validate for Vec<T> {
    fn validate(&self) -> Result<(), String> {
        if self.is_empty() {
            return Err("empty list".to_string());
        }
        self.iter().try_for_each(Validate::validate)
    }
}

/// The four advisor operations and their inputs
#[derive(Debug, Clone, PartialEq)]
pub enum AdvisorRequest {
    StudyTip { xp_data: SubjectXp },
    Quests { xp_data: SubjectXp, completed_quests: Vec<Quest> },
    Recommendations { xp_data: SubjectXp, current_subject: Option<String> },
    StudyPlan { xp_data: SubjectXp, time_available: String },
}

impl AdvisorRequest {
    /// Backend route for this request
    pub fn path(&self) -> &'static str {
        match self {
            Self::StudyTip { .. } => "/api/ai/study-tip",
            Self::Quests { .. } => "/api/ai/quests",
            Self::Recommendations { .. } => "/api/ai/recommendations",
            Self::StudyPlan { .. } => "/api/ai/study-plan",
        }
    }

    /// Short name for logs
    pub fn name(&self) -> &'static str {
        match self {
            Self::StudyTip { .. } => "study tip",
            Self::Quests { .. } => "quests",
            Self::Recommendations { .. } => "recommendations",
            Self::StudyPlan { .. } => "study plan",
        }
    }

    pub fn xp_data(&self) -> &SubjectXp {
        match self {
            Self::StudyTip { xp_data }
            | Self::Quests { xp_data, .. }
            | Self::Recommendations { xp_data, .. }
            | Self::StudyPlan { xp_data, .. } => xp_data,
        }
    }

    /// JSON body posted to the backend
    pub fn body(&self) -> Value {
        match self {
            Self::StudyTip { xp_data } => json!({ "xpData": xp_data }),
            Self::Quests { xp_data, completed_quests } => {
                json!({ "xpData": xp_data, "completedQuests": completed_quests })
            }
            Self::Recommendations { xp_data, current_subject: Some(subject) } => {
                json!({ "xpData": xp_data, "currentSubject": subject })
            }
            Self::Recommendations { xp_data, current_subject: None } => {
                json!({ "xpData": xp_data })
            }
            Self::StudyPlan { xp_data, time_available } => {
                json!({ "xpData": xp_data, "timeAvailable": time_available })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tip_parses_wire_shape() {
        let json = r#"{
            "title": "Shore up History",
            "content": "Do two timed source questions.",
            "priority": "high",
            "subjects": ["History"],
            "estimatedTime": "30 minutes"
        }"#;
        let tip: AiStudyTip = serde_json::from_str(json).unwrap();
        assert_eq!(tip.priority, TipPriority::High);
        assert!(tip.validate().is_ok());
    }

    #[test]
    fn tip_with_unknown_priority_is_malformed() {
        let json = r#"{"title":"t","content":"c","priority":"urgent","subjects":[],"estimatedTime":"1m"}"#;
        assert!(serde_json::from_str::<AiStudyTip>(json).is_err());
    }

    #[test]
    fn quest_without_reward_is_invalid() {
        let quest = AiQuest {
            title: "Read".into(),
            description: "Read a chapter".into(),
            xp: 0,
            subject: "Biology".into(),
            difficulty: Difficulty::Easy,
            estimated_time: "10 minutes".into(),
        };
        assert!(quest.validate().is_err());
    }

    #[test]
    fn recommendation_priority_bounds() {
        let mut rec = AiRecommendation {
            kind: RecommendationKind::Topic,
            title: "Past papers".into(),
            description: "Timed practice".into(),
            action_url: None,
            priority: 10,
        };
        assert!(rec.validate().is_ok());
        rec.priority = 11;
        assert!(rec.validate().is_err());
        rec.priority = 0;
        assert!(rec.validate().is_err());
    }

    #[test]
    fn empty_lists_are_invalid() {
        let empty: Vec<AiQuest> = Vec::new();
        assert!(empty.validate().is_err());
    }

    #[test]
    fn request_bodies_use_backend_field_names() {
        let xp = SubjectXp::default();
        let body = AdvisorRequest::Recommendations { xp_data: xp.clone(), current_subject: None }.body();
        assert!(body.get("xpData").is_some());
        assert!(body.get("currentSubject").is_none());

        let body = AdvisorRequest::StudyPlan { xp_data: xp, time_available: "1 hour".into() }.body();
        assert_eq!(body["timeAvailable"], "1 hour");
    }
}
