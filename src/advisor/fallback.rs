//! Local content returned when the advisor is unreachable

use super::models::{AiQuest, AiRecommendation, AiStudyTip, RecommendationKind, TipPriority};
use crate::model::{Difficulty, SubjectXp};

/// Tip aimed at the lowest-XP subject
pub fn study_tip(xp: &SubjectXp) -> AiStudyTip {
    let weakest = xp.weakest().display_name();
    AiStudyTip {
        title: format!("Focus on {}", weakest),
        content: format!(
            "Your {} XP is lower than other subjects. Try 20 minutes of active recall and 3 targeted practice questions.",
            weakest
        ),
        priority: TipPriority::High,
        subjects: vec![weakest.to_string()],
        estimated_time: "20 minutes".to_string(),
    }
}

pub fn quests() -> Vec<AiQuest> {
    let quest = |title: &str, description: &str, xp, subject: &str, difficulty, time: &str| AiQuest {
        title: title.to_string(),
        description: description.to_string(),
        xp,
        subject: subject.to_string(),
        difficulty,
        estimated_time: time.to_string(),
    };

    vec![
        quest(
            "Complete 10 practice questions",
            "Work through 10 challenging problems in your weakest subject",
            30,
            "Math",
            Difficulty::Medium,
            "25 minutes",
        ),
        quest(
            "Review key concepts",
            "Summarize 3 important topics from recent lessons",
            25,
            "Physics",
            Difficulty::Easy,
            "20 minutes",
        ),
        quest(
            "Watch educational video",
            "Find and watch a tutorial on a challenging topic",
            20,
            "Chemistry",
            Difficulty::Easy,
            "15 minutes",
        ),
    ]
}

pub fn recommendations() -> Vec<AiRecommendation> {
    let rec = |kind, title: &str, description: &str, priority| AiRecommendation {
        kind,
        title: title.to_string(),
        description: description.to_string(),
        action_url: None,
        priority,
    };

    vec![
        rec(
            RecommendationKind::Practice,
            "Focus on weak areas",
            "Spend extra time on subjects with lower XP scores",
            8,
        ),
        rec(
            RecommendationKind::Resource,
            "Use active recall techniques",
            "Test yourself regularly instead of just re-reading notes",
            7,
        ),
        rec(
            RecommendationKind::Topic,
            "Practice past papers",
            "Regular timed practice with real exam questions",
            9,
        ),
    ]
}

pub fn study_plan() -> String {
    [
        "• Start with your weakest subject (15-20 minutes)",
        "• Review key formulas and concepts (10 minutes)",
        "• Practice 5-8 questions (15 minutes)",
        "• Quick review of strongest subject (10 minutes)",
        "• End with flashcard review (5 minutes)",
    ]
    .join("\n")
}
