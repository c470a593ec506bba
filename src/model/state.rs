//! The root aggregate persisted under `solo_leveling_state`

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::paper::{ExamBoard, PastPaper, Resource, Season};
use super::quest::{Difficulty, Quest, WeeklyQuest};
use super::subject::SubjectXp;

/// Ways a persisted value can fail shape validation
#[derive(Debug, Error)]
pub enum ValidationError {
    /// JSON did not match the schema (missing/unknown keys, wrong types)
    #[error("Malformed value: {0}")]
    Malformed(#[from] serde_json::Error),

    /// XP multiplier must be a positive finite number
    #[error("Invalid XP multiplier: {0}")]
    InvalidMultiplier(f64),

    /// Quest rewards must be positive
    #[error("Quest {id} has a non-positive XP reward")]
    ZeroReward {
        /// Offending quest
        id: u64,
    },

    /// Quest identifiers must be unique within their list
    #[error("Duplicate quest id {0}")]
    DuplicateQuestId(u64),
}

/// User settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Scale applied by `add_xp`
    pub xp_multiplier: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self { xp_multiplier: 1.5 }
    }
}

/// Everything the dashboard shows, persisted as one JSON document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    pub xp: SubjectXp,
    pub past_papers: Vec<PastPaper>,
    /// Daily quests
    pub quests: Vec<Quest>,
    pub settings: Settings,
    /// Days of the month with a completed study session
    pub study_streak: Vec<u32>,
    pub resources: Vec<Resource>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::seed()
    }
}

impl AppState {
    /// The starting state for a new user, also used when stored state is invalid
    pub fn seed() -> Self {
        Self {
            xp: SubjectXp {
                math: 120,
                physics: 85,
                chemistry: 90,
                biology: 75,
                history: 50,
                ..SubjectXp::default()
            },
            past_papers: seed_papers(),
            quests: vec![
                Quest::new(1, "Complete a practice quiz", 25),
                Quest::new(2, "Review flashcards for 15 minutes", 20),
                Quest::new(3, "Solve 10 practice problems", 30).completed(),
                Quest::new(4, "Read study notes for 30 minutes", 25).completed(),
                Quest::new(5, "Watch educational video", 15),
            ],
            settings: Settings::default(),
            study_streak: vec![1, 2, 5, 8, 10, 11, 15, 16, 17, 20],
            resources: Vec::new(),
        }
    }

    /// Parse and validate a persisted state document
    pub fn from_json(json: &str) -> Result<Self, ValidationError> {
        let state: Self = serde_json::from_str(json)?;
        state.validate()?;
        Ok(state)
    }

    /// Check invariants serde cannot express
    pub fn validate(&self) -> Result<(), ValidationError> {
        let multiplier = self.settings.xp_multiplier;
        if !multiplier.is_finite() || multiplier <= 0.0 {
            return Err(ValidationError::InvalidMultiplier(multiplier));
        }
        validate_quests(self.quests.iter().map(|q| (q.id, q.xp)))
    }

    /// Number of completed daily quests
    pub fn completed_quest_count(&self) -> usize {
        self.quests.iter().filter(|q| q.completed).count()
    }

    /// Completed daily quests (sent to the AI as history)
    pub fn completed_quests(&self) -> Vec<Quest> {
        self.quests.iter().filter(|q| q.completed).cloned().collect()
    }
}

/// Validate a stored weekly quest list
pub fn validate_weekly(quests: &[WeeklyQuest]) -> Result<(), ValidationError> {
    validate_quests(quests.iter().map(|q| (q.id, q.xp)))
}

fn validate_quests(quests: impl Iterator<Item = (u64, u32)>) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();
    for (id, xp) in quests {
        if xp == 0 {
            return Err(ValidationError::ZeroReward { id });
        }
        if !seen.insert(id) {
            return Err(ValidationError::DuplicateQuestId(id));
        }
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn seed_paper(
    id: u64,
    title: &str,
    subject: &str,
    difficulty: Difficulty,
    board: ExamBoard,
    year: i32,
    paper_number: &str,
    topics: &[&str],
    curriculum_code: &str,
    url: &str,
) -> PastPaper {
    PastPaper {
        id,
        title: title.to_string(),
        subject: subject.to_string(),
        difficulty,
        board,
        year,
        season: Season::MayJune,
        paper_number: paper_number.to_string(),
        topics: topics.iter().map(|t| t.to_string()).collect(),
        curriculum_code: curriculum_code.to_string(),
        url: url.to_string(),
        download_url: Some("#".to_string()),
        mark_scheme_url: Some("#".to_string()),
    }
}

fn seed_papers() -> Vec<PastPaper> {
    vec![
        seed_paper(
            1,
            "Paper 1 (2022)",
            "Math",
            Difficulty::Medium,
            ExamBoard::Aqa,
            2022,
            "1",
            &["Algebra", "Geometry"],
            "GCSE-MATH-AQA",
            "https://www.aqa.org.uk/resources/mathematics/gcse/mathematics",
        ),
        seed_paper(
            2,
            "Paper 2 (2022)",
            "Physics",
            Difficulty::Hard,
            ExamBoard::Edexcel,
            2022,
            "2",
            &["Forces", "Energy"],
            "GCSE-PHYS-EDEX",
            "https://qualifications.pearson.com/en/qualifications/edexcel-gcses/physics-2016.html",
        ),
        seed_paper(
            3,
            "Paper 1 (2021)",
            "Chemistry",
            Difficulty::Easy,
            ExamBoard::Ocr,
            2021,
            "1",
            &["Atomic Structure", "Bonding"],
            "GCSE-CHEM-OCR",
            "https://www.ocr.org.uk/qualifications/gcse/chemistry-gateway-j248/",
        ),
        seed_paper(
            4,
            "Paper 3 (2022)",
            "Biology",
            Difficulty::Medium,
            ExamBoard::Aqa,
            2022,
            "3",
            &["Cell Biology", "Genetics"],
            "GCSE-BIO-AQA",
            "https://www.aqa.org.uk/resources/biology/gcse/biology",
        ),
        seed_paper(
            5,
            "Paper 1 (2020)",
            "History",
            Difficulty::Hard,
            ExamBoard::Edexcel,
            2020,
            "1",
            &["Medicine Through Time"],
            "GCSE-HIST-EDEX",
            "https://qualifications.pearson.com/en/qualifications/edexcel-gcses/history-2016.html",
        ),
    ]
}
