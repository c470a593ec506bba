//! Daily and weekly quests

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Quest or paper difficulty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Self::Easy, Self::Medium, Self::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            _ => Err(format!("Unknown difficulty: {}. Options: Easy, Medium, Hard", s)),
        }
    }
}

/// A daily quest
///
/// Completion is monotonic: the ledger only ever flips `completed` from
/// `false` to `true`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quest {
    /// Identifier, unique within the daily list
    pub id: u64,
    /// Short title
    pub title: String,
    /// XP reward
    pub xp: u32,
    /// Has the quest been completed?
    pub completed: bool,
    /// Subject the quest targets (AI-sourced quests carry one)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    /// Difficulty rating
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    /// Longer description of what to do
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Time estimate such as "25 minutes"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_time: Option<String>,
}

impl Quest {
    /// Create a plain quest with only the required fields
    pub fn new(id: u64, title: impl Into<String>, xp: u32) -> Self {
        Self {
            id,
            title: title.into(),
            xp,
            completed: false,
            subject: None,
            difficulty: None,
            description: None,
            estimated_time: None,
        }
    }

    /// Builder: mark as already completed
    pub fn completed(mut self) -> Self {
        self.completed = true;
        self
    }
}

/// A weekly challenge bound to one `(week_number, year)` pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyQuest {
    /// `week_number * 1000 + year + template_index`
    pub id: u64,
    pub title: String,
    pub description: String,
    pub xp: u32,
    pub completed: bool,
    /// Curriculum subject name (e.g. "Mathematics")
    pub subject: String,
    pub topics: Vec<String>,
    pub difficulty: Difficulty,
    pub estimated_time: String,
    pub week_number: u32,
    pub year: i32,
    pub resources: Vec<String>,
    pub tips: Vec<String>,
    pub requirements: Vec<String>,
}

/// The `{weekNumber, year}` marker recorded after each weekly refresh
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekStamp {
    pub week_number: u32,
    pub year: i32,
}

impl WeekStamp {
    pub fn new(week_number: u32, year: i32) -> Self {
        Self { week_number, year }
    }
}

impl fmt::Display for WeekStamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Week {}, {}", self.week_number, self.year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn daily_quest_accepts_minimal_shape() {
        let json = r#"{"id":1,"title":"Complete a practice quiz","xp":25,"completed":false}"#;
        let quest: Quest = serde_json::from_str(json).unwrap();
        assert_eq!(quest, Quest::new(1, "Complete a practice quiz", 25));
    }

    #[test]
    fn daily_quest_omits_absent_metadata() {
        let json = serde_json::to_string(&Quest::new(7, "Read notes", 10)).unwrap();
        assert!(!json.contains("subject"));
        assert!(!json.contains("estimatedTime"));
    }

    #[test]
    fn week_stamp_uses_camel_case() {
        let json = serde_json::to_string(&WeekStamp::new(5, 2024)).unwrap();
        assert_eq!(json, r#"{"weekNumber":5,"year":2024}"#);
        assert_eq!(WeekStamp::new(5, 2024).to_string(), "Week 5, 2024");
    }

    #[test]
    fn difficulty_parses_case_insensitively() {
        assert_eq!("hard".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert!("brutal".parse::<Difficulty>().is_err());
    }
}
