//! Simulated auto-marking

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Questions in a simulated paper
pub const QUESTIONS: u32 = 10;

/// Chance that any one question is answered correctly
pub const CORRECT_PROBABILITY: f64 = 0.6;

/// Outcome of marking one paper
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkResult {
    /// Percentage, 0-100
    pub score: u32,
    pub feedback: String,
    pub correct: u32,
    pub total: u32,
}

/// One line of the mark log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkLogEntry {
    pub time: DateTime<Utc>,
    pub paper_id: u32,
    pub result: MarkResult,
}

pub fn feedback_for(score: u32) -> &'static str {
    if score > 75 {
        "Great work, strong understanding!"
    } else if score > 50 {
        "Good. Revise weak areas."
    } else {
        "Focus on fundamentals."
    }
}

/// Mark a paper by drawing each answer at random
pub fn simulate(rng: &mut impl Rng) -> MarkResult {
    let correct = (0..QUESTIONS).filter(|_| rng.gen_bool(CORRECT_PROBABILITY)).count() as u32;
    let score = (f64::from(correct) / f64::from(QUESTIONS) * 100.0).round() as u32;
    MarkResult { score, feedback: feedback_for(score).to_string(), correct, total: QUESTIONS }
}
