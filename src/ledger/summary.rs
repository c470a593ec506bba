//! Read-only dashboard figures

use crate::model::{AppState, Subject, WeekStamp, WeeklyQuest};

/// Headline numbers for the daily dashboard
#[derive(Debug, Clone, PartialEq)]
pub struct Overview {
    pub total_xp: u64,
    pub max_xp: u32,
    pub weakest: Subject,
    pub completed_quests: usize,
    pub total_quests: usize,
    pub streak_days: usize,
}

impl Overview {
    pub fn of(state: &AppState) -> Self {
        Self {
            total_xp: state.xp.total(),
            max_xp: state.xp.max(),
            weakest: state.xp.weakest(),
            completed_quests: state.completed_quest_count(),
            total_quests: state.quests.len(),
            streak_days: state.study_streak.len(),
        }
    }
}

/// Progress through the current weekly challenges
#[derive(Debug, Clone, PartialEq)]
pub struct WeeklyProgress {
    /// `None` when there are no weekly quests
    pub week: Option<WeekStamp>,
    pub completed: usize,
    pub total: usize,
    pub earned_xp: u32,
    pub potential_xp: u32,
}

impl WeeklyProgress {
    pub fn of(quests: &[WeeklyQuest]) -> Self {
        Self {
            week: quests.first().map(|q| WeekStamp::new(q.week_number, q.year)),
            completed: quests.iter().filter(|q| q.completed).count(),
            total: quests.len(),
            earned_xp: quests.iter().filter(|q| q.completed).map(|q| q.xp).sum(),
            potential_xp: quests.iter().map(|q| q.xp).sum(),
        }
    }

    /// Percentage complete (0-100)
    pub fn percent(&self) -> f64 {
        if self.total == 0 { 0.0 } else { self.completed as f64 / self.total as f64 * 100.0 }
    }

    /// Header label such as "Week 6, 2024"
    pub fn label(&self) -> String {
        self.week.map(|w| w.to_string()).unwrap_or_else(|| "Week -".to_string())
    }
}
