//! XP ledger
//!
//! Every operation takes the current state by reference and returns a new
//! value; callers persist the result as a whole. Unknown ids are silent
//! no-ops and completion is idempotent.

pub mod summary;

use crate::advisor::AiQuest;
use crate::model::{AppState, Quest, Subject, WeeklyQuest};

pub use summary::{Overview, WeeklyProgress};

/// Result of completing a weekly quest
#[derive(Debug, Clone, PartialEq)]
pub struct WeeklyCompletion {
    pub state: AppState,
    pub weekly: Vec<WeeklyQuest>,
    /// Bucket and amount credited, if any
    pub awarded: Option<(Subject, u32)>,
}

/// Mark a daily quest completed
pub fn complete_quest(state: &AppState, quest_id: u64) -> AppState {
    let quests = state
        .quests
        .iter()
        .map(|quest| {
            if quest.id == quest_id && !quest.completed {
                tracing::debug!("Completed daily quest {} ({})", quest.id, quest.title);
                Quest { completed: true, ..quest.clone() }
            } else {
                quest.clone()
            }
        })
        .collect();

    AppState { quests, ..state.clone() }
}

/// Mark a weekly quest completed and credit its XP to the mapped subject
///
/// XP is credited once, on the transition to completed. Quests whose subject
/// has no bucket are completed without any XP change.
pub fn complete_weekly_quest(
    state: &AppState,
    weekly: &[WeeklyQuest],
    quest_id: u64,
) -> WeeklyCompletion {
    let target = weekly.iter().find(|q| q.id == quest_id && !q.completed);

    let Some(target) = target else {
        return WeeklyCompletion { state: state.clone(), weekly: weekly.to_vec(), awarded: None };
    };

    let awarded = match Subject::for_curriculum(&target.subject) {
        Some(subject) => Some((subject, target.xp)),
        None => {
            tracing::warn!("No XP bucket for subject {:?}; quest {} awards nothing", target.subject, target.id);
            None
        }
    };

    let next_weekly = weekly
        .iter()
        .map(|q| if q.id == quest_id { WeeklyQuest { completed: true, ..q.clone() } } else { q.clone() })
        .collect();

    let next_state = match awarded {
        Some((subject, xp)) => AppState { xp: state.xp.with_added(subject, xp), ..state.clone() },
        None => state.clone(),
    };

    WeeklyCompletion { state: next_state, weekly: next_weekly, awarded }
}

/// XP actually credited for `amount` under a multiplier (half away from zero)
pub fn scaled_xp(amount: u32, multiplier: f64) -> u32 {
    // `as` saturates at the u32 bounds
    (f64::from(amount) * multiplier).round() as u32
}

/// Add `round(amount * xp_multiplier)` to a subject
pub fn add_xp(state: &AppState, subject: Subject, amount: u32) -> AppState {
    let gained = scaled_xp(amount, state.settings.xp_multiplier);
    AppState { xp: state.xp.with_added(subject, gained), ..state.clone() }
}

/// Accept an AI quest batch: drop completed daily quests, keep the rest and
/// append the batch with fresh ids
pub fn accept_ai_quests(state: &AppState, batch: &[AiQuest]) -> AppState {
    let mut quests: Vec<Quest> = state.quests.iter().filter(|q| !q.completed).cloned().collect();
    let next_id = state.quests.iter().map(|q| q.id).max().unwrap_or(0) + 1;

    quests.extend(batch.iter().enumerate().map(|(i, ai)| Quest {
        id: next_id + i as u64,
        title: ai.title.clone(),
        xp: ai.xp,
        completed: false,
        subject: Some(ai.subject.clone()),
        difficulty: Some(ai.difficulty),
        description: Some(ai.description.clone()),
        estimated_time: Some(ai.estimated_time.clone()),
    }));

    AppState { quests, ..state.clone() }
}

/// Record a study day in the streak calendar (kept sorted, no duplicates)
pub fn record_study_day(state: &AppState, day: u32) -> AppState {
    let mut study_streak = state.study_streak.clone();
    if let Err(pos) = study_streak.binary_search(&day) {
        study_streak.insert(pos, day);
    }
    AppState { study_streak, ..state.clone() }
}
