//! Session-start weekly refresh
//!
//! Compares the stored `last_weekly_update` marker against the current week
//! and regenerates the weekly list on rollover. Two sessions racing over a
//! rollover both regenerate and the last write wins; the generated lists are
//! identical, so nothing but completion flags can be lost.

use super::calendar::{Clock, current_week};
use super::generator::quests_for_week;
use crate::model::WeekStamp;
use crate::store::{StateRepository, Store, StoreError};

/// What the reconciler did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconciliation {
    /// Stored quests already belong to this week
    Fresh(WeekStamp),
    /// A new list was generated and stored
    Regenerated {
        /// Marker found in the store
        previous: WeekStamp,
        /// Marker written
        current: WeekStamp,
    },
}

impl Reconciliation {
    pub fn regenerated(&self) -> bool {
        matches!(self, Self::Regenerated { .. })
    }

    /// The week the stored quests now belong to
    pub fn week(&self) -> WeekStamp {
        match self {
            Self::Fresh(week) => *week,
            Self::Regenerated { current, .. } => *current,
        }
    }
}

/// Refresh weekly quests if the stored marker is stale
///
/// A missing or unreadable quest list is also regenerated, even within the
/// same week.
pub fn reconcile<S: Store>(
    repo: &mut StateRepository<S>,
    clock: &impl Clock,
) -> Result<Reconciliation, StoreError> {
    let previous = repo.last_weekly_update()?;
    let current = current_week(clock);

    if previous == current && repo.load_weekly_quests()?.is_some() {
        tracing::debug!("Weekly quests are current for {}", current);
        return Ok(Reconciliation::Fresh(current));
    }

    let quests = quests_for_week(current);
    repo.save_weekly_quests(&quests)?;
    repo.set_last_weekly_update(current)?;

    tracing::info!("Generated {} weekly quests for {} (was {})", quests.len(), current, previous);
    Ok(Reconciliation::Regenerated { previous, current })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quests::calendar::FixedClock;
    use crate::store::MemoryStore;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn clock(y: i32, m: u32, d: u32) -> FixedClock {
        FixedClock(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    fn repo_at(stamp: WeekStamp) -> StateRepository<MemoryStore> {
        let mut repo = StateRepository::new(MemoryStore::new());
        repo.save_weekly_quests(&quests_for_week(stamp)).unwrap();
        repo.set_last_weekly_update(stamp).unwrap();
        repo
    }

    #[test]
    fn first_session_always_generates() {
        let mut repo = StateRepository::new(MemoryStore::new());
        let outcome = reconcile(&mut repo, &clock(2024, 1, 30)).unwrap();
        assert_eq!(
            outcome,
            Reconciliation::Regenerated {
                previous: WeekStamp::new(0, 0),
                current: WeekStamp::new(5, 2024)
            }
        );
        assert_eq!(repo.load_weekly_quests().unwrap().unwrap().len(), 3);
    }

    #[test]
    fn week_rollover_regenerates_and_moves_marker() {
        let mut repo = repo_at(WeekStamp::new(5, 2024));
        let outcome = reconcile(&mut repo, &clock(2024, 2, 6)).unwrap();
        assert!(outcome.regenerated());
        assert_eq!(repo.last_weekly_update().unwrap(), WeekStamp::new(6, 2024));
        let quests = repo.load_weekly_quests().unwrap().unwrap();
        assert!(quests.iter().all(|q| q.week_number == 6 && q.year == 2024));
    }

    #[test]
    fn same_week_keeps_stored_progress() {
        let mut repo = repo_at(WeekStamp::new(5, 2024));
        let mut quests = repo.load_weekly_quests().unwrap().unwrap();
        quests[0].completed = true;
        repo.save_weekly_quests(&quests).unwrap();

        let outcome = reconcile(&mut repo, &clock(2024, 1, 30)).unwrap();
        assert_eq!(outcome, Reconciliation::Fresh(WeekStamp::new(5, 2024)));
        assert!(repo.load_weekly_quests().unwrap().unwrap()[0].completed);
        assert_eq!(repo.last_weekly_update().unwrap(), WeekStamp::new(5, 2024));
    }

    #[test]
    fn rollover_does_not_carry_completion() {
        let mut repo = repo_at(WeekStamp::new(5, 2024));
        let mut quests = repo.load_weekly_quests().unwrap().unwrap();
        quests.iter_mut().for_each(|q| q.completed = true);
        repo.save_weekly_quests(&quests).unwrap();

        reconcile(&mut repo, &clock(2024, 2, 6)).unwrap();
        assert!(repo.load_weekly_quests().unwrap().unwrap().iter().all(|q| !q.completed));
    }

    #[test]
    fn same_week_number_in_a_new_year_regenerates() {
        let mut repo = repo_at(WeekStamp::new(5, 2024));
        // 2025-01-28 is also week 5
        let outcome = reconcile(&mut repo, &clock(2025, 1, 28)).unwrap();
        assert_eq!(outcome.week(), WeekStamp::new(5, 2025));
        assert!(outcome.regenerated());
    }
}
