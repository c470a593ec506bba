//! Typed access to the persisted keys
//!
//! The repository is the only reader and writer of the store. Every update
//! replaces a whole document; nothing is patched in place.

use serde::Serialize;

use super::backend::{Store, StoreError};
use crate::model::{AppState, ValidationError, WeekStamp, WeeklyQuest, validate_weekly};

/// Key holding the `AppState` document
pub const STATE_KEY: &str = "solo_leveling_state";
/// Key holding the current weekly quest list
pub const WEEKLY_QUESTS_KEY: &str = "weekly_quests";
/// Key holding the `{weekNumber, year}` of the last weekly refresh
pub const LAST_WEEKLY_UPDATE_KEY: &str = "last_weekly_update";

/// Owns a store and exposes typed reads and writes
#[derive(Debug)]
pub struct StateRepository<S: Store> {
    store: S,
}

impl<S: Store> StateRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Borrow the underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Load the app state, falling back to the seed when absent or invalid
    pub fn load_state(&self) -> Result<AppState, StoreError> {
        let Some(json) = self.store.get(STATE_KEY)? else {
            tracing::debug!("No stored state, using seed");
            return Ok(AppState::seed());
        };

        match AppState::from_json(&json) {
            Ok(state) => Ok(state),
            Err(e) => {
                tracing::warn!("Stored state failed validation, resetting to seed: {}", e);
                Ok(AppState::seed())
            }
        }
    }

    /// Replace the stored app state
    pub fn save_state(&mut self, state: &AppState) -> Result<(), StoreError> {
        self.write(STATE_KEY, state)
    }

    /// Read the current state, derive a new one and write it back
    pub fn update_state<F>(&mut self, f: F) -> Result<AppState, StoreError>
    where
        F: FnOnce(&AppState) -> AppState,
    {
        let current = self.load_state()?;
        let next = f(&current);
        if next != current {
            self.save_state(&next)?;
        }
        Ok(next)
    }

    /// Stored weekly quests; `None` when absent or failing validation
    pub fn load_weekly_quests(&self) -> Result<Option<Vec<WeeklyQuest>>, StoreError> {
        let Some(json) = self.store.get(WEEKLY_QUESTS_KEY)? else {
            return Ok(None);
        };

        match parse_weekly(&json) {
            Ok(quests) => Ok(Some(quests)),
            Err(e) => {
                tracing::warn!("Stored weekly quests failed validation: {}", e);
                Ok(None)
            }
        }
    }

    /// Replace the stored weekly quest list
    pub fn save_weekly_quests(&mut self, quests: &[WeeklyQuest]) -> Result<(), StoreError> {
        self.write(WEEKLY_QUESTS_KEY, &quests)
    }

    /// Marker of the last weekly refresh, `{0, 0}` when never refreshed
    pub fn last_weekly_update(&self) -> Result<WeekStamp, StoreError> {
        let Some(json) = self.store.get(LAST_WEEKLY_UPDATE_KEY)? else {
            return Ok(WeekStamp::default());
        };

        Ok(serde_json::from_str(&json).unwrap_or_else(|e| {
            tracing::warn!("Ignoring malformed {}: {}", LAST_WEEKLY_UPDATE_KEY, e);
            WeekStamp::default()
        }))
    }

    /// Record the marker of a weekly refresh
    pub fn set_last_weekly_update(&mut self, stamp: WeekStamp) -> Result<(), StoreError> {
        self.write(LAST_WEEKLY_UPDATE_KEY, &stamp)
    }

    /// Drop every persisted key
    pub fn reset(&mut self) -> Result<(), StoreError> {
        for key in [STATE_KEY, WEEKLY_QUESTS_KEY, LAST_WEEKLY_UPDATE_KEY] {
            self.store.remove(key)?;
        }
        Ok(())
    }

    fn write<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(value)
            .map_err(|source| StoreError::Serialize { key: key.to_string(), source })?;
        self.store.set(key, &json)
    }
}

fn parse_weekly(json: &str) -> Result<Vec<WeeklyQuest>, ValidationError> {
    let quests: Vec<WeeklyQuest> = serde_json::from_str(json)?;
    validate_weekly(&quests)?;
    Ok(quests)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Quest;
    use crate::store::MemoryStore;
    use pretty_assertions::assert_eq;

    fn repo() -> StateRepository<MemoryStore> {
        StateRepository::new(MemoryStore::new())
    }

    #[test]
    fn missing_state_loads_seed() {
        assert_eq!(repo().load_state().unwrap(), AppState::seed());
    }

    #[test]
    fn saved_state_round_trips() {
        let mut repo = repo();
        let mut state = AppState::seed();
        state.quests.push(Quest::new(6, "Practice past paper", 40));
        repo.save_state(&state).unwrap();
        assert_eq!(repo.load_state().unwrap(), state);
    }

    #[test]
    fn corrupt_state_falls_back_to_seed() {
        let mut store = MemoryStore::new();
        store.set(STATE_KEY, r#"{"xp":{"Math":1}}"#).unwrap();
        let repo = StateRepository::new(store);
        assert_eq!(repo.load_state().unwrap(), AppState::seed());
    }

    #[test]
    fn update_state_replaces_whole_document() {
        let mut repo = repo();
        let next = repo
            .update_state(|s| AppState { study_streak: vec![3], ..s.clone() })
            .unwrap();
        assert_eq!(next.study_streak, vec![3]);
        assert_eq!(repo.load_state().unwrap().study_streak, vec![3]);
    }

    #[test]
    fn last_weekly_update_defaults_to_zero() {
        assert_eq!(repo().last_weekly_update().unwrap(), WeekStamp::new(0, 0));
    }

    #[test]
    fn last_weekly_update_is_stored_as_camel_case() {
        let mut repo = repo();
        repo.set_last_weekly_update(WeekStamp::new(6, 2024)).unwrap();
        let raw = repo.store().get(LAST_WEEKLY_UPDATE_KEY).unwrap().unwrap();
        assert!(raw.contains("\"weekNumber\": 6"));
        assert_eq!(repo.last_weekly_update().unwrap(), WeekStamp::new(6, 2024));
    }

    #[test]
    fn malformed_weekly_quests_read_as_absent() {
        let mut store = MemoryStore::new();
        store.set(WEEKLY_QUESTS_KEY, "not json").unwrap();
        let repo = StateRepository::new(store);
        assert_eq!(repo.load_weekly_quests().unwrap(), None);
    }

    #[test]
    fn reset_clears_everything() {
        let mut repo = repo();
        repo.save_state(&AppState::seed()).unwrap();
        repo.set_last_weekly_update(WeekStamp::new(1, 2025)).unwrap();
        repo.reset().unwrap();
        assert_eq!(repo.store().get(STATE_KEY).unwrap(), None);
        assert_eq!(repo.last_weekly_update().unwrap(), WeekStamp::default());
    }
}
