//! Persisted state store

pub mod backend;
pub mod repository;

pub use backend::{FileStore, MemoryStore, Store, StoreError};
pub use repository::{LAST_WEEKLY_UPDATE_KEY, STATE_KEY, StateRepository, WEEKLY_QUESTS_KEY};
