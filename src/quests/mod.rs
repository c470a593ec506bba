//! Weekly quest generation and refresh

pub mod calendar;
pub mod generator;
pub mod reconcile;
pub mod templates;

pub use calendar::{Clock, FixedClock, SystemClock, current_week, week_of};
pub use generator::{generate_weekly_quests, quest_id, quests_for_week, template_block};
pub use reconcile::{Reconciliation, reconcile};
