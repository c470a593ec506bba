//! Solo Leveling - a gamified GCSE study tracker
//!
//! Subject XP, daily and weekly quests, past-paper browsing and an AI
//! study advisor that falls back to local content whenever it cannot
//! reach a model.

pub mod advisor;
pub mod app;
pub mod catalog;
pub mod claude;
pub mod config;
pub mod ledger;
pub mod model;
pub mod quests;
pub mod store;
pub mod vault;

pub use app::App;
pub use config::Config;
