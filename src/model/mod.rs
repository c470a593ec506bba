//! Data model for persisted study progress

pub mod paper;
pub mod quest;
pub mod state;
pub mod subject;

pub use paper::{ExamBoard, PastPaper, Resource, ResourceKind, ResourceLevel, Season};
pub use quest::{Difficulty, Quest, WeekStamp, WeeklyQuest};
pub use state::{AppState, Settings, ValidationError, validate_weekly};
pub use subject::{Subject, SubjectXp};
