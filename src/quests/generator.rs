//! Weekly quest generation

use super::calendar::{Clock, current_week};
use super::templates::{CURRICULUM, QuestTemplate, TemplateBlock};
use crate::model::{WeekStamp, WeeklyQuest};

/// Block for a week number. Weeks past the last configured range use the
/// first block.
pub fn template_block(week_number: u32) -> &'static TemplateBlock {
    CURRICULUM.iter().find(|block| block.covers(week_number)).unwrap_or(&CURRICULUM[0])
}

/// Deterministic quest id: `week_number * 1000 + year + index`
pub fn quest_id(stamp: WeekStamp, index: usize) -> u64 {
    u64::from(stamp.week_number) * 1000 + u64::from(stamp.year.unsigned_abs()) + index as u64
}

/// Bind the week's templates to `stamp`, in template order
pub fn quests_for_week(stamp: WeekStamp) -> Vec<WeeklyQuest> {
    template_block(stamp.week_number)
        .quests
        .iter()
        .enumerate()
        .map(|(index, template)| instantiate(template, stamp, index))
        .collect()
}

/// Weekly quests for the clock's current week
pub fn generate_weekly_quests(clock: &impl Clock) -> Vec<WeeklyQuest> {
    quests_for_week(current_week(clock))
}

fn instantiate(template: &QuestTemplate, stamp: WeekStamp, index: usize) -> WeeklyQuest {
    let owned = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();

    WeeklyQuest {
        id: quest_id(stamp, index),
        title: template.title.to_string(),
        description: template.description.to_string(),
        xp: template.xp,
        completed: false,
        subject: template.subject.to_string(),
        topics: owned(template.topics),
        difficulty: template.difficulty,
        estimated_time: template.estimated_time.to_string(),
        week_number: stamp.week_number,
        year: stamp.year,
        resources: owned(template.resources),
        tips: owned(template.tips),
        requirements: owned(template.requirements),
    }
}
