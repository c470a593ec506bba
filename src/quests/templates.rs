//! GCSE curriculum-aligned weekly quest templates

use crate::model::Difficulty;

/// One weekly challenge before it is bound to a week
#[derive(Debug, Clone, Copy)]
pub struct QuestTemplate {
    pub subject: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub topics: &'static [&'static str],
    pub difficulty: Difficulty,
    pub xp: u32,
    pub estimated_time: &'static str,
    pub resources: &'static [&'static str],
    pub tips: &'static [&'static str],
    pub requirements: &'static [&'static str],
}

/// Templates used for an inclusive range of week numbers
#[derive(Debug, Clone, Copy)]
pub struct TemplateBlock {
    pub first_week: u32,
    pub last_week: u32,
    pub quests: &'static [QuestTemplate],
}

impl TemplateBlock {
    pub fn covers(&self, week_number: u32) -> bool {
        (self.first_week..=self.last_week).contains(&week_number)
    }
}

/// The curriculum table. No block covers weeks 25 onward; the generator
/// falls back to the first block for those.
pub static CURRICULUM: &[TemplateBlock] = &[
    // Foundation building
    TemplateBlock {
        first_week: 1,
        last_week: 8,
        quests: &[
            QuestTemplate {
                subject: "Mathematics",
                title: "Master Algebraic Fundamentals",
                description: "Complete comprehensive practice on algebraic expressions, equations, and basic graph interpretation",
                topics: &["Algebraic expressions", "Linear equations", "Coordinate geometry"],
                difficulty: Difficulty::Medium,
                xp: 100,
                estimated_time: "4-5 hours",
                resources: &["Edexcel GCSE Mathematics textbook Ch. 1-3", "BBC Bitesize Algebra"],
                tips: &["Start with simple equations", "Practice substitution daily", "Use visual aids for graphs"],
                requirements: &["Complete 20 algebraic problems", "Solve 5 linear equations", "Plot 3 coordinate graphs"],
            },
            QuestTemplate {
                subject: "English Language",
                title: "Creative Writing Mastery",
                description: "Develop descriptive writing skills with focus on narrative techniques and character development",
                topics: &["Descriptive writing", "Narrative structure", "Character development"],
                difficulty: Difficulty::Medium,
                xp: 80,
                estimated_time: "3-4 hours",
                resources: &["AQA English Language Paper 1 examples", "Writing techniques guide"],
                tips: &["Use sensory details", "Show don't tell", "Vary sentence structure"],
                requirements: &["Write 2 descriptive pieces", "Practice dialogue writing", "Complete character profiles"],
            },
            QuestTemplate {
                subject: "Physics",
                title: "Forces and Motion Foundations",
                description: "Build understanding of fundamental physics concepts including Newton's laws and motion calculations",
                topics: &["Forces", "Motion", "Velocity", "Acceleration"],
                difficulty: Difficulty::Medium,
                xp: 90,
                estimated_time: "4 hours",
                resources: &["AQA GCSE Physics textbook Ch. 5", "Physics & Maths Tutor worksheets"],
                tips: &["Draw force diagrams", "Practice unit conversions", "Use real-world examples"],
                requirements: &["Solve 15 motion problems", "Draw 5 force diagrams", "Complete velocity calculations"],
            },
        ],
    },
    // Intermediate development
    TemplateBlock {
        first_week: 9,
        last_week: 16,
        quests: &[
            QuestTemplate {
                subject: "Chemistry",
                title: "Chemical Reactions Deep Dive",
                description: "Explore different types of chemical reactions, balancing equations, and reaction mechanisms",
                topics: &["Chemical equations", "Reaction types", "Conservation of mass"],
                difficulty: Difficulty::Hard,
                xp: 120,
                estimated_time: "5-6 hours",
                resources: &["Combined Science AQA textbook", "Save My Exams Chemistry notes"],
                tips: &["Balance equations systematically", "Learn common ion formulas", "Practice with past papers"],
                requirements: &["Balance 25 equations", "Identify 10 reaction types", "Complete mass calculations"],
            },
            QuestTemplate {
                subject: "Biology",
                title: "Cell Biology Specialist",
                description: "Master cellular processes, mitosis, and genetic fundamentals for GCSE success",
                topics: &["Cell structure", "Mitosis", "DNA", "Genetic inheritance"],
                difficulty: Difficulty::Medium,
                xp: 95,
                estimated_time: "4-5 hours",
                resources: &["AQA Biology textbook Ch. 2-4", "Interactive cell diagrams"],
                tips: &["Use mnemonics for cell parts", "Draw detailed diagrams", "Practice genetic crosses"],
                requirements: &["Label cell diagrams", "Explain mitosis stages", "Complete genetics problems"],
            },
            QuestTemplate {
                subject: "French",
                title: "Conversational French Excellence",
                description: "Develop speaking and listening skills with focus on common GCSE conversation topics",
                topics: &["Family and relationships", "Daily routine", "Food and drink"],
                difficulty: Difficulty::Medium,
                xp: 85,
                estimated_time: "4 hours",
                resources: &["AQA French speaking cards", "Language learning apps", "Audio resources"],
                tips: &["Practice pronunciation daily", "Record yourself speaking", "Learn key phrases by heart"],
                requirements: &["Record 5 speaking exercises", "Learn 50 new vocabulary words", "Practice conversation topics"],
            },
        ],
    },
    // Advanced application
    TemplateBlock {
        first_week: 17,
        last_week: 24,
        quests: &[
            QuestTemplate {
                subject: "Business Studies",
                title: "Entrepreneurship Project",
                description: "Design a complete business plan incorporating marketing, finance, and operational strategies",
                topics: &["Business planning", "Marketing mix", "Financial planning", "Operations"],
                difficulty: Difficulty::Hard,
                xp: 150,
                estimated_time: "6-7 hours",
                resources: &["AQA Business Studies textbook", "Real business case studies", "Financial planning templates"],
                tips: &["Research real businesses", "Use SWOT analysis", "Include realistic financial projections"],
                requirements: &["Complete business plan", "Design marketing strategy", "Create financial forecasts"],
            },
            QuestTemplate {
                subject: "Computer Science",
                title: "Programming Mastery Challenge",
                description: "Develop algorithmic thinking through practical programming projects and problem-solving",
                topics: &["Algorithms", "Data structures", "Programming logic", "Testing"],
                difficulty: Difficulty::Hard,
                xp: 130,
                estimated_time: "5-6 hours",
                resources: &["AQA Computer Science textbook", "Programming environments", "Algorithm visualizations"],
                tips: &["Plan before coding", "Test thoroughly", "Comment your code clearly"],
                requirements: &["Write 3 programs", "Solve algorithm challenges", "Complete debugging exercises"],
            },
            QuestTemplate {
                subject: "Physical Education",
                title: "Sports Performance Analysis",
                description: "Analyze athletic performance using scientific principles of training and biomechanics",
                topics: &["Training principles", "Sports psychology", "Biomechanics", "Performance analysis"],
                difficulty: Difficulty::Medium,
                xp: 75,
                estimated_time: "3-4 hours",
                resources: &["AQA PE textbook", "Performance analysis videos", "Training plan templates"],
                tips: &["Use real sports examples", "Apply FITT principles", "Consider individual differences"],
                requirements: &["Design training program", "Analyze movement patterns", "Complete fitness assessments"],
            },
        ],
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Subject;

    #[test]
    fn blocks_do_not_overlap() {
        for (i, a) in CURRICULUM.iter().enumerate() {
            for b in &CURRICULUM[i + 1..] {
                assert!(a.last_week < b.first_week);
            }
        }
    }

    #[test]
    fn every_template_subject_has_a_bucket() {
        for block in CURRICULUM {
            for quest in block.quests {
                assert!(
                    Subject::for_curriculum(quest.subject).is_some(),
                    "no XP bucket for {}",
                    quest.subject
                );
                assert!(quest.xp > 0);
            }
        }
    }
}
