//! Subjects and per-subject XP buckets

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The closed set of subjects that own an XP bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Subject {
    Math,
    Physics,
    Chemistry,
    Biology,
    History,
    English,
    French,
    Business,
    ComputerScience,
    PhysicalEducation,
}

impl Subject {
    /// Every subject, in bucket declaration order
    pub const ALL: [Subject; 10] = [
        Self::Math,
        Self::Physics,
        Self::Chemistry,
        Self::Biology,
        Self::History,
        Self::English,
        Self::French,
        Self::Business,
        Self::ComputerScience,
        Self::PhysicalEducation,
    ];

    /// Key used in persisted JSON and AI payloads
    pub fn key(&self) -> &'static str {
        match self {
            Self::Math => "Math",
            Self::Physics => "Physics",
            Self::Chemistry => "Chemistry",
            Self::Biology => "Biology",
            Self::History => "History",
            Self::English => "English",
            Self::French => "French",
            Self::Business => "Business",
            Self::ComputerScience => "ComputerScience",
            Self::PhysicalEducation => "PhysicalEducation",
        }
    }

    /// Human-readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::ComputerScience => "Computer Science",
            Self::PhysicalEducation => "Physical Education",
            other => other.key(),
        }
    }

    /// Resolve a curriculum subject name (as used by weekly quest templates)
    /// to the bucket that receives its XP.
    pub fn for_curriculum(name: &str) -> Option<Self> {
        CURRICULUM_SUBJECTS.iter().find(|(curriculum, _)| *curriculum == name).map(|(_, s)| *s)
    }
}

/// Weekly quest subject -> XP bucket. One bucket per curriculum subject.
const CURRICULUM_SUBJECTS: &[(&str, Subject)] = &[
    ("Mathematics", Subject::Math),
    ("English Language", Subject::English),
    ("Physics", Subject::Physics),
    ("Chemistry", Subject::Chemistry),
    ("Biology", Subject::Biology),
    ("French", Subject::French),
    ("Business Studies", Subject::Business),
    ("Computer Science", Subject::ComputerScience),
    ("Physical Education", Subject::PhysicalEducation),
    ("History", Subject::History),
];

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Subject {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String =
            s.chars().filter(|c| c.is_alphanumeric()).collect::<String>().to_lowercase();
        match normalized.as_str() {
            "math" | "maths" | "mathematics" => Ok(Self::Math),
            "physics" => Ok(Self::Physics),
            "chemistry" => Ok(Self::Chemistry),
            "biology" => Ok(Self::Biology),
            "history" => Ok(Self::History),
            "english" | "englishlanguage" => Ok(Self::English),
            "french" => Ok(Self::French),
            "business" | "businessstudies" => Ok(Self::Business),
            "computerscience" | "cs" => Ok(Self::ComputerScience),
            "physicaleducation" | "pe" => Ok(Self::PhysicalEducation),
            _ => Err(format!(
                "Unknown subject: {}. Options: {}",
                s,
                Self::ALL.iter().map(|s| s.key()).collect::<Vec<_>>().join(", ")
            )),
        }
    }
}

/// XP per subject
///
/// Every bucket is a required field and unknown keys are rejected, so a
/// persisted value either has exactly this shape or fails to load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SubjectXp {
    #[serde(rename = "Math")]
    pub math: u32,
    #[serde(rename = "Physics")]
    pub physics: u32,
    #[serde(rename = "Chemistry")]
    pub chemistry: u32,
    #[serde(rename = "Biology")]
    pub biology: u32,
    #[serde(rename = "History")]
    pub history: u32,
    #[serde(rename = "English")]
    pub english: u32,
    #[serde(rename = "French")]
    pub french: u32,
    #[serde(rename = "Business")]
    pub business: u32,
    #[serde(rename = "ComputerScience")]
    pub computer_science: u32,
    #[serde(rename = "PhysicalEducation")]
    pub physical_education: u32,
}

impl SubjectXp {
    /// XP held by a subject
    pub fn get(&self, subject: Subject) -> u32 {
        match subject {
            Subject::Math => self.math,
            Subject::Physics => self.physics,
            Subject::Chemistry => self.chemistry,
            Subject::Biology => self.biology,
            Subject::History => self.history,
            Subject::English => self.english,
            Subject::French => self.french,
            Subject::Business => self.business,
            Subject::ComputerScience => self.computer_science,
            Subject::PhysicalEducation => self.physical_education,
        }
    }

    fn slot_mut(&mut self, subject: Subject) -> &mut u32 {
        match subject {
            Subject::Math => &mut self.math,
            Subject::Physics => &mut self.physics,
            Subject::Chemistry => &mut self.chemistry,
            Subject::Biology => &mut self.biology,
            Subject::History => &mut self.history,
            Subject::English => &mut self.english,
            Subject::French => &mut self.french,
            Subject::Business => &mut self.business,
            Subject::ComputerScience => &mut self.computer_science,
            Subject::PhysicalEducation => &mut self.physical_education,
        }
    }

    /// Copy of this map with `amount` added to one bucket (saturating)
    pub fn with_added(&self, subject: Subject, amount: u32) -> Self {
        let mut next = self.clone();
        let slot = next.slot_mut(subject);
        *slot = slot.saturating_add(amount);
        next
    }

    /// Buckets in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (Subject, u32)> + '_ {
        Subject::ALL.iter().map(move |s| (*s, self.get(*s)))
    }

    /// Sum across all buckets
    pub fn total(&self) -> u64 {
        self.iter().map(|(_, xp)| u64::from(xp)).sum()
    }

    /// Highest bucket value
    pub fn max(&self) -> u32 {
        self.iter().map(|(_, xp)| xp).max().unwrap_or(0)
    }

    /// Subjects sorted ascending by XP; ties keep declaration order
    pub fn ascending(&self) -> Vec<(Subject, u32)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_by_key(|(_, xp)| *xp);
        entries
    }

    /// The lowest-XP subject (first in declaration order on ties)
    pub fn weakest(&self) -> Subject {
        self.ascending().first().map(|(s, _)| *s).unwrap_or(Subject::Math)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn curriculum_mapping_is_total_for_templates() {
        assert_eq!(Subject::for_curriculum("Mathematics"), Some(Subject::Math));
        assert_eq!(Subject::for_curriculum("English Language"), Some(Subject::English));
        assert_eq!(Subject::for_curriculum("Business Studies"), Some(Subject::Business));
        assert_eq!(Subject::for_curriculum("Physical Education"), Some(Subject::PhysicalEducation));
        assert_eq!(Subject::for_curriculum("Geography"), None);
    }

    #[test]
    fn parse_subject_aliases() {
        assert_eq!("maths".parse::<Subject>(), Ok(Subject::Math));
        assert_eq!("Computer Science".parse::<Subject>(), Ok(Subject::ComputerScience));
        assert_eq!("PE".parse::<Subject>(), Ok(Subject::PhysicalEducation));
        assert!("astrology".parse::<Subject>().is_err());
    }

    #[test]
    fn missing_bucket_is_rejected() {
        let json = r#"{"Math":1,"Physics":2}"#;
        assert!(serde_json::from_str::<SubjectXp>(json).is_err());
    }

    #[test]
    fn unknown_bucket_is_rejected() {
        let mut value = serde_json::to_value(SubjectXp::default()).unwrap();
        value["Geography"] = serde_json::json!(10);
        assert!(serde_json::from_value::<SubjectXp>(value).is_err());
    }

    #[test]
    fn negative_xp_is_rejected() {
        let mut value = serde_json::to_value(SubjectXp::default()).unwrap();
        value["Math"] = serde_json::json!(-5);
        assert!(serde_json::from_value::<SubjectXp>(value).is_err());
    }

    #[test]
    fn weakest_prefers_declaration_order_on_ties() {
        let xp = SubjectXp { math: 10, physics: 10, ..Default::default() }
            .with_added(Subject::Chemistry, 3);
        // Every other bucket is 0; Biology is the first zero after the non-zero ones
        assert_eq!(xp.weakest(), Subject::Biology);
    }

    #[test]
    fn with_added_leaves_original_untouched() {
        let xp = SubjectXp::default();
        let next = xp.with_added(Subject::French, 40);
        assert_eq!(xp.french, 0);
        assert_eq!(next.french, 40);
        assert_eq!(next.total(), 40);
        assert_eq!(next.max(), 40);
    }
}
