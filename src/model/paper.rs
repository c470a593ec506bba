//! Past exam papers and study resources

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::quest::Difficulty;

/// Exam board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExamBoard {
    #[serde(rename = "AQA")]
    Aqa,
    Edexcel,
    #[serde(rename = "OCR")]
    Ocr,
    #[serde(rename = "WJEC")]
    Wjec,
    #[serde(rename = "CIE")]
    Cie,
}

impl ExamBoard {
    pub const ALL: [ExamBoard; 5] = [Self::Aqa, Self::Edexcel, Self::Ocr, Self::Wjec, Self::Cie];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Aqa => "AQA",
            Self::Edexcel => "Edexcel",
            Self::Ocr => "OCR",
            Self::Wjec => "WJEC",
            Self::Cie => "CIE",
        }
    }
}

impl fmt::Display for ExamBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExamBoard {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|b| b.as_str().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| format!("Unknown exam board: {}. Options: AQA, Edexcel, OCR, WJEC, CIE", s))
    }
}

/// Exam series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Season {
    January,
    #[serde(rename = "May/June")]
    MayJune,
    #[serde(rename = "October/November")]
    OctoberNovember,
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::January => "January",
            Self::MayJune => "May/June",
            Self::OctoberNovember => "October/November",
        })
    }
}

/// A catalog entry for one past paper. Never mutated after load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PastPaper {
    pub id: u64,
    pub title: String,
    /// Catalog subject label (e.g. "Math")
    pub subject: String,
    pub difficulty: Difficulty,
    pub board: ExamBoard,
    pub year: i32,
    pub season: Season,
    pub paper_number: String,
    pub topics: Vec<String>,
    pub curriculum_code: String,
    /// Canonical board page for the paper
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mark_scheme_url: Option<String>,
}

/// Kind of study resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResourceKind {
    Website,
    #[serde(rename = "PDF")]
    Pdf,
    Video,
    Interactive,
    #[serde(rename = "Past Papers")]
    PastPapers,
}

/// Tier a resource is aimed at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResourceLevel {
    Foundation,
    Higher,
    All,
}

/// A saved study resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub id: u64,
    pub name: String,
    pub url: String,
    pub description: String,
    pub subjects: Vec<String>,
    #[serde(rename = "type")]
    pub kind: ResourceKind,
    pub free: bool,
    pub difficulty: ResourceLevel,
}
