//! Past paper catalog filtering

use std::fmt;
use std::str::FromStr;

use crate::model::{Difficulty, ExamBoard, PastPaper};

/// Sentinel meaning "no constraint"
pub const ALL: &str = "All";

/// A filter criterion: either unconstrained or one concrete value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Criterion<T> {
    #[default]
    All,
    Only(T),
}

impl<T: PartialEq> Criterion<T> {
    /// Does `value` pass this criterion?
    pub fn admits(&self, value: &T) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == value,
        }
    }
}

impl<T: FromStr> FromStr for Criterion<T> {
    type Err = T::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case(ALL) {
            Ok(Self::All)
        } else {
            s.trim().parse().map(Self::Only)
        }
    }
}

impl<T: fmt::Display> fmt::Display for Criterion<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(ALL),
            Self::Only(value) => value.fmt(f),
        }
    }
}

/// Anything that can be filtered like a past paper
pub trait PaperLike {
    fn subject(&self) -> &str;
    fn difficulty(&self) -> Difficulty;
    fn board(&self) -> ExamBoard;
}

impl PaperLike for PastPaper {
    fn subject(&self) -> &str {
        &self.subject
    }

    fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    fn board(&self) -> ExamBoard {
        self.board
    }
}

/// Subject / difficulty / board filter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaperFilter {
    pub subject: Criterion<String>,
    pub difficulty: Criterion<Difficulty>,
    pub board: Criterion<ExamBoard>,
}

impl PaperFilter {
    /// Build a filter from optional string criteria; `None` and `"All"` are
    /// both unconstrained
    pub fn parse(
        subject: Option<&str>,
        difficulty: Option<&str>,
        board: Option<&str>,
    ) -> Result<Self, String> {
        Ok(Self {
            subject: subject.and_then(|s| s.parse().ok()).unwrap_or_default(),
            difficulty: difficulty
                .map(str::parse::<Criterion<Difficulty>>)
                .transpose()?
                .unwrap_or_default(),
            board: board.map(str::parse::<Criterion<ExamBoard>>).transpose()?.unwrap_or_default(),
        })
    }

    /// Does a paper satisfy every criterion?
    pub fn matches(&self, paper: &impl PaperLike) -> bool {
        let subject_ok = match &self.subject {
            Criterion::All => true,
            Criterion::Only(wanted) => wanted == paper.subject(),
        };
        subject_ok
            && self.difficulty.admits(&paper.difficulty())
            && self.board.admits(&paper.board())
    }

    /// Matching papers, in input order
    pub fn apply<'a, P: PaperLike>(&self, papers: &'a [P]) -> Vec<&'a P> {
        papers.iter().filter(|p| self.matches(*p)).collect()
    }
}

impl fmt::Display for PaperFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "subject={} difficulty={} board={}", self.subject, self.difficulty, self.board)
    }
}

/// Filter papers by subject, difficulty and board
pub fn filter<'a, P: PaperLike>(papers: &'a [P], criteria: &PaperFilter) -> Vec<&'a P> {
    criteria.apply(papers)
}
