//! Local past-paper vault
//!
//! A directory holding paper files plus JSON records: paper metadata, a
//! mark log and resource click counters. Opening an empty directory
//! bootstraps a sample catalog with placeholder files.

pub mod marking;
pub mod sites;

pub use marking::{MarkLogEntry, MarkResult};
pub use sites::{STUDY_SITES, StudySite};

use std::collections::BTreeMap;
use std::fs;
use std::path::{Component, Path, PathBuf};

use chrono::Utc;
use rand::Rng;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::{PaperFilter, PaperLike};
use crate::model::{Difficulty, ExamBoard};

const PAPERS_DIR: &str = "papers";
const METADATA_FILE: &str = "papers_metadata.json";
const MARK_LOG_FILE: &str = "mark_logs.json";
const CLICKS_FILE: &str = "resource_clicks.json";

/// Size of the bootstrapped sample catalog
pub const SAMPLE_PAPERS: u32 = 110;

#[derive(Debug, Error)]
pub enum VaultError {
    #[error("Paper {0} not found")]
    UnknownPaper(u32),

    /// Metadata exists but the file does not
    #[error("File missing for paper {id}: upload it as {path:?}")]
    FileMissing { id: u32, path: PathBuf },

    /// Metadata names a file outside `papers/`
    #[error("Invalid file name for paper {id}: {filename:?}")]
    InvalidFilename { id: u32, filename: String },

    #[error("Missing url")]
    MissingUrl,

    #[error("Failed to access {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode {path:?}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Metadata for one stored paper
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultPaper {
    pub id: u32,
    pub title: String,
    pub subject: String,
    pub difficulty: Difficulty,
    pub board: ExamBoard,
    /// File name under `papers/`
    pub filename: String,
}

impl PaperLike for VaultPaper {
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

fn sample_paper(i: u32) -> VaultPaper {
    const SUBJECTS: [&str; 5] = ["Maths", "English", "Science", "Physics", "History"];
    const BOARDS: [ExamBoard; 4] = [ExamBoard::Aqa, ExamBoard::Ocr, ExamBoard::Edexcel, ExamBoard::Wjec];
    let subject = SUBJECTS[i as usize % SUBJECTS.len()];
    VaultPaper {
        id: i,
        title: format!("{} Paper {} - Q{}", subject, 2010 + i % 15, i),
        subject: subject.to_string(),
        difficulty: Difficulty::ALL[i as usize % Difficulty::ALL.len()],
        board: BOARDS[i as usize % BOARDS.len()],
        filename: format!("paper_{}.pdf", i),
    }
}

/// File-backed paper store
#[derive(Debug, Clone)]
pub struct PaperVault {
    root: PathBuf,
}

impl PaperVault {
    /// Open a vault rooted at `root`, bootstrapping it if there is no
    /// metadata yet
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, VaultError> {
        let vault = Self { root: root.into() };
        let papers_dir = vault.papers_dir();
        fs::create_dir_all(&papers_dir).map_err(|source| VaultError::Io { path: papers_dir, source })?;
        if !vault.path(METADATA_FILE).exists() {
            vault.bootstrap()?;
        }
        Ok(vault)
    }

    fn bootstrap(&self) -> Result<(), VaultError> {
        tracing::info!("Bootstrapping {} sample papers in {:?}", SAMPLE_PAPERS, self.root);
        let papers: Vec<VaultPaper> = (1..=SAMPLE_PAPERS).map(sample_paper).collect();
        for paper in &papers {
            let path = self.paper_path(paper)?;
            if path.exists() {
                continue;
            }
            let placeholder = format!(
                "Placeholder for {} Paper {}\nReplace this file with the actual PDF named {}",
                paper.subject, paper.id, paper.filename
            );
            fs::write(&path, placeholder).map_err(|source| VaultError::Io { path, source })?;
        }
        self.write_json(METADATA_FILE, &papers)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn papers_dir(&self) -> PathBuf {
        self.root.join(PAPERS_DIR)
    }

    fn path(&self, file: &str) -> PathBuf {
        self.root.join(file)
    }

    /// Location of a paper's file; the name must be a plain relative path
    fn paper_path(&self, paper: &VaultPaper) -> Result<PathBuf, VaultError> {
        let name = Path::new(&paper.filename);
        let plain = name.components().next().is_some()
            && name.components().all(|c| matches!(c, Component::Normal(_)));
        if !plain {
            return Err(VaultError::InvalidFilename { id: paper.id, filename: paper.filename.clone() });
        }
        Ok(self.papers_dir().join(name))
    }

    /// Read a JSON record; missing or unreadable records read as empty
    fn read_json<T: DeserializeOwned + Default>(&self, file: &str) -> T {
        let path = self.path(file);
        let Ok(contents) = fs::read_to_string(&path) else {
            return T::default();
        };
        serde_json::from_str(&contents).unwrap_or_else(|e| {
            tracing::warn!("Ignoring unreadable {:?}: {}", path, e);
            T::default()
        })
    }

    fn write_json<T: Serialize + ?Sized>(&self, file: &str, value: &T) -> Result<(), VaultError> {
        let path = self.path(file);
        let json = serde_json::to_string_pretty(value)
            .map_err(|source| VaultError::Json { path: path.clone(), source })?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|source| VaultError::Io { path: tmp.clone(), source })?;
        fs::rename(&tmp, &path).map_err(|source| VaultError::Io { path, source })
    }

    pub fn papers(&self) -> Vec<VaultPaper> {
        self.read_json(METADATA_FILE)
    }

    /// Papers matching `filter`, in catalog order
    pub fn list(&self, filter: &PaperFilter) -> Vec<VaultPaper> {
        self.papers().into_iter().filter(|p| filter.matches(p)).collect()
    }

    pub fn paper(&self, id: u32) -> Result<VaultPaper, VaultError> {
        self.papers().into_iter().find(|p| p.id == id).ok_or(VaultError::UnknownPaper(id))
    }

    /// Path of the paper's file, which must exist
    pub fn download(&self, id: u32) -> Result<PathBuf, VaultError> {
        let paper = self.paper(id)?;
        let path = self.paper_path(&paper)?;
        if !path.is_file() {
            return Err(VaultError::FileMissing { id, path });
        }
        Ok(path)
    }

    /// Simulate marking a paper and append the result to the mark log
    pub fn mark(&self, id: u32) -> Result<MarkResult, VaultError> {
        self.mark_with(id, &mut rand::thread_rng())
    }

    pub fn mark_with(&self, id: u32, rng: &mut impl Rng) -> Result<MarkResult, VaultError> {
        self.paper(id)?;
        let result = marking::simulate(rng);
        let mut log = self.mark_log();
        log.push(MarkLogEntry { time: Utc::now(), paper_id: id, result: result.clone() });
        self.write_json(MARK_LOG_FILE, &log)?;
        tracing::debug!("Marked paper {}: {}%", id, result.score);
        Ok(result)
    }

    pub fn mark_log(&self) -> Vec<MarkLogEntry> {
        self.read_json(MARK_LOG_FILE)
    }

    /// Count a click on a resource link, returning the new total
    pub fn track(&self, url: &str) -> Result<u64, VaultError> {
        let url = url.trim();
        if url.is_empty() {
            return Err(VaultError::MissingUrl);
        }
        let mut clicks = self.clicks();
        let count = clicks.entry(url.to_string()).or_insert(0);
        *count += 1;
        let count = *count;
        self.write_json(CLICKS_FILE, &clicks)?;
        Ok(count)
    }

    pub fn clicks(&self) -> BTreeMap<String, u64> {
        self.read_json(CLICKS_FILE)
    }

    pub fn resources(&self) -> &'static [StudySite] {
        &STUDY_SITES
    }
}
