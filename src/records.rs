//! Session record store
//!
//! Records are persisted as a single JSON document, `{"games": [...]}`,
//! appended to after every saved session.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::RecordStoreError;
use crate::metrics::SessionRecord;
use crate::sim::GameMode;

/// Default file name for the record store
pub const DEFAULT_DATA_FILE: &str = "game_data.json";

/// Number of recent games listed in statistics
pub const RECENT_GAMES: usize = 5;

#[derive(Debug, Default, Serialize, Deserialize)]
struct RecordDocument {
    #[serde(default)]
    games: Vec<SessionRecord>,
}

/// JSON-file backed list of session records
#[derive(Debug, Clone)]
pub struct RecordStore {
    path: PathBuf,
}

impl RecordStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All stored records, oldest first; a missing file is an empty store
    pub fn load(&self) -> Result<Vec<SessionRecord>, RecordStoreError> {
        Ok(self.read_document()?.games)
    }

    /// Append one record and rewrite the file
    pub fn append(&self, record: SessionRecord) -> Result<usize, RecordStoreError> {
        let mut doc = self.read_document()?;
        doc.games.push(record);
        let json = serde_json::to_string_pretty(&doc)?;
        std::fs::write(&self.path, json)?;
        log::info!(
            "Saved game record to {} ({} total)",
            self.path.display(),
            doc.games.len()
        );
        Ok(doc.games.len())
    }

    fn read_document(&self) -> Result<RecordDocument, RecordStoreError> {
        match std::fs::read_to_string(&self.path) {
            Ok(json) => Ok(serde_json::from_str(&json)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No record store at {}, starting fresh", self.path.display());
                Ok(RecordDocument::default())
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// Aggregate statistics over stored records
#[derive(Debug, Clone, PartialEq)]
pub struct Statistics {
    pub total_games: usize,
    pub total_score: u64,
    pub average_score: f64,
    pub max_score: u64,
    pub wins: usize,
    /// Share of games won, in [0, 1]
    pub win_ratio: f64,
    pub average_hit_rate: f64,
    pub classic_games: usize,
    pub challenge_games: usize,
    /// Newest first
    pub recent: Vec<SessionRecord>,
}

impl Statistics {
    /// Returns `None` when there are no records
    pub fn from_records(records: &[SessionRecord]) -> Option<Self> {
        if records.is_empty() {
            return None;
        }
        let total_games = records.len();
        let n = total_games as f64;
        let total_score: u64 = records.iter().map(|r| r.score).sum();
        let wins = records.iter().filter(|r| r.won).count();
        let count_mode = |mode: GameMode| records.iter().filter(|r| r.mode == mode).count();

        Some(Self {
            total_games,
            total_score,
            average_score: total_score as f64 / n,
            max_score: records.iter().map(|r| r.score).max().unwrap_or(0),
            wins,
            win_ratio: wins as f64 / n,
            average_hit_rate: records.iter().map(|r| r.hit_rate).sum::<f64>() / n,
            classic_games: count_mode(GameMode::Classic),
            challenge_games: count_mode(GameMode::Challenge),
            recent: records.iter().rev().take(RECENT_GAMES).cloned().collect(),
        })
    }
}
