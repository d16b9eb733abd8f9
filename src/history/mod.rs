//! Saved analysis runs.
//!
//! The scoring engine is stateless; earlier runs live behind the narrow
//! [`HistoryStore`] interface and are only touched by the CLI.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::hypothesis::HypothesisId;
use crate::model::scores::CumulativeScore;

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("history IO error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("corrupt history record {path}: {source}")]
    Corrupt {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedHypothesis {
    pub hypothesis_id: HypothesisId,
    #[serde(with = "crate::model::float_repr")]
    pub cumulative_score: f64,
    pub rank: usize,
}

impl From<&CumulativeScore> for RankedHypothesis {
    fn from(value: &CumulativeScore) -> Self {
        Self {
            hypothesis_id: value.hypothesis_id.clone(),
            cumulative_score: value.cumulative_score,
            rank: value.rank,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    pub topic: Option<String>,
    pub tool_version: String,
    pub zero_mass_policy: String,
    pub n_clusters: usize,
    pub created_unix: u64,
    pub ranking: Vec<RankedHypothesis>,
}

impl RunRecord {
    pub fn new(
        topic: Option<String>,
        zero_mass_policy: &str,
        n_clusters: usize,
        ranking: &[CumulativeScore],
    ) -> Self {
        let created_unix = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        Self {
            topic,
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            zero_mass_policy: zero_mass_policy.to_string(),
            n_clusters,
            created_unix,
            ranking: ranking.iter().map(RankedHypothesis::from).collect(),
        }
    }
}

pub trait HistoryStore {
    fn save(&self, record: &RunRecord) -> Result<PathBuf, HistoryError>;
    fn load_all(&self) -> Result<Vec<RunRecord>, HistoryError>;
}

/// One `run_<seq>.json` file per saved run.
#[derive(Debug, Clone)]
pub struct FsHistoryStore {
    dir: PathBuf,
}

impl FsHistoryStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn record_paths(&self) -> Result<Vec<(u64, PathBuf)>, HistoryError> {
        if !self.dir.is_dir() {
            return Ok(Vec::new());
        }
        let entries = fs::read_dir(&self.dir).map_err(|source| self.io_err(&self.dir, source))?;
        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| self.io_err(&self.dir, source))?;
            let path = entry.path();
            if let Some(seq) = record_seq(&path) {
                paths.push((seq, path));
            }
        }
        paths.sort_by_key(|(seq, _)| *seq);
        Ok(paths)
    }

    fn io_err(&self, path: &Path, source: std::io::Error) -> HistoryError {
        HistoryError::Io {
            path: path.display().to_string(),
            source,
        }
    }
}

impl HistoryStore for FsHistoryStore {
    fn save(&self, record: &RunRecord) -> Result<PathBuf, HistoryError> {
        fs::create_dir_all(&self.dir).map_err(|source| self.io_err(&self.dir, source))?;
        let next = self
            .record_paths()?
            .last()
            .map(|(seq, _)| seq + 1)
            .unwrap_or(1);
        let path = self.dir.join(format!("run_{:06}.json", next));
        let json = serde_json::to_string_pretty(record).map_err(|source| HistoryError::Corrupt {
            path: path.display().to_string(),
            source,
        })?;
        fs::write(&path, json).map_err(|source| self.io_err(&path, source))?;
        Ok(path)
    }

    fn load_all(&self) -> Result<Vec<RunRecord>, HistoryError> {
        let mut out = Vec::new();
        for (_, path) in self.record_paths()? {
            let text = fs::read_to_string(&path).map_err(|source| self.io_err(&path, source))?;
            let record = serde_json::from_str(&text).map_err(|source| HistoryError::Corrupt {
                path: path.display().to_string(),
                source,
            })?;
            out.push(record);
        }
        Ok(out)
    }
}

fn record_seq(path: &Path) -> Option<u64> {
    let name = path.file_name()?.to_str()?;
    let seq = name.strip_prefix("run_")?.strip_suffix(".json")?;
    seq.parse().ok()
}

#[cfg(test)]
#[path = "../../tests/src_inline/history/mod.rs"]
mod tests;
