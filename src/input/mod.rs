use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

pub mod reader;

use crate::model::analysis::{EvidenceCluster, Hypothesis};
use reader::read_to_string_maybe_gz;

/// Analysis document as delivered by the judgment supplier, before
/// validation. `hypotheses` may be omitted.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisDocument {
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub hypotheses: Vec<Hypothesis>,
    #[serde(default)]
    pub clusters: Vec<EvidenceCluster>,
}

#[derive(Debug, Error)]
pub enum InputError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("missing input: {0}")]
    MissingInput(String),
    #[error("parse error in {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

pub fn load_analysis(path: &Path) -> Result<AnalysisDocument, InputError> {
    if !path.is_file() {
        return Err(InputError::MissingInput(path.display().to_string()));
    }
    let text = read_to_string_maybe_gz(path)?;
    parse_analysis(&text).map_err(|source| InputError::Parse {
        path: path.display().to_string(),
        source,
    })
}

pub fn parse_analysis(text: &str) -> Result<AnalysisDocument, serde_json::Error> {
    serde_json::from_str(text)
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/tests.rs"]
mod tests;
