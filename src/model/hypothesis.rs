use std::fmt;

use serde::{Deserialize, Serialize};

/// Caller-supplied identifier of one hypothesis. Compared by exact string
/// equality across every cluster of an analysis.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HypothesisId(String);

impl HypothesisId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HypothesisId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for HypothesisId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for HypothesisId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// One `(hypothesis, Q, U)` judgment for a single cluster.
///
/// `q` is the prior plausibility ratio, `u` the relative likelihood of the
/// cluster's evidence under the hypothesis. Both have a baseline of 1.0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Judgment {
    pub hypothesis_id: HypothesisId,
    #[serde(rename = "Q", alias = "q")]
    pub q: f64,
    #[serde(rename = "U", alias = "u")]
    pub u: f64,
}

impl Judgment {
    pub fn new(hypothesis_id: impl Into<HypothesisId>, q: f64, u: f64) -> Self {
        Self {
            hypothesis_id: hypothesis_id.into(),
            q,
            u,
        }
    }

    pub fn baseline(hypothesis_id: impl Into<HypothesisId>) -> Self {
        Self::new(hypothesis_id, 1.0, 1.0)
    }
}
