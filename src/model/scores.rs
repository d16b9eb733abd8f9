use std::collections::BTreeMap;

use serde::Serialize;

use crate::model::hypothesis::HypothesisId;

/// Scorer output for one hypothesis within one cluster.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HypothesisScore {
    pub hypothesis_id: HypothesisId,
    pub prior: f64,
    pub likelihood: f64,
    /// Accumulated catch-all likelihood, before the zero floor is applied.
    pub catchall: f64,
    pub lr: f64,
    /// Prior mass left for the competitors was too small to define a catch-all.
    pub degenerate: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusterResult {
    pub cluster_id: String,
    pub scores: Vec<HypothesisScore>,
}

impl ClusterResult {
    pub fn lr_map(&self) -> BTreeMap<HypothesisId, f64> {
        self.scores
            .iter()
            .map(|s| (s.hypothesis_id.clone(), s.lr))
            .collect()
    }

    pub fn prior_sum(&self) -> f64 {
        self.scores.iter().map(|s| s.prior).sum()
    }
}

/// Product of one hypothesis' likelihood ratios over all clusters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CumulativeScore {
    pub hypothesis_id: HypothesisId,
    #[serde(with = "crate::model::float_repr")]
    pub cumulative_score: f64,
    #[serde(with = "crate::model::float_repr")]
    pub log10_score: f64,
    pub rank: usize,
}
