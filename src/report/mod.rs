pub mod json;
pub mod text;

use serde::Serialize;

use crate::model::analysis::Hypothesis;
use crate::model::policy::ScoringPolicy;
use crate::model::scores::{CumulativeScore, HypothesisScore};

#[derive(Debug, Clone, Serialize)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct InputMeta {
    pub path: String,
    pub topic: Option<String>,
    pub n_hypotheses: usize,
    pub n_clusters: usize,
    pub n_skipped: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClusterSummary {
    pub cluster_id: String,
    pub name: String,
    pub n_evidence: usize,
    pub prior_sum: f64,
    pub scores: Vec<HypothesisScore>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SkippedSummary {
    pub cluster_id: String,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryData {
    pub tool: ToolMeta,
    pub input: InputMeta,
    pub policy: ScoringPolicy,
    pub hypotheses: Vec<Hypothesis>,
    pub ranking: Vec<CumulativeScore>,
    pub clusters: Vec<ClusterSummary>,
    pub skipped: Vec<SkippedSummary>,
}

pub fn format_f64_6(v: f64) -> String {
    format!("{:.6}", v)
}

/// Strongest supporting and strongest refuting hypothesis of one cluster.
/// Neutral ratios are neither.
pub fn extremes(scores: &[HypothesisScore]) -> (Option<&HypothesisScore>, Option<&HypothesisScore>) {
    let mut support: Option<&HypothesisScore> = None;
    let mut refute: Option<&HypothesisScore> = None;
    for s in scores {
        if s.lr > 1.0 && support.is_none_or(|best| s.lr > best.lr) {
            support = Some(s);
        }
        if s.lr < 1.0 && refute.is_none_or(|worst| s.lr < worst.lr) {
            refute = Some(s);
        }
    }
    (support, refute)
}

pub fn support_label(lr: f64) -> &'static str {
    if lr >= 10.0 {
        "strong support"
    } else if lr > 1.0 {
        "support"
    } else if lr == 1.0 {
        "neutral"
    } else if lr > 0.1 {
        "refutation"
    } else {
        "strong refutation"
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/mod.rs"]
mod tests;
