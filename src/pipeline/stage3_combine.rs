//! Cross-cluster combiner.
//!
//! Clusters are treated as conditionally independent, so a hypothesis'
//! cumulative score is the product of its per-cluster likelihood ratios.
//! A cluster without an entry for a hypothesis contributes 1.0. No bounds
//! and no normalization are applied here.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::model::hypothesis::HypothesisId;
use crate::model::scores::{ClusterResult, CumulativeScore};

pub fn combine(per_cluster: &[BTreeMap<HypothesisId, f64>]) -> BTreeMap<HypothesisId, f64> {
    let mut out = BTreeMap::new();
    for cluster in per_cluster {
        for (id, lr) in cluster {
            *out.entry(id.clone()).or_insert(1.0) *= *lr;
        }
    }
    out
}

/// Like [`combine`], but every id in `hypotheses` is present in the output,
/// at 1.0 when no cluster mentions it.
pub fn combine_for(
    hypotheses: &[HypothesisId],
    per_cluster: &[BTreeMap<HypothesisId, f64>],
) -> BTreeMap<HypothesisId, f64> {
    let mut out = combine(per_cluster);
    for id in hypotheses {
        out.entry(id.clone()).or_insert(1.0);
    }
    out
}

pub fn combine_results(results: &[ClusterResult]) -> BTreeMap<HypothesisId, f64> {
    let maps = results.iter().map(ClusterResult::lr_map).collect::<Vec<_>>();
    combine(&maps)
}

/// Order hypotheses by cumulative score, strongest support first. Ties are
/// broken by id so the ranking is stable.
pub fn rank(cumulative: &BTreeMap<HypothesisId, f64>) -> Vec<CumulativeScore> {
    let mut entries = cumulative.iter().collect::<Vec<_>>();
    entries.sort_by(|(id_a, a), (id_b, b)| match b.total_cmp(a) {
        Ordering::Equal => id_a.cmp(id_b),
        other => other,
    });

    entries
        .into_iter()
        .enumerate()
        .map(|(idx, (id, &score))| CumulativeScore {
            hypothesis_id: id.clone(),
            cumulative_score: score,
            log10_score: log10_display(score),
            rank: idx + 1,
        })
        .collect()
}

/// Log10 used for symmetric display around the neutral 1.0.
pub fn log10_display(value: f64) -> f64 {
    if value > 0.0 {
        value.log10()
    } else {
        f64::NEG_INFINITY
    }
}

pub fn run_stage3(
    hypotheses: &[HypothesisId],
    results: &[ClusterResult],
) -> Vec<CumulativeScore> {
    let maps = results.iter().map(ClusterResult::lr_map).collect::<Vec<_>>();
    rank(&combine_for(hypotheses, &maps))
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage3_combine.rs"]
mod tests;
