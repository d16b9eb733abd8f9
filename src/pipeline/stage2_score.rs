//! Cluster scorer.
//!
//! Turns one cluster's `(Q, U)` judgments into normalized priors, a
//! catch-all likelihood per hypothesis and a bounded likelihood ratio
//!
//! ```text
//! P(H_i)  = Q_i / sum(Q)
//! U_not_i = sum_{j != i} P(H_j) / (1 - P(H_i)) * U_j
//! LR_i    = clamp(U_i / U_not_i, lr_min, lr_max)
//! ```
//!
//! Degenerate inputs never raise: a zero prior mass, a near-certain prior
//! and a zero catch-all each fall back to a fixed substitution listed in
//! [`ScoringPolicy`].

use crate::model::analysis::EvidenceCluster;
use crate::model::hypothesis::Judgment;
use crate::model::policy::{ScoringPolicy, ZeroMassPolicy};
use crate::model::scores::{ClusterResult, HypothesisScore};

/// Score one cluster with [`ScoringPolicy::default_v1`].
pub fn score(judgments: &[Judgment]) -> Vec<HypothesisScore> {
    score_cluster(judgments, &ScoringPolicy::default_v1())
}

/// Score one cluster. Output order follows `judgments`.
pub fn score_cluster(judgments: &[Judgment], policy: &ScoringPolicy) -> Vec<HypothesisScore> {
    let priors = normalized_priors(judgments, policy.zero_mass());
    let mut out = Vec::with_capacity(judgments.len());

    for (i, judgment) in judgments.iter().enumerate() {
        let prior = priors[i];
        let denominator = 1.0 - prior;

        if denominator <= policy.near_certain_eps() {
            out.push(HypothesisScore {
                hypothesis_id: judgment.hypothesis_id.clone(),
                prior,
                likelihood: judgment.u,
                catchall: 0.0,
                lr: 1.0,
                degenerate: true,
            });
            continue;
        }

        let catchall = catchall_likelihood(judgments, &priors, i, denominator);
        let divisor = if catchall == 0.0 {
            policy.catchall_floor()
        } else {
            catchall
        };
        let lr = policy.clamp_lr(judgment.u / divisor);

        out.push(HypothesisScore {
            hypothesis_id: judgment.hypothesis_id.clone(),
            prior,
            likelihood: judgment.u,
            catchall,
            lr,
            degenerate: false,
        });
    }

    out
}

pub fn normalized_priors(judgments: &[Judgment], zero_mass: ZeroMassPolicy) -> Vec<f64> {
    let sum_q: f64 = judgments.iter().map(|j| j.q).sum();
    let denominator = if sum_q == 0.0 {
        match zero_mass {
            ZeroMassPolicy::ZeroPriors => 1.0,
            ZeroMassPolicy::Uniform => {
                let m = judgments.len() as f64;
                return judgments.iter().map(|_| 1.0 / m).collect();
            }
        }
    } else {
        sum_q
    };
    judgments.iter().map(|j| j.q / denominator).collect()
}

fn catchall_likelihood(
    judgments: &[Judgment],
    priors: &[f64],
    target: usize,
    denominator: f64,
) -> f64 {
    let mut acc = 0.0;
    for (j, other) in judgments.iter().enumerate() {
        if j == target {
            continue;
        }
        let weight = priors[j] / denominator;
        acc += weight * other.u;
    }
    acc
}

pub fn run_stage2(clusters: &[EvidenceCluster], policy: &ScoringPolicy) -> Vec<ClusterResult> {
    clusters
        .iter()
        .map(|cluster| ClusterResult {
            cluster_id: cluster.id.clone(),
            scores: score_cluster(&cluster.judgments, policy),
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage2_score.rs"]
mod tests;
