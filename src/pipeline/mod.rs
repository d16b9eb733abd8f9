pub mod stage1_validate;
pub mod stage2_score;
pub mod stage3_combine;
pub mod stage4_report;

use tracing::{debug, info, warn};

use crate::input::AnalysisDocument;
use crate::model::analysis::Analysis;
use crate::model::policy::ScoringPolicy;
use crate::model::scores::{ClusterResult, CumulativeScore};
use stage1_validate::{SkippedCluster, ValidationError, ValidationMode, run_stage1};
use stage2_score::run_stage2;
use stage3_combine::run_stage3;

#[derive(Debug, Clone)]
pub struct AnalysisRun {
    pub analysis: Analysis,
    pub results: Vec<ClusterResult>,
    pub ranking: Vec<CumulativeScore>,
    pub skipped: Vec<SkippedCluster>,
}

/// Validate, score every cluster and combine. Report writing is left to
/// the caller.
pub fn run_analysis(
    doc: AnalysisDocument,
    mode: ValidationMode,
    policy: &ScoringPolicy,
) -> Result<AnalysisRun, ValidationError> {
    let stage1 = run_stage1(doc, mode)?;
    let analysis = stage1.analysis;
    info!(
        hypotheses = analysis.hypotheses.len(),
        clusters = analysis.clusters.len(),
        skipped = stage1.skipped.len(),
        "validated analysis"
    );
    if analysis.clusters.is_empty() {
        warn!("no evidence clusters to score; every hypothesis stays neutral");
    }

    let results = run_stage2(&analysis.clusters, policy);
    for result in &results {
        let degenerate = result.scores.iter().filter(|s| s.degenerate).count();
        if degenerate > 0 {
            warn!(
                cluster = %result.cluster_id,
                degenerate,
                "near-certain prior; likelihood ratio set to neutral"
            );
        }
        if result.prior_sum() == 0.0 {
            warn!(
                cluster = %result.cluster_id,
                policy = policy.zero_mass().label(),
                "cluster has zero prior mass"
            );
        }
        debug!(cluster = %result.cluster_id, scores = ?result.scores, "scored cluster");
    }

    let ranking = run_stage3(&analysis.hypothesis_ids(), &results);
    if let Some(top) = ranking.first() {
        info!(
            leader = %top.hypothesis_id,
            cumulative = top.cumulative_score,
            "combined evidence across clusters"
        );
    }

    Ok(AnalysisRun {
        analysis,
        results,
        ranking,
        skipped: stage1.skipped,
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/mod.rs"]
mod tests;
