use std::collections::{BTreeMap, BTreeSet};

use thiserror::Error;

use crate::input::AnalysisDocument;
use crate::model::analysis::{Analysis, EvidenceCluster, Hypothesis};
use crate::model::hypothesis::HypothesisId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationMode {
    /// The first invalid cluster aborts the run.
    Strict,
    /// Invalid clusters are dropped with a warning.
    SkipInvalid,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("no hypotheses defined")]
    NoHypotheses,
    #[error("duplicate hypothesis id {id}")]
    DuplicateHypothesis { id: HypothesisId },
    #[error("duplicate cluster id {id}")]
    DuplicateCluster { id: String },
    #[error("cluster {cluster}: unknown hypothesis {id}")]
    UnknownHypothesis { cluster: String, id: HypothesisId },
    #[error("cluster {cluster}: more than one judgment for hypothesis {id}")]
    DuplicateJudgment { cluster: String, id: HypothesisId },
    #[error("cluster {cluster}: no judgment for hypothesis {id}")]
    MissingJudgment { cluster: String, id: HypothesisId },
    #[error("cluster {cluster}: {field} for hypothesis {id} must be finite and >= 0 (got {value})")]
    InvalidValue {
        cluster: String,
        id: HypothesisId,
        field: &'static str,
        value: f64,
    },
}

#[derive(Debug, Clone)]
pub struct SkippedCluster {
    pub cluster_id: String,
    pub reason: ValidationError,
}

#[derive(Debug, Clone)]
pub struct Stage1Output {
    pub analysis: Analysis,
    pub skipped: Vec<SkippedCluster>,
}

pub fn run_stage1(
    doc: AnalysisDocument,
    mode: ValidationMode,
) -> Result<Stage1Output, ValidationError> {
    let hypotheses = resolve_hypotheses(&doc)?;
    let known = hypotheses
        .iter()
        .map(|h| h.id.clone())
        .collect::<BTreeSet<_>>();

    let mut seen_clusters = BTreeSet::new();
    let mut clusters = Vec::with_capacity(doc.clusters.len());
    let mut skipped = Vec::new();

    for cluster in doc.clusters {
        if !seen_clusters.insert(cluster.id.clone()) {
            return Err(ValidationError::DuplicateCluster { id: cluster.id });
        }
        match validate_cluster(&cluster, &hypotheses, &known) {
            Ok(()) => clusters.push(order_judgments(cluster, &hypotheses)),
            Err(err) => match mode {
                ValidationMode::Strict => return Err(err),
                ValidationMode::SkipInvalid => {
                    tracing::warn!(cluster = %cluster.id, "skipping invalid cluster: {err}");
                    skipped.push(SkippedCluster {
                        cluster_id: cluster.id,
                        reason: err,
                    });
                }
            },
        }
    }

    Ok(Stage1Output {
        analysis: Analysis {
            topic: doc.topic,
            hypotheses,
            clusters,
        },
        skipped,
    })
}

fn resolve_hypotheses(doc: &AnalysisDocument) -> Result<Vec<Hypothesis>, ValidationError> {
    let hypotheses = if doc.hypotheses.is_empty() {
        let mut ids = Vec::new();
        if let Some(first) = doc.clusters.first() {
            for j in &first.judgments {
                if !ids.contains(&j.hypothesis_id) {
                    ids.push(j.hypothesis_id.clone());
                }
            }
        }
        ids.into_iter()
            .map(|id| Hypothesis { id, label: None })
            .collect::<Vec<_>>()
    } else {
        doc.hypotheses.clone()
    };

    if hypotheses.is_empty() {
        return Err(ValidationError::NoHypotheses);
    }
    let mut seen = BTreeSet::new();
    for h in &hypotheses {
        if !seen.insert(&h.id) {
            return Err(ValidationError::DuplicateHypothesis { id: h.id.clone() });
        }
    }
    Ok(hypotheses)
}

pub fn validate_cluster(
    cluster: &EvidenceCluster,
    hypotheses: &[Hypothesis],
    known: &BTreeSet<HypothesisId>,
) -> Result<(), ValidationError> {
    let mut seen = BTreeSet::new();
    for j in &cluster.judgments {
        if !known.contains(&j.hypothesis_id) {
            return Err(ValidationError::UnknownHypothesis {
                cluster: cluster.id.clone(),
                id: j.hypothesis_id.clone(),
            });
        }
        if !seen.insert(&j.hypothesis_id) {
            return Err(ValidationError::DuplicateJudgment {
                cluster: cluster.id.clone(),
                id: j.hypothesis_id.clone(),
            });
        }
        for (field, value) in [("Q", j.q), ("U", j.u)] {
            if !value.is_finite() || value < 0.0 {
                return Err(ValidationError::InvalidValue {
                    cluster: cluster.id.clone(),
                    id: j.hypothesis_id.clone(),
                    field,
                    value,
                });
            }
        }
    }
    for h in hypotheses {
        if !seen.contains(&h.id) {
            return Err(ValidationError::MissingJudgment {
                cluster: cluster.id.clone(),
                id: h.id.clone(),
            });
        }
    }
    Ok(())
}

// Judgments are reordered to hypothesis-set order so every cluster's rows
// line up in the reports.
fn order_judgments(mut cluster: EvidenceCluster, hypotheses: &[Hypothesis]) -> EvidenceCluster {
    let position = hypotheses
        .iter()
        .enumerate()
        .map(|(idx, h)| (h.id.clone(), idx))
        .collect::<BTreeMap<_, _>>();
    cluster
        .judgments
        .sort_by_key(|j| position.get(&j.hypothesis_id).copied().unwrap_or(usize::MAX));
    cluster
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage1_validate.rs"]
mod tests;
