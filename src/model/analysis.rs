use serde::{Deserialize, Serialize};

use crate::model::hypothesis::{HypothesisId, Judgment};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hypothesis {
    pub id: HypothesisId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceItem {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

/// A group of thematically dependent evidence items judged as one unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceCluster {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub evidence: Vec<EvidenceItem>,
    pub judgments: Vec<Judgment>,
}

impl EvidenceCluster {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}

/// A validated analysis: a fixed hypothesis set and clusters that each carry
/// exactly one judgment per hypothesis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    pub topic: Option<String>,
    pub hypotheses: Vec<Hypothesis>,
    pub clusters: Vec<EvidenceCluster>,
}

impl Analysis {
    pub fn hypothesis_ids(&self) -> Vec<HypothesisId> {
        self.hypotheses.iter().map(|h| h.id.clone()).collect()
    }
}
