use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::model::analysis::Analysis;
use crate::model::policy::ScoringPolicy;
use crate::model::scores::{ClusterResult, CumulativeScore};
use crate::pipeline::stage1_validate::SkippedCluster;
use crate::pipeline::stage3_combine::log10_display;
use crate::report::json::render_summary_json;
use crate::report::text::render_report_text;
use crate::report::{
    ClusterSummary, InputMeta, SkippedSummary, SummaryData, ToolMeta, format_f64_6,
};

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialise summary: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone)]
pub struct Stage4Input<'a> {
    pub analysis: &'a Analysis,
    pub results: &'a [ClusterResult],
    pub ranking: &'a [CumulativeScore],
    pub policy: &'a ScoringPolicy,
    pub skipped: &'a [SkippedCluster],
    pub input_path: String,
    pub tool_name: String,
    pub tool_version: String,
}

#[derive(Debug, Clone)]
pub struct ReportPaths {
    pub clusters_tsv: PathBuf,
    pub evidence_tsv: PathBuf,
    pub summary_json: PathBuf,
    pub report_txt: PathBuf,
}

pub fn write_reports(input: &Stage4Input<'_>, out_dir: &Path) -> Result<ReportPaths, ReportError> {
    fs::create_dir_all(out_dir).map_err(|source| io_err(out_dir, source))?;

    let paths = ReportPaths {
        clusters_tsv: out_dir.join("clusters.tsv"),
        evidence_tsv: out_dir.join("evidence.tsv"),
        summary_json: out_dir.join("summary.json"),
        report_txt: out_dir.join("report.txt"),
    };

    write_clusters_tsv(input, &paths.clusters_tsv)
        .map_err(|source| io_err(&paths.clusters_tsv, source))?;
    write_evidence_tsv(input, &paths.evidence_tsv)
        .map_err(|source| io_err(&paths.evidence_tsv, source))?;

    let summary = build_summary(input);
    let json = render_summary_json(&summary)?;
    write_text(&paths.summary_json, &json).map_err(|source| io_err(&paths.summary_json, source))?;

    let report = render_report_text(&summary);
    write_text(&paths.report_txt, &report).map_err(|source| io_err(&paths.report_txt, source))?;

    Ok(paths)
}

fn write_clusters_tsv(input: &Stage4Input<'_>, path: &Path) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    let header = [
        "cluster_id",
        "cluster_name",
        "hypothesis_id",
        "prior",
        "likelihood",
        "catchall",
        "lr",
        "log10_lr",
        "degenerate",
    ]
    .join("\t");
    writeln!(w, "{}", header)?;

    for (cluster, result) in input.analysis.clusters.iter().zip(input.results) {
        for s in &result.scores {
            let row = [
                tsv_field(&result.cluster_id),
                tsv_field(cluster.display_name()),
                tsv_field(s.hypothesis_id.as_str()),
                format_f64_6(s.prior),
                format_f64_6(s.likelihood),
                format_f64_6(s.catchall),
                format_f64_6(s.lr),
                format_f64_6(log10_display(s.lr)),
                s.degenerate.to_string(),
            ];
            writeln!(w, "{}", row.join("\t"))?;
        }
    }
    w.flush()
}

// Every evidence item inherits its cluster's ratios unchanged.
fn write_evidence_tsv(input: &Stage4Input<'_>, path: &Path) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    let header = ["cluster_id", "evidence_id", "summary", "hypothesis_id", "lr"].join("\t");
    writeln!(w, "{}", header)?;

    for (cluster, result) in input.analysis.clusters.iter().zip(input.results) {
        for item in &cluster.evidence {
            let summary = tsv_field(item.summary.as_deref().unwrap_or(""));
            for s in &result.scores {
                let row = [
                    tsv_field(&cluster.id),
                    tsv_field(&item.id),
                    summary.clone(),
                    tsv_field(s.hypothesis_id.as_str()),
                    format_f64_6(s.lr),
                ];
                writeln!(w, "{}", row.join("\t"))?;
            }
        }
    }
    w.flush()
}

pub fn build_summary(input: &Stage4Input<'_>) -> SummaryData {
    let clusters = input
        .analysis
        .clusters
        .iter()
        .zip(input.results)
        .map(|(cluster, result)| ClusterSummary {
            cluster_id: result.cluster_id.clone(),
            name: cluster.display_name().to_string(),
            n_evidence: cluster.evidence.len(),
            prior_sum: result.prior_sum(),
            scores: result.scores.clone(),
        })
        .collect::<Vec<_>>();

    SummaryData {
        tool: ToolMeta {
            name: input.tool_name.clone(),
            version: input.tool_version.clone(),
        },
        input: InputMeta {
            path: input.input_path.clone(),
            topic: input.analysis.topic.clone(),
            n_hypotheses: input.analysis.hypotheses.len(),
            n_clusters: clusters.len(),
            n_skipped: input.skipped.len(),
        },
        policy: input.policy.clone(),
        hypotheses: input.analysis.hypotheses.clone(),
        ranking: input.ranking.to_vec(),
        clusters,
        skipped: input
            .skipped
            .iter()
            .map(|s| SkippedSummary {
                cluster_id: s.cluster_id.clone(),
                reason: s.reason.to_string(),
            })
            .collect(),
    }
}

fn write_text(path: &Path, contents: &str) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    w.write_all(contents.as_bytes())?;
    w.flush()
}

fn tsv_field(value: &str) -> String {
    value.replace(['\t', '\n', '\r'], " ")
}

fn io_err(path: &Path, source: std::io::Error) -> ReportError {
    ReportError::Io {
        path: path.display().to_string(),
        source,
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage4_report.rs"]
mod tests;
