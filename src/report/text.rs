use crate::model::analysis::Hypothesis;
use crate::model::float_repr::non_finite_label;
use crate::model::scores::CumulativeScore;
use crate::report::{ClusterSummary, SummaryData, extremes, format_f64_6, support_label};

pub fn render_report_text(data: &SummaryData) -> String {
    let mut out = String::new();

    out.push_str("Hypothesis Confirmation Report\n");
    out.push_str("==============================\n\n");

    if let Some(topic) = &data.input.topic {
        out.push_str(&format!("Topic: {}\n", topic));
    }
    out.push_str(&format!(
        "Hypotheses: {}\nEvidence clusters: {}\n",
        data.input.n_hypotheses, data.input.n_clusters
    ));
    out.push_str(&format!(
        "Zero prior mass policy: {}\n",
        data.policy.zero_mass().label()
    ));
    out.push_str(&format!(
        "LR bounds: [{}, {}]\n\n",
        format_f64_6(data.policy.lr_min()),
        format_f64_6(data.policy.lr_max())
    ));

    out.push_str("1. Overall ranking\n");
    for entry in &data.ranking {
        out.push_str(&format!(
            "{}. {} cumulative={} log10={} ({})\n",
            entry.rank,
            hypothesis_name(&data.hypotheses, entry),
            format_score(entry.cumulative_score),
            format_score(entry.log10_score),
            support_label(entry.cumulative_score)
        ));
    }
    out.push_str(&format!("Conclusion: {}\n\n", leader_statement(&data.ranking)));

    out.push_str("2. Evidence clusters\n");
    if data.clusters.is_empty() {
        out.push_str("No evidence clusters scored.\n");
    }
    for cluster in &data.clusters {
        out.push_str(&cluster_line(cluster));
    }
    out.push('\n');

    out.push_str("3. Quality and caveats\n");
    let degenerate = data
        .clusters
        .iter()
        .flat_map(|c| c.scores.iter())
        .filter(|s| s.degenerate)
        .count();
    out.push_str(&format!("Near-certain prior short-circuits: {}\n", degenerate));
    let zero_mass = data
        .clusters
        .iter()
        .filter(|c| !c.scores.is_empty() && c.prior_sum == 0.0)
        .count();
    out.push_str(&format!("Clusters with zero prior mass: {}\n", zero_mass));
    if data.skipped.is_empty() {
        out.push_str("Skipped clusters: none\n");
    } else {
        out.push_str(&format!("Skipped clusters: {}\n", data.skipped.len()));
        for s in &data.skipped {
            out.push_str(&format!("  {}: {}\n", s.cluster_id, s.reason));
        }
    }

    out
}

fn cluster_line(cluster: &ClusterSummary) -> String {
    let (support, refute) = extremes(&cluster.scores);
    let support = support
        .map(|s| format!("{} (LR {})", s.hypothesis_id, format_f64_6(s.lr)))
        .unwrap_or_else(|| "none".to_string());
    let refute = refute
        .map(|s| format!("{} (LR {})", s.hypothesis_id, format_f64_6(s.lr)))
        .unwrap_or_else(|| "none".to_string());
    format!(
        "{} [{} evidence]: supports {}; refutes {}\n",
        cluster.name, cluster.n_evidence, support, refute
    )
}

fn hypothesis_name(hypotheses: &[Hypothesis], entry: &CumulativeScore) -> String {
    hypotheses
        .iter()
        .find(|h| h.id == entry.hypothesis_id)
        .and_then(|h| h.label.as_ref())
        .map(|label| format!("{} ({})", entry.hypothesis_id, label))
        .unwrap_or_else(|| entry.hypothesis_id.to_string())
}

fn format_score(v: f64) -> String {
    if v.is_finite() {
        format_f64_6(v)
    } else {
        non_finite_label(v).to_string()
    }
}

fn leader_statement(ranking: &[CumulativeScore]) -> String {
    match ranking {
        [] => "no hypotheses ranked".to_string(),
        [only] => format!("{} is the only hypothesis under consideration", only.hypothesis_id),
        [first, second, ..] => {
            let factor = ratio(first.cumulative_score, second.cumulative_score);
            if first.cumulative_score == second.cumulative_score || factor.is_nan() {
                format!(
                    "{} and {} are tied on the combined evidence",
                    first.hypothesis_id, second.hypothesis_id
                )
            } else if factor.is_infinite() {
                format!(
                    "{} leads; combined evidence favours it over {} beyond the representable range",
                    first.hypothesis_id, second.hypothesis_id
                )
            } else {
                format!(
                    "{} leads; combined evidence favours it over {} by a factor of {}",
                    first.hypothesis_id,
                    second.hypothesis_id,
                    format_f64_6(factor)
                )
            }
        }
    }
}

fn ratio(a: f64, b: f64) -> f64 {
    if b > 0.0 { a / b } else { f64::INFINITY }
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/text.rs"]
mod tests;
