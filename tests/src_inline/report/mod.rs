use super::*;
use crate::model::hypothesis::HypothesisId;

fn hs(id: &str, lr: f64) -> HypothesisScore {
    HypothesisScore {
        hypothesis_id: HypothesisId::from(id),
        prior: 0.25,
        likelihood: 1.0,
        catchall: 1.0,
        lr,
        degenerate: false,
    }
}

#[test]
fn test_format_f64_6() {
    assert_eq!(format_f64_6(0.2), "0.200000");
    assert_eq!(format_f64_6(1000.0), "1000.000000");
}

#[test]
fn test_extremes_pick_strongest() {
    let scores = vec![hs("a", 2.0), hs("b", 40.0), hs("c", 0.5), hs("d", 0.01)];
    let (support, refute) = extremes(&scores);
    assert_eq!(support.unwrap().hypothesis_id.as_str(), "b");
    assert_eq!(refute.unwrap().hypothesis_id.as_str(), "d");
}

#[test]
fn test_extremes_ignore_neutral() {
    let scores = vec![hs("a", 1.0), hs("b", 1.0)];
    let (support, refute) = extremes(&scores);
    assert!(support.is_none());
    assert!(refute.is_none());
}

#[test]
fn test_support_labels() {
    assert_eq!(support_label(1000.0), "strong support");
    assert_eq!(support_label(3.0), "support");
    assert_eq!(support_label(1.0), "neutral");
    assert_eq!(support_label(0.5), "refutation");
    assert_eq!(support_label(0.001), "strong refutation");
}

#[test]
fn test_summary_scores_keep_infinity() {
    let score = CumulativeScore {
        hypothesis_id: HypothesisId::from("H1"),
        cumulative_score: f64::INFINITY,
        log10_score: f64::INFINITY,
        rank: 1,
    };
    let value = serde_json::to_value(&score).unwrap();
    assert_eq!(value["cumulative_score"], "inf");
    assert_eq!(value["log10_score"], "inf");

    let zero = CumulativeScore {
        cumulative_score: 0.0,
        log10_score: f64::NEG_INFINITY,
        ..score
    };
    let value = serde_json::to_value(&zero).unwrap();
    assert_eq!(value["cumulative_score"], 0.0);
    assert_eq!(value["log10_score"], "-inf");
}
