use super::*;
use crate::model::scores::HypothesisScore;

fn lr_map(entries: &[(&str, f64)]) -> BTreeMap<HypothesisId, f64> {
    entries
        .iter()
        .map(|(id, lr)| (HypothesisId::from(*id), *lr))
        .collect()
}

fn hs(id: &str, lr: f64) -> HypothesisScore {
    HypothesisScore {
        hypothesis_id: HypothesisId::from(id),
        prior: 0.5,
        likelihood: 1.0,
        catchall: 1.0,
        lr,
        degenerate: false,
    }
}

#[test]
fn test_combine_empty() {
    assert!(combine(&[]).is_empty());
}

#[test]
fn test_combine_product_rule() {
    let clusters = vec![lr_map(&[("H", 4.0)]), lr_map(&[("H", 0.5)])];
    let out = combine(&clusters);
    assert_eq!(out[&HypothesisId::from("H")], 2.0);
}

#[test]
fn test_combine_neutral_clusters_stay_neutral() {
    let clusters = vec![
        lr_map(&[("H", 1.0), ("G", 3.0)]),
        lr_map(&[("H", 1.0), ("G", 0.25)]),
        lr_map(&[("H", 1.0)]),
    ];
    let out = combine(&clusters);
    assert_eq!(out[&HypothesisId::from("H")], 1.0);
    assert_eq!(out[&HypothesisId::from("G")], 0.75);
}

#[test]
fn test_missing_entry_is_neutral_factor() {
    let clusters = vec![lr_map(&[("A", 8.0), ("B", 2.0)]), lr_map(&[("A", 0.5)])];
    let out = combine(&clusters);
    assert_eq!(out[&HypothesisId::from("A")], 4.0);
    assert_eq!(out[&HypothesisId::from("B")], 2.0);
}

#[test]
fn test_combine_is_order_independent() {
    let a = lr_map(&[("A", 2.0), ("B", 0.5)]);
    let b = lr_map(&[("A", 8.0), ("B", 4.0)]);
    let c = lr_map(&[("A", 0.25)]);
    let forward = combine(&[a.clone(), b.clone(), c.clone()]);
    let backward = combine(&[c, b, a]);
    assert_eq!(forward, backward);
}

#[test]
fn test_combine_applies_no_bounds() {
    let clusters = vec![lr_map(&[("H", 1000.0)]), lr_map(&[("H", 1000.0)])];
    let out = combine(&clusters);
    assert_eq!(out[&HypothesisId::from("H")], 1.0e6);
}

#[test]
fn test_combine_for_includes_unmentioned_hypotheses() {
    let ids = vec![HypothesisId::from("A"), HypothesisId::from("Z")];
    let out = combine_for(&ids, &[lr_map(&[("A", 3.0)])]);
    assert_eq!(out.len(), 2);
    assert_eq!(out[&HypothesisId::from("Z")], 1.0);
}

#[test]
fn test_combine_results_uses_scorer_output() {
    let results = vec![
        ClusterResult {
            cluster_id: "c1".to_string(),
            scores: vec![hs("H1", 5.0), hs("H2", 0.2)],
        },
        ClusterResult {
            cluster_id: "c2".to_string(),
            scores: vec![hs("H1", 2.0), hs("H2", 0.5)],
        },
    ];
    let out = combine_results(&results);
    assert_eq!(out[&HypothesisId::from("H1")], 10.0);
    assert_eq!(out[&HypothesisId::from("H2")], 0.1);
}

#[test]
fn test_rank_orders_by_score_then_id() {
    let cumulative = lr_map(&[("B", 2.0), ("A", 2.0), ("C", 10.0), ("D", 0.1)]);
    let ranking = rank(&cumulative);
    let ids = ranking
        .iter()
        .map(|r| r.hypothesis_id.as_str())
        .collect::<Vec<_>>();
    assert_eq!(ids, vec!["C", "A", "B", "D"]);
    assert_eq!(ranking[0].rank, 1);
    assert_eq!(ranking[3].rank, 4);
    assert!((ranking[0].log10_score - 1.0).abs() < 1e-12);
    assert!((ranking[3].log10_score + 1.0).abs() < 1e-12);
}

#[test]
fn test_log10_display_of_non_positive() {
    assert_eq!(log10_display(1.0), 0.0);
    assert_eq!(log10_display(0.0), f64::NEG_INFINITY);
}

#[test]
fn test_run_stage3_ranks_all_hypotheses() {
    let ids = vec![HypothesisId::from("H1"), HypothesisId::from("H2")];
    let results = vec![ClusterResult {
        cluster_id: "c1".to_string(),
        scores: vec![hs("H1", 0.5), hs("H2", 3.0)],
    }];
    let ranking = run_stage3(&ids, &results);
    assert_eq!(ranking.len(), 2);
    assert_eq!(ranking[0].hypothesis_id, HypothesisId::from("H2"));
    assert_eq!(ranking[0].cumulative_score, 3.0);
}
