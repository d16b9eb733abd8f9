use super::*;
use crate::input::parse_analysis;
use crate::model::hypothesis::HypothesisId;

const DOC: &str = r#"{
    "topic": "Bridge failure",
    "hypotheses": [{"id": "fatigue"}, {"id": "overload"}, {"id": "corrosion"}],
    "clusters": [
        {
            "id": "strain-gauges",
            "judgments": [
                {"hypothesis_id": "fatigue", "Q": 1.0, "U": 4.0},
                {"hypothesis_id": "overload", "Q": 1.0, "U": 1.0},
                {"hypothesis_id": "corrosion", "Q": 1.0, "U": 1.0}
            ]
        },
        {
            "id": "inspection",
            "judgments": [
                {"hypothesis_id": "corrosion", "q": 1.0, "u": 1.0},
                {"hypothesis_id": "fatigue", "q": 1.0, "u": 1.0},
                {"hypothesis_id": "overload", "q": 1.0, "u": 1.0}
            ]
        }
    ]
}"#;

#[test]
fn test_run_analysis_end_to_end() {
    let doc = parse_analysis(DOC).unwrap();
    let run = run_analysis(doc, ValidationMode::Strict, &ScoringPolicy::default_v1()).unwrap();

    assert_eq!(run.results.len(), 2);
    assert!(run.skipped.is_empty());
    assert_eq!(run.ranking.len(), 3);
    assert_eq!(run.ranking[0].hypothesis_id, HypothesisId::from("fatigue"));
    // U_not = 1 for fatigue in the first cluster, the second is neutral.
    assert!((run.ranking[0].cumulative_score - 4.0).abs() < 1e-9);

    for result in &run.results {
        assert!((result.prior_sum() - 1.0).abs() < 1e-12);
    }
    let inspection = &run.results[1];
    assert_eq!(
        inspection.scores[0].hypothesis_id,
        HypothesisId::from("fatigue")
    );
}

#[test]
fn test_run_analysis_rejects_invalid_in_strict_mode() {
    let doc = parse_analysis(
        r#"{"hypotheses": [{"id": "a"}, {"id": "b"}],
            "clusters": [{"id": "c", "judgments": [{"hypothesis_id": "a", "Q": 1, "U": 1}]}]}"#,
    )
    .unwrap();
    let err = run_analysis(doc, ValidationMode::Strict, &ScoringPolicy::default_v1()).unwrap_err();
    assert!(matches!(err, ValidationError::MissingJudgment { .. }));
}

#[test]
fn test_run_analysis_without_clusters_is_neutral() {
    let doc = parse_analysis(r#"{"hypotheses": [{"id": "a"}, {"id": "b"}]}"#).unwrap();
    let run = run_analysis(doc, ValidationMode::Strict, &ScoringPolicy::default_v1()).unwrap();
    assert!(run.results.is_empty());
    for entry in &run.ranking {
        assert_eq!(entry.cumulative_score, 1.0);
        assert_eq!(entry.log10_score, 0.0);
    }
    assert_eq!(run.ranking[0].hypothesis_id, HypothesisId::from("a"));
}
