use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use flate2::Compression;
use flate2::write::GzEncoder;

use super::*;
use crate::model::hypothesis::HypothesisId;

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn make_temp_dir() -> PathBuf {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.push(format!("kira_confirm_input_test_{}_{}", std::process::id(), id));
    fs::create_dir_all(&dir).unwrap();
    dir
}

const DOC: &str = r#"{
    "topic": "Who wrote the memo",
    "hypotheses": [{"id": "alice", "label": "Alice"}, {"id": "bob"}],
    "clusters": [{
        "id": "style",
        "name": "Writing style",
        "evidence": [{"id": "e1", "summary": "Oxford commas"}],
        "judgments": [
            {"hypothesis_id": "alice", "Q": 2.0, "U": 5.0},
            {"hypothesis_id": "bob", "q": 1.0, "u": 1.0}
        ]
    }]
}"#;

#[test]
fn test_parse_analysis_fields_and_aliases() {
    let doc = parse_analysis(DOC).unwrap();
    assert_eq!(doc.topic.as_deref(), Some("Who wrote the memo"));
    assert_eq!(doc.hypotheses.len(), 2);
    assert_eq!(doc.hypotheses[0].label.as_deref(), Some("Alice"));
    assert_eq!(doc.hypotheses[1].label, None);

    let cluster = &doc.clusters[0];
    assert_eq!(cluster.display_name(), "Writing style");
    assert_eq!(cluster.evidence[0].summary.as_deref(), Some("Oxford commas"));
    assert_eq!(cluster.judgments[0].hypothesis_id, HypothesisId::from("alice"));
    assert_eq!(cluster.judgments[0].q, 2.0);
    assert_eq!(cluster.judgments[1].u, 1.0);
}

#[test]
fn test_parse_analysis_defaults() {
    let doc = parse_analysis("{}").unwrap();
    assert!(doc.topic.is_none());
    assert!(doc.hypotheses.is_empty());
    assert!(doc.clusters.is_empty());
}

#[test]
fn test_parse_analysis_rejects_missing_values() {
    let err = parse_analysis(r#"{"clusters": [{"id": "c", "judgments": [{"hypothesis_id": "a", "Q": 1}]}]}"#);
    assert!(err.is_err());
}

#[test]
fn test_load_analysis_plain_and_gz() {
    let dir = make_temp_dir();

    let plain = dir.join("analysis.json");
    fs::write(&plain, DOC).unwrap();
    let doc = load_analysis(&plain).unwrap();
    assert_eq!(doc.clusters.len(), 1);

    let gz = dir.join("analysis.json.gz");
    let mut enc = GzEncoder::new(File::create(&gz).unwrap(), Compression::default());
    enc.write_all(DOC.as_bytes()).unwrap();
    enc.finish().unwrap();
    let doc_gz = load_analysis(&gz).unwrap();
    assert_eq!(doc_gz.clusters[0].judgments, doc.clusters[0].judgments);
}

#[test]
fn test_load_analysis_errors() {
    let dir = make_temp_dir();
    let missing = dir.join("nope.json");
    assert!(matches!(
        load_analysis(&missing).unwrap_err(),
        InputError::MissingInput(_)
    ));

    let broken = dir.join("broken.json");
    fs::write(&broken, "{ not json").unwrap();
    assert!(matches!(
        load_analysis(&broken).unwrap_err(),
        InputError::Parse { .. }
    ));
}
