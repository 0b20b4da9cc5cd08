use std::fs;

use fmpart_core::errors::FmError;
use fmpart_engine::{load_config, PartitionConfig, ReductionRatio, SnapshotKind};

#[test]
fn missing_fields_take_defaults() {
    let config = PartitionConfig::from_yaml_str("num_parts: 4\n").unwrap();
    assert_eq!(config.num_parts, 4);
    assert_eq!(config.balance_tol, PartitionConfig::default().balance_tol);
    assert_eq!(config.snapshot, SnapshotKind::List);
    assert_eq!(config.multilevel.limit_size, 7);
    assert_eq!(config.multilevel.min_reduction, ReductionRatio { coarse: 5, fine: 3 });
}

#[test]
fn loads_a_full_document_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("run.yaml");
    fs::write(
        &path,
        "num_parts: 3\n\
         balance_tol: 0.45\n\
         snapshot: boundary\n\
         multilevel:\n  limit_size: 12\n  min_reduction:\n    coarse: 4\n    fine: 3\n\
         seed: 99\n",
    )
    .unwrap();

    let config = load_config(&path).unwrap();
    assert_eq!(config.num_parts, 3);
    assert_eq!(config.balance_tol, 0.45);
    assert_eq!(config.snapshot, SnapshotKind::Boundary);
    assert_eq!(config.multilevel.limit_size, 12);
    assert!(config.multilevel.min_reduction.accepts(8, 6));
    assert!(!config.multilevel.min_reduction.accepts(8, 7));
    assert_eq!(config.seed, 99);

    let reparsed = PartitionConfig::from_yaml_str(&config.to_yaml_string().unwrap()).unwrap();
    assert_eq!(reparsed, config);
    assert_eq!(reparsed.config_hash().unwrap(), config.config_hash().unwrap());
}

#[test]
fn invalid_values_are_config_errors_with_the_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.yaml");
    fs::write(&path, "balance_tol: 0.0\n").unwrap();

    let err = load_config(&path).unwrap_err();
    assert!(matches!(err, FmError::Config(_)));
    assert_eq!(err.info().code, "balance-tol");
    assert!(err.info().context.contains_key("path"));
}

#[test]
fn malformed_yaml_and_missing_files_are_reported() {
    let err = PartitionConfig::from_yaml_str("num_parts: [1, 2").unwrap_err();
    assert!(matches!(err, FmError::Serde(_)));
    assert_eq!(err.info().code, "config-parse");

    let dir = tempfile::tempdir().unwrap();
    let err = load_config(&dir.path().join("absent.yaml")).unwrap_err();
    assert!(matches!(err, FmError::Io(_)));
}

#[test]
fn config_hash_tracks_changes() {
    let base = PartitionConfig::default();
    let mut other = base.clone();
    other.seed += 1;
    assert_ne!(base.config_hash().unwrap(), other.config_hash().unwrap());
}
