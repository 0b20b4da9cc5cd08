use fmpart_core::errors::{ErrorInfo, FmError};

fn sample_info(code: &str, message: &str) -> ErrorInfo {
    ErrorInfo::new(code, message)
        .with_context("id", "1")
        .with_context("reason", "example")
}

#[test]
fn graph_error_surface() {
    let err = FmError::Graph(sample_info("G001", "unknown module"));
    assert_eq!(err.info().code, "G001");
    assert!(err.info().context.contains_key("id"));
}

#[test]
fn partition_error_surface() {
    let err = FmError::partition("P001", "assignment too short").with_context("expected", 4);
    assert_eq!(err.info().code, "P001");
    assert_eq!(err.info().context.get("expected"), Some(&"4".to_string()));
    assert!(matches!(err, FmError::Partition(_)));
}

#[test]
fn config_error_keeps_hint() {
    let err = FmError::config("C001", "bad tolerance").with_hint("use a value in (0, 1]");
    assert_eq!(err.info().hint.as_deref(), Some("use a value in (0, 1]"));
    let rendered = err.to_string();
    assert!(rendered.starts_with("config error: bad tolerance (code: C001)"));
    assert!(rendered.contains("hint: use a value in (0, 1]"));
}

#[test]
fn serde_error_round_trips_json() {
    let err = FmError::Serde(sample_info("S001", "schema mismatch"));
    let json = serde_json::to_string(&err).unwrap();
    let decoded: FmError = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded, err);
}

#[test]
fn io_error_records_path() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
    let err = FmError::io(&io, "/tmp/netlist.json");
    assert_eq!(err.info().code, "io");
    assert_eq!(
        err.info().context.get("path"),
        Some(&"/tmp/netlist.json".to_string())
    );
}
