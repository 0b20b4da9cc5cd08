use std::fs;
use std::path::Path;
use std::process::Command;

use serde_json::{json, Value};

fn fmpart() -> Command {
    Command::new(env!("CARGO_BIN_EXE_fmpart"))
}

fn write_chain(dir: &Path) -> std::path::PathBuf {
    let nets: Vec<Value> = (1..8u32).map(|v| json!({ "pins": [v - 1, v] })).collect();
    let netlist = json!({
        "modules": vec![json!({}); 8],
        "nets": nets,
    });
    let path = dir.join("chain.json");
    fs::write(&path, serde_json::to_string(&netlist).unwrap()).unwrap();
    path
}

#[test]
fn partition_writes_a_legal_report() {
    let dir = tempfile::tempdir().unwrap();
    let netlist = write_chain(dir.path());
    let hierarchy = dir.path().join("levels.json");
    fs::write(&hierarchy, "[[0, 0, 1, 1, 2, 2, 3, 3]]").unwrap();
    let report_path = dir.path().join("report.json");

    let status = fmpart()
        .args(["partition", "--tol", "0.5", "--netlist"])
        .arg(&netlist)
        .arg("--hierarchy")
        .arg(&hierarchy)
        .arg("--out")
        .arg(&report_path)
        .status()
        .expect("run fmpart partition");
    assert!(status.success());

    let report: Value = serde_json::from_str(&fs::read_to_string(&report_path).unwrap()).unwrap();
    assert_eq!(report["legal"], Value::Bool(true));
    assert_eq!(report["status"], "all-satisfied");
    assert_eq!(report["totalcost"], 1);
    assert_eq!(report["part"].as_array().map(Vec::len), Some(8));

    let output = fmpart()
        .arg("hash")
        .arg("--netlist")
        .arg(&netlist)
        .output()
        .expect("run fmpart hash");
    assert!(output.status.success());
    let hash = String::from_utf8(output.stdout).unwrap();
    assert_eq!(report["netlist_hash"].as_str(), Some(hash.trim()));
    assert_eq!(report["provenance"]["netlist_hash"], report["netlist_hash"]);
}

#[test]
fn bad_inputs_fail_cleanly() {
    let dir = tempfile::tempdir().unwrap();
    let netlist = write_chain(dir.path());
    let initial = dir.path().join("initial.json");
    fs::write(&initial, "[0, 1, 0]").unwrap();

    let output = fmpart()
        .args(["partition", "--netlist"])
        .arg(&netlist)
        .arg("--initial")
        .arg(&initial)
        .output()
        .expect("run fmpart partition");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("assignment-length"));

    let output = fmpart()
        .args(["partition", "--parts", "1", "--netlist"])
        .arg(&netlist)
        .output()
        .expect("run fmpart partition");
    assert!(!output.status.success());
}
