//! CLI basics, validation and export tests

mod common;

use common::{cogs, json_output, reference_dataset, write_file};
use predicates::prelude::*;
use tempfile::TempDir;

#[test]
fn test_help_displays() {
    let tmp = TempDir::new().unwrap();
    cogs(&tmp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("scenario"));
}

#[test]
fn test_version_displays() {
    let tmp = TempDir::new().unwrap();
    cogs(&tmp)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("cogs"));
}

#[test]
fn test_unknown_command_fails() {
    let tmp = TempDir::new().unwrap();
    cogs(&tmp)
        .arg("unknown-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_completions_bash() {
    let tmp = TempDir::new().unwrap();
    cogs(&tmp)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cogs"));
}

#[test]
fn test_sample_yaml() {
    let tmp = TempDir::new().unwrap();
    cogs(&tmp)
        .args(["sample", "--format", "yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("steps:"))
        .stdout(predicate::str::contains("currency: EUR"));
}

// ============================================================================
// Validate
// ============================================================================

#[test]
fn test_validate_reference_ok() {
    let tmp = TempDir::new().unwrap();
    let path = reference_dataset(&tmp);

    cogs(&tmp)
        .args(["validate", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("is valid"));
}

#[test]
fn test_validate_reports_every_issue() {
    let tmp = TempDir::new().unwrap();
    let path = write_file(
        &tmp,
        "bad.json",
        r#"{"volume": -5, "steps": [{"name": "Bad", "uph": 0, "availability": 1.2,
            "bom": [{"name": "Part", "scrap": 1.0}]}]}"#,
    );

    cogs(&tmp)
        .args(["validate", path.to_str().unwrap()])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Volume must not be negative"))
        .stdout(predicate::str::contains("UPH must be greater than zero"))
        .stdout(predicate::str::contains("availability must be between 0 and 1"))
        .stdout(predicate::str::contains("scrap must be in [0, 1)"))
        .stderr(predicate::str::contains("4 issue(s)"));
}

#[test]
fn test_validate_scenarios_against_dataset() {
    let tmp = TempDir::new().unwrap();
    let path = reference_dataset(&tmp);
    let scenarios = write_file(
        &tmp,
        "sc.json",
        r#"{"scenarios": [{"name": "Ghost", "modifications": [
            {"param": "uph", "step_idx": 3, "new_value": 10}]}]}"#,
    );

    let output = cogs(&tmp)
        .args([
            "validate",
            path.to_str().unwrap(),
            "--scenarios",
            scenarios.to_str().unwrap(),
            "-f",
            "json",
        ])
        .output()
        .unwrap();
    assert!(!output.status.success());
    let v: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(v["valid"], false);
    assert!(v["issues"][0].as_str().unwrap().contains("Ghost"));
}

// ============================================================================
// Export
// ============================================================================

#[test]
fn test_export_fills_defaults() {
    let tmp = TempDir::new().unwrap();
    let path = write_file(&tmp, "min.json", r#"{"steps": [{"name": "Only"}]}"#);

    let v = json_output(cogs(&tmp).args(["export", path.to_str().unwrap()]));
    assert_eq!(v["volume"], 100000.0);
    assert_eq!(v["currency"], "EUR");
    assert_eq!(v["steps"][0]["uph"], 60.0);
    assert_eq!(v["steps"][0]["yield"], 0.95);
    assert_eq!(v["steps"][0]["name"]["fr"], "Only");
}

#[test]
fn test_export_to_yaml_and_back() {
    let tmp = TempDir::new().unwrap();
    let path = reference_dataset(&tmp);

    cogs(&tmp)
        .args(["export", path.to_str().unwrap(), "--output", "copy.yaml"])
        .assert()
        .success();
    let yaml = std::fs::read_to_string(tmp.path().join("copy.yaml")).unwrap();
    assert!(yaml.contains("steps:"));

    let source = json_output(cogs(&tmp).args(["cost", path.to_str().unwrap(), "-f", "json"]));
    let copy = json_output(cogs(&tmp).args(["cost", "copy.yaml", "-f", "json"]));
    assert_eq!(source["report"], copy["report"]);
}
