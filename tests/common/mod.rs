//! Shared test helpers for integration tests

#![allow(dead_code)]

use assert_cmd::cargo;
use assert_cmd::Command;
use std::path::PathBuf;
use tempfile::TempDir;

/// One step, one component: the hand-checked reference process
pub const REFERENCE_DATASET: &str = r#"{
  "name": {"en": "Reference"},
  "volume": 100000,
  "currency": "EUR",
  "steps": [
    {
      "name": {"fr": "Usinage", "en": "Machining"},
      "uph": 60,
      "availability": 0.9,
      "performance": 0.85,
      "yield": 0.95,
      "nb_operators": 1,
      "dl_rate": 25,
      "voh_rate": 30,
      "foh_total": 50000,
      "bom": [{"name": {"en": "Blank"}, "qty": 1, "price": 2, "scrap": 0}]
    }
  ]
}"#;

/// Helper to get a cogs command isolated from the user's config and env
pub fn cogs(tmp: &TempDir) -> Command {
    let mut cmd = Command::new(cargo::cargo_bin!("cogs"));
    cmd.current_dir(tmp.path())
        .env("XDG_CONFIG_HOME", tmp.path().join(".config"))
        .env("HOME", tmp.path())
        .env_remove("COGS_LANG")
        .env_remove("COGS_CURRENCY")
        .env_remove("RUST_LOG");
    cmd
}

/// Write a file into the temp directory and return its path
pub fn write_file(tmp: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = tmp.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

/// Write the reference dataset and return its path
pub fn reference_dataset(tmp: &TempDir) -> PathBuf {
    write_file(tmp, "reference.json", REFERENCE_DATASET)
}

/// Run a command and parse its stdout as JSON
pub fn json_output(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.output().unwrap();
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

pub fn approx(actual: &serde_json::Value, expected: f64, tol: f64) {
    let value = actual.as_f64().unwrap();
    assert!(
        (value - expected).abs() <= tol,
        "expected {} ± {}, got {}",
        expected,
        tol,
        value
    );
}
