//! Sensitivity, scenario and pricing end-to-end tests

mod common;

use common::{approx, cogs, json_output, reference_dataset, write_file};
use predicates::prelude::*;
use tempfile::TempDir;

// ============================================================================
// Sensitivity
// ============================================================================

#[test]
fn test_sens_ranks_yield_first() {
    let tmp = TempDir::new().unwrap();
    let path = reference_dataset(&tmp);

    let v = json_output(cogs(&tmp).args(["sens", path.to_str().unwrap(), "-f", "json", "--lang", "en"]));
    // volume + 8 step parameters + 1 component price
    assert_eq!(v["total_parameters"], 10);
    let impacts = v["impacts"].as_array().unwrap();
    assert_eq!(impacts.len(), 10);
    assert_eq!(impacts[0]["param"], "Machining - Yield");
    approx(&impacts[0]["impact_high"], 3.698257 - 3.892903, 1e-4);
    approx(&impacts[0]["impact_low"], 3.698257 / 0.855 - 3.892903, 1e-4);

    let ranked: Vec<f64> = impacts.iter().map(|i| i["impact"].as_f64().unwrap()).collect();
    assert!(ranked.windows(2).all(|w| w[0] >= w[1]));
}

#[test]
fn test_sens_top_limits_rows() {
    let tmp = TempDir::new().unwrap();
    let path = reference_dataset(&tmp);

    let v = json_output(cogs(&tmp).args(["sens", path.to_str().unwrap(), "-f", "json", "-n", "3"]));
    assert_eq!(v["impacts"].as_array().unwrap().len(), 3);
    assert_eq!(v["total_parameters"], 10);
}

#[test]
fn test_sens_skips_zero_parameters() {
    let tmp = TempDir::new().unwrap();
    let path = write_file(
        &tmp,
        "lean.json",
        r#"{"volume": 1000, "steps": [{"name": "Lean", "voh_rate": 0, "foh_total": 0,
            "bom": [{"name": "Free", "price": 0}]}]}"#,
    );

    let v = json_output(cogs(&tmp).args(["sens", path.to_str().unwrap(), "-f", "json", "--all"]));
    assert_eq!(v["total_parameters"], 7);
}

#[test]
fn test_sens_table_mentions_hidden_rows() {
    let tmp = TempDir::new().unwrap();
    let path = reference_dataset(&tmp);

    cogs(&tmp)
        .args(["sens", path.to_str().unwrap(), "--top", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("+10%"))
        .stdout(predicate::str::contains("Showing 2 of 10"));
}

#[test]
fn test_sens_rejects_bad_delta() {
    let tmp = TempDir::new().unwrap();
    let path = reference_dataset(&tmp);

    cogs(&tmp)
        .args(["sens", path.to_str().unwrap(), "--delta", "1.5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("delta"));
}

#[test]
fn test_project_config_sets_top_n() {
    let tmp = TempDir::new().unwrap();
    let path = reference_dataset(&tmp);
    write_file(&tmp, ".cogs.yaml", "top_n: 4\nsensitivity_delta: 0.2\n");

    let v = json_output(cogs(&tmp).args(["sens", path.to_str().unwrap(), "-f", "json"]));
    assert_eq!(v["impacts"].as_array().unwrap().len(), 4);
    approx(&v["delta"], 0.2, 1e-12);
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_scenario_set_perfect_yield() {
    let tmp = TempDir::new().unwrap();
    let path = reference_dataset(&tmp);

    let v = json_output(cogs(&tmp).args([
        "scenario",
        path.to_str().unwrap(),
        "--set",
        "yield@1=1.0",
        "--name",
        "Perfect",
        "-f",
        "json",
    ]));
    let sc = &v["scenarios"][0];
    assert_eq!(sc["name"], "Perfect");
    approx(&sc["report"]["cogs_per_unit"], 3.698257, 1e-5);
    approx(&sc["report"]["rty"], 1.0, 1e-12);
    approx(&sc["delta"]["cogs_per_unit"], 3.698257 - 3.892903, 1e-5);
    assert!(sc["delta"]["cogs_pct"].as_f64().unwrap() < 0.0);
    // Baseline is untouched
    approx(&v["base"]["rty"], 0.95, 1e-12);
}

#[test]
fn test_scenario_volume_is_truncated() {
    let tmp = TempDir::new().unwrap();
    let path = reference_dataset(&tmp);

    let v = json_output(cogs(&tmp).args([
        "scenario",
        path.to_str().unwrap(),
        "--set",
        "volume=50000.9",
        "-f",
        "json",
    ]));
    approx(&v["scenarios"][0]["volume"], 50000.0, 0.0);
    approx(&v["scenarios"][0]["report"]["steps"][0]["foh"], 1.0, 1e-12);
}

#[test]
fn test_scenario_file_last_write_wins() {
    let tmp = TempDir::new().unwrap();
    let path = reference_dataset(&tmp);
    let scenarios = write_file(
        &tmp,
        "what_if.yaml",
        r#"scenarios:
  - name: Double shift
    modifications:
      - {param: nb_operators, step_idx: 0, new_value: 3}
      - {param: nb_operators, step_idx: 0, new_value: 2}
  - name: Bigger run
    modifications:
      - {param: volume, new_value: 200000}
"#,
    );

    let v = json_output(cogs(&tmp).args([
        "scenario",
        path.to_str().unwrap(),
        "--scenarios",
        scenarios.to_str().unwrap(),
        "-f",
        "json",
    ]));
    let outcomes = v["scenarios"].as_array().unwrap();
    assert_eq!(outcomes.len(), 2);
    approx(&outcomes[0]["report"]["steps"][0]["dl"], 50.0 / 45.9, 1e-9);
    approx(&outcomes[1]["report"]["steps"][0]["foh"], 0.25, 1e-12);
}

#[test]
fn test_scenario_ignores_missing_step_with_warning() {
    let tmp = TempDir::new().unwrap();
    let path = reference_dataset(&tmp);

    let output = cogs(&tmp)
        .args(["scenario", path.to_str().unwrap(), "--set", "uph@5=999", "-f", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("does not exist"));

    let v: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    approx(&v["scenarios"][0]["delta"]["cogs_per_unit"], 0.0, 0.0);
}

#[test]
fn test_scenario_table_shows_base_row() {
    let tmp = TempDir::new().unwrap();
    let path = reference_dataset(&tmp);

    cogs(&tmp)
        .args(["scenario", path.to_str().unwrap(), "--set", "dl_rate@1=30"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Base"))
        .stdout(predicate::str::contains("Scenario 1"))
        .stdout(predicate::str::contains("MATERIAL"));
}

#[test]
fn test_scenario_requires_input() {
    let tmp = TempDir::new().unwrap();
    let path = reference_dataset(&tmp);

    cogs(&tmp)
        .args(["scenario", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No scenarios"));
}

#[test]
fn test_scenario_rejects_bad_set_expression() {
    let tmp = TempDir::new().unwrap();
    let path = reference_dataset(&tmp);

    cogs(&tmp)
        .args(["scenario", path.to_str().unwrap(), "--set", "uph=80"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("needs a step"));
}

#[test]
fn test_scenario_count_limit() {
    let tmp = TempDir::new().unwrap();
    let path = reference_dataset(&tmp);
    let scenarios = write_file(
        &tmp,
        "many.json",
        r#"{"scenarios": [
            {"name": "A", "modifications": []},
            {"name": "B", "modifications": []},
            {"name": "C", "modifications": []},
            {"name": "D", "modifications": []}
        ]}"#,
    );

    cogs(&tmp)
        .args(["scenario", path.to_str().unwrap(), "-s", scenarios.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("at most 3"));
}

// ============================================================================
// Pricing
// ============================================================================

#[test]
fn test_price_from_margin() {
    let tmp = TempDir::new().unwrap();
    let path = reference_dataset(&tmp);

    let v = json_output(cogs(&tmp).args(["price", path.to_str().unwrap(), "--margin", "40", "-f", "json"]));
    approx(&v["selling_price"], 3.892903 / 0.6, 1e-5);
    approx(&v["margin_pct"], 40.0, 1e-9);
}

#[test]
fn test_margin_from_price() {
    let tmp = TempDir::new().unwrap();
    let path = reference_dataset(&tmp);

    let v = json_output(cogs(&tmp).args(["price", path.to_str().unwrap(), "--price", "5", "-f", "json"]));
    approx(&v["margin_pct"], (5.0 - 3.892903) / 5.0 * 100.0, 1e-3);
}

#[test]
fn test_price_rejects_margin_above_cap() {
    let tmp = TempDir::new().unwrap();
    let path = reference_dataset(&tmp);

    cogs(&tmp)
        .args(["price", path.to_str().unwrap(), "--margin", "90"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("between 0 and 80"));
}

#[test]
fn test_price_needs_a_mode() {
    let tmp = TempDir::new().unwrap();
    let path = reference_dataset(&tmp);

    cogs(&tmp)
        .args(["price", path.to_str().unwrap()])
        .assert()
        .failure();
}
