//! End-to-end tests for the `capval` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const SCENARIO_A: &str = "10000,10000,10000,10000,10000";
const SCENARIO_B: &str = "20000,20000,20000,20000,20000";

fn capval() -> Command {
    let mut cmd = Command::cargo_bin("capval").unwrap();
    cmd.env_remove("CAPVAL_CONFIG").env_remove("RUST_LOG");
    cmd
}

fn analyze(flows: &str) -> Command {
    let mut cmd = capval();
    cmd.args(["analyze", "--investment", "50000", "--rate", "10", "--flows", flows]);
    cmd
}

#[test]
fn analyze_viable_project() {
    analyze(SCENARIO_B)
        .args(["--format", "minimal"])
        .assert()
        .success()
        .stdout(predicate::eq("viable\n"));
}

#[test]
fn analyze_not_viable_project() {
    analyze(SCENARIO_A)
        .args(["--format", "minimal"])
        .assert()
        .success()
        .stdout(predicate::eq("not viable\n"));
}

#[test]
fn analyze_table_shows_metrics() {
    analyze(SCENARIO_B)
        .assert()
        .success()
        .stdout(predicate::str::contains("25,815.74"))
        .stdout(predicate::str::contains("28.65%"))
        .stdout(predicate::str::contains("3 periods"));
}

#[test]
fn analyze_json_output() {
    let output = analyze(SCENARIO_B)
        .args(["--format", "json", "--flows-table"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["recommendation"], "viable");
    assert!((json["metrics"]["irr"].as_f64().unwrap() - 0.286_493).abs() < 1e-5);
    assert_eq!(json["metrics"]["payback"], 3);
    assert_eq!(json["flows"].as_array().unwrap().len(), 6);
}

#[test]
fn horizon_over_limit_is_rejected() {
    let flows = vec!["100"; 51].join(",");
    analyze(&flows)
        .assert()
        .failure()
        .stderr(predicate::str::contains("horizon"));
}

#[test]
fn rate_out_of_range_is_rejected() {
    capval()
        .args(["analyze", "--investment", "100", "--rate", "150", "--flows", "110"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid discount rate"));
}

#[test]
fn missing_rate_is_rejected() {
    capval()
        .args(["analyze", "--investment", "100", "--flows", "110"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--rate"));
}

#[test]
fn negative_flows_are_accepted() {
    capval()
        .args(["analyze", "--investment", "100", "--rate", "5", "--flows", "230,-132"])
        .args(["--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"irr_ambiguous\": true"));
}

#[test]
fn csv_input_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("flows.csv");
    fs::write(
        &path,
        "period,amount\n0,-50000\n1,20000\n2,20000\n3,20000\n4,20000\n5,20000\n",
    )
    .unwrap();

    capval()
        .args(["analyze", "--rate", "10", "--format", "minimal", "--input"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::eq("viable\n"));
}

#[test]
fn json_input_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("project.json");
    fs::write(
        &path,
        r#"{"horizon":5,"investment":50000,"discount_rate":0.10,"cash_flows":[10000,10000,10000,10000,10000]}"#,
    )
    .unwrap();

    capval()
        .args(["analyze", "--format", "minimal", "--input"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::eq("not viable\n"));
}

#[test]
fn irr_command() {
    capval()
        .args(["irr", "--investment", "100", "--flows", "110", "--format", "minimal"])
        .assert()
        .success()
        .stdout(predicate::eq("10.00%\n"));
}

#[test]
fn irr_unavailable_without_sign_change() {
    capval()
        .args(["irr", "--investment", "0", "--flows", "50,60"])
        .assert()
        .success()
        .stdout(predicate::str::contains("not available"));
}

#[test]
fn sweep_json_has_default_points() {
    let output = capval()
        .args(["sweep", "--investment", "50000", "--rate", "10", "--flows", SCENARIO_A])
        .args(["--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let points = json["points"].as_array().unwrap();
    assert_eq!(points.len(), 20);
    assert!(points[0]["rate"].as_f64().unwrap().abs() < 1e-12);
    assert!((points[19]["rate"].as_f64().unwrap() - 0.20).abs() < 1e-12);
}

#[test]
fn sweep_overrides() {
    capval()
        .args(["sweep", "--investment", "100", "--rate", "10", "--flows", "60,60"])
        .args(["--points", "5", "--width", "5", "--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("rate,npv\n"))
        .stdout(predicate::str::contains("0.05"));
}

#[test]
fn sweep_rejects_single_point() {
    capval()
        .args(["sweep", "--investment", "100", "--rate", "10", "--flows", "60,60"])
        .args(["--points", "1"])
        .assert()
        .failure();
}

#[test]
fn sweep_overrides_respect_configured_limits() {
    let sweep = |extra: &[&str]| {
        let mut cmd = capval();
        cmd.args(["sweep", "--investment", "100", "--rate", "10", "--flows", "60,60"])
            .args(extra);
        cmd
    };

    sweep(&["--points", "501"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("sensitivity.points"));

    sweep(&["--width", "500"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("sensitivity.half_width"));

    sweep(&["--points", "4000000000000000000"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("sensitivity.points"));
}

#[test]
fn report_written_to_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("out").join("report.md");

    capval()
        .args(["report", "--investment", "50000", "--rate", "10", "--flows", SCENARIO_B])
        .arg("--output")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Report written to"));

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("# Investment Viability Report"));
    for label in [
        "Net Present Value (NPV)",
        "Internal Rate of Return (IRR)",
        "Return on Investment (ROI)",
        "Margin of Safety",
        "Payback Period",
    ] {
        assert!(text.contains(label), "report is missing {label}");
    }
}

#[test]
fn report_to_stdout() {
    capval()
        .args(["report", "--investment", "50000", "--rate", "10", "--flows", SCENARIO_A])
        .assert()
        .success()
        .stdout(predicate::str::contains("## NPV Sensitivity"))
        .stdout(predicate::str::contains("A review of the cash flows is recommended."));
}

#[test]
fn config_init_then_show() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("capval").join("config.toml");

    capval()
        .arg("--config")
        .arg(&path)
        .args(["config", "init"])
        .assert()
        .success();
    assert!(path.is_file());

    capval()
        .arg("--config")
        .arg(&path)
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    capval()
        .arg("--config")
        .arg(&path)
        .args(["config", "show", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("npv-only"));
}

#[test]
fn config_file_changes_policy() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[recommendation]\npolicy = \"require-irr\"\n").unwrap();

    // all-positive flows have no IRR, so the strict policy rejects them
    capval()
        .arg("--config")
        .arg(&path)
        .args(["analyze", "--investment", "0", "--rate", "10", "--flows", "50,60"])
        .args(["--format", "minimal"])
        .assert()
        .success()
        .stdout(predicate::eq("not viable\n"));
}

#[test]
fn invalid_config_file_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[sensitivity]\npoints = 1\n").unwrap();

    analyze(SCENARIO_B)
        .arg("--config")
        .arg(&path)
        .assert()
        .failure();
}
