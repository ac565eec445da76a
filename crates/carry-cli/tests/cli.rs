//! End-to-end tests for the `carry` binary.

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::NamedTempFile;

fn carry() -> Command {
    let mut cmd = Command::cargo_bin("carry").unwrap();
    cmd.env_remove("CARRY_CONFIG").env_remove("RUST_LOG");
    cmd
}

const BOND: [&str; 6] = ["--coupon", "4", "--maturity", "2026-01-01", "--tenor", "2"];

#[test]
fn test_help_lists_commands() {
    carry()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("schedule"))
        .stdout(predicate::str::contains("basis"))
        .stdout(predicate::str::contains("demo"));
}

#[test]
fn test_schedule_table() {
    carry()
        .args(["schedule", "--maturity", "2026-01-01", "--tenor", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2024-07-01"))
        .stdout(predicate::str::contains("2025-07-01"))
        .stdout(predicate::str::contains("2026-01-01"));
}

#[test]
fn test_schedule_csv_month_end() {
    carry()
        .args(["--format", "csv", "schedule", "--maturity", "2026-02-28", "--tenor", "1"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("period,start,payment,days"))
        .stdout(predicate::str::contains("1,2025-02-28,2025-08-31,184"))
        .stdout(predicate::str::contains("2,2025-08-31,2026-02-28,181"));
}

#[test]
fn test_schedule_rejects_zero_tenor() {
    carry()
        .args(["schedule", "--maturity", "2026-01-01", "--tenor", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("tenor"));
}

#[test]
fn test_price_minimal() {
    carry()
        .args(["--format", "minimal", "price"])
        .args(BOND)
        .args(["--yield", "3", "--settlement", "2025-03-15"])
        .assert()
        .success()
        .stdout("101.581347\n");
}

#[test]
fn test_price_table_shows_accrual_detail() {
    carry()
        .arg("price")
        .args(BOND)
        .args(["--yield", "3", "--settlement", "2025-03-15"])
        .assert()
        .success()
        .stdout(predicate::str::contains("102.387977"))
        .stdout(predicate::str::contains("0.806630"))
        .stdout(predicate::str::contains("73 / 181"));
}

#[test]
fn test_price_json() {
    let output = carry()
        .args(["--format", "json", "price"])
        .args(BOND)
        .args(["--yield", "3", "--settlement", "2025-03-15"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let clean = json["clean_price"].as_f64().unwrap();
    let dirty = json["dirty_price"].as_f64().unwrap();
    let accrued = json["accrued"]["amount"].as_f64().unwrap();

    assert!((clean - 101.581_347_141).abs() < 1e-8);
    assert!((dirty - (clean + accrued)).abs() < 1e-12);
    assert_eq!(json["accrued"]["last_coupon"], "2025-01-01");
}

#[test]
fn test_price_settlement_outside_schedule() {
    carry()
        .arg("price")
        .args(BOND)
        .args(["--yield", "3", "--settlement", "2026-06-01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No coupon period"));
}

#[test]
fn test_price_without_tenor_uses_covering_schedule() {
    carry()
        .args(["--format", "minimal", "price", "--coupon", "4", "--maturity", "2026-01-01"])
        .args(["--yield", "3", "--settlement", "2025-03-15"])
        .assert()
        .success()
        .stdout("101.581347\n");

    carry()
        .args(["--format", "json", "price", "--coupon", "4", "--maturity", "2026-01-01"])
        .args(["--yield", "3", "--settlement", "2024-03-15"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"tenor_years\": 2"));
}

#[test]
fn test_price_invalid_date() {
    carry()
        .args(["price", "--coupon", "4", "--maturity", "01/01/2026", "--tenor", "2"])
        .args(["--yield", "3", "--settlement", "2025-03-15"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid date format"));
}

#[test]
fn test_yield_par_bond() {
    carry()
        .args(["--format", "minimal", "yield"])
        .args(["--coupon", "5", "--tenor", "5", "--price", "100"])
        .assert()
        .success()
        .stdout("0.05000000\n");
}

#[test]
fn test_yield_secant_matches_newton() {
    for method in ["newton", "secant"] {
        carry()
            .args(["--format", "minimal", "yield"])
            .args(["--coupon", "4", "--tenor", "2", "--price", "101.92719232377593"])
            .args(["--method", method])
            .assert()
            .success()
            .stdout("0.03000000\n");
    }
}

#[test]
fn test_yield_rejects_unknown_method() {
    carry()
        .args(["yield", "--coupon", "4", "--tenor", "2", "--price", "100"])
        .args(["--method", "bisection"])
        .assert()
        .failure();
}

#[test]
fn test_yield_rejects_non_positive_price() {
    carry()
        .args(["yield", "--coupon", "4", "--tenor", "2", "--price", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid price"));
}

#[test]
fn test_futures_json() {
    let output = carry()
        .args(["--format", "json", "futures"])
        .args(BOND)
        .args(["--yield", "3", "--futures", "105"])
        .args(["--delivery", "2025-10-01", "--settlement", "2025-03-15"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!((json["conversion_factor"].as_f64().unwrap() - 1.0049).abs() < 1e-12);
    assert!((json["implied_repo_rate"].as_f64().unwrap() - 0.072_545_055).abs() < 1e-8);
    assert!((json["implied_forward_yield"].as_f64().unwrap() - 0.018_449_528).abs() < 1e-6);
    assert!((json["ai_delivery"].as_f64().unwrap() - 1.0).abs() < 1e-12);
}

#[test]
fn test_basis_minimal() {
    carry()
        .args(["--format", "minimal", "basis"])
        .args(BOND)
        .args(["--yield", "3", "--futures", "105", "--repo", "4"])
        .args(["--delivery", "2025-10-01", "--settlement", "2025-03-15"])
        .assert()
        .success()
        .stdout("-4.04460481\n");
}

#[test]
fn test_basis_table_report() {
    carry()
        .arg("basis")
        .args(BOND)
        .args(["--yield", "3", "--futures", "105", "--repo", "4"])
        .args(["--delivery", "2025-10-01", "--settlement", "2025-03-15"])
        .assert()
        .success()
        .stdout(predicate::str::contains("-4.12652302"))
        .stdout(predicate::str::contains("-0.08191821"))
        .stdout(predicate::str::contains("102.38797698"));
}

#[test]
fn test_basis_delivery_before_settlement() {
    carry()
        .arg("basis")
        .args(BOND)
        .args(["--yield", "3", "--futures", "105", "--repo", "4"])
        .args(["--delivery", "2025-03-01", "--settlement", "2025-03-15"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid date range"));
}

#[test]
fn test_demo_headline() {
    carry()
        .args(["--format", "minimal", "demo"])
        .assert()
        .success()
        .stdout("-4.04460481\n");
}

#[test]
fn test_demo_json_sections() {
    let output = carry().args(["--format", "json", "demo"]).output().unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(json["quote"]["clean_price"].is_number());
    assert!((json["yield_from_dirty"]["yield_value"].as_f64().unwrap() - 0.027_644_69).abs() < 1e-8);
    assert!(json["futures"]["implied_repo_rate"].is_number());
    assert!(json["basis"]["basis_net_of_carry"].is_number());
}

#[test]
fn test_demo_whole_period_scenarios() {
    carry()
        .args(["--format", "minimal", "demo", "--scenario", "long-bond"])
        .assert()
        .success()
        .stdout("97.844454\n");

    carry()
        .args(["--format", "minimal", "demo", "--scenario", "zero-strip"])
        .assert()
        .success()
        .stdout("64.081647\n");
}

#[test]
fn test_demo_pre_issue_accrues_from_prior_coupon() {
    let output = carry()
        .args(["--format", "json", "demo", "--scenario", "pre-issue"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["whole_periods"].as_u64(), Some(4));
    assert!((json["clean_price"].as_f64().unwrap() - 100.189_466_000_931_82).abs() < 1e-9);
    assert!((json["accrued_interest"].as_f64().unwrap() - 1.797_554_347_826_087).abs() < 1e-12);
    assert!((json["implied_yield"]["yield_value"].as_f64().unwrap() - 0.044).abs() < 1e-8);
}

#[test]
fn test_config_file_overrides_repo_basis() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "[conventions]\nrepo_basis = \"act365\"").unwrap();

    carry()
        .args(["--format", "json", "config", "show"])
        .arg("--config")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"act365\""));

    carry()
        .args(["--format", "minimal", "demo"])
        .arg("--config")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("-4.04460481").not());
}

#[test]
fn test_config_from_environment() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "[solver]\nmethod = \"secant\"").unwrap();

    carry()
        .env("CARRY_CONFIG", file.path())
        .args(["--format", "json", "config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"secant\""));
}

#[test]
fn test_missing_config_file() {
    carry()
        .args(["--config", "/nonexistent/carry.toml", "demo"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration file not found"));
}

#[test]
fn test_invalid_config_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "[bond]\nfrequency = 3").unwrap();

    carry()
        .arg("--config")
        .arg(file.path())
        .args(["config", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
}
