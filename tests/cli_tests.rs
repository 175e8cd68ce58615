use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

fn payslip_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("payslip"))
}

fn init_config(config_path: &Path) {
    payslip_cmd()
        .args(["-C", config_path.to_str().unwrap(), "init"])
        .assert()
        .success();
}

#[test]
fn test_help() {
    payslip_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Balanced payslip and payroll report renderer"));
}

#[test]
fn test_version() {
    payslip_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("payslip"));
}

#[test]
fn test_init_creates_config() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("payslip-config");

    payslip_cmd()
        .args(["-C", config_path.to_str().unwrap(), "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized payslip config"));

    assert!(config_path.join("config.toml").exists());
    assert!(config_path.join("sample-payslip.toml").exists());
    assert!(config_path.join("sample-report.toml").exists());
    assert!(config_path.join("output").is_dir());

    let sample = fs::read_to_string(config_path.join("sample-payslip.toml")).unwrap();
    assert!(sample.contains("There are no 100% or\n# RC amount rows"));
}

#[test]
fn test_init_fails_if_exists() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("payslip-config");

    init_config(&config_path);

    payslip_cmd()
        .args(["-C", config_path.to_str().unwrap(), "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_status_without_init() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("nonexistent");

    payslip_cmd()
        .args(["-C", config_path.to_str().unwrap(), "status"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_status() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("payslip-config");

    init_config(&config_path);

    payslip_cmd()
        .args(["-C", config_path.to_str().unwrap(), "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Payslip Status"))
        .stdout(predicate::str::contains("Your Company (Pvt) Ltd"))
        .stdout(predicate::str::contains("CrashNumberingGothic"))
        .stdout(predicate::str::contains("wkhtmltopdf"));
}

#[test]
fn test_render_sample_payslip() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("payslip-config");
    let output = temp_dir.path().join("out").join("slip.html");

    init_config(&config_path);

    payslip_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "render",
            config_path.join("sample-payslip.toml").to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Rendered payslip for Jane Perera"))
        .stdout(predicate::str::contains("Net pay: 55,340.00"));

    let html = fs::read_to_string(&output).unwrap();
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("Your Company (Pvt) Ltd | 12 Main Street, Colombo, Sri Lanka"));
    assert!(html.contains("Tel: +94 11 234 5678 | E-mail: payroll@example.com"));
    assert!(html.contains("31 March 2025"));
    assert!(html.contains(">Site Allowance</td>"));
    assert!(html.contains(">Loan</td>"));
    assert!(html.contains("Thank You for Being a Part with Us"));
    assert!(html.contains("PS-2025-03-0001"));
}

#[test]
fn test_render_default_output_path() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("payslip-config");

    init_config(&config_path);

    payslip_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "render",
            config_path.join("sample-payslip.toml").to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved:"));

    assert!(config_path
        .join("output")
        .join("PAYSLIP-EMP-0042-March-2025.html")
        .exists());
}

#[test]
fn test_render_json_input_uses_config_company() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("payslip-config");
    let input = temp_dir.path().join("slip.json");
    let output = temp_dir.path().join("slip.html");

    init_config(&config_path);
    fs::write(
        &input,
        r#"{
  "employee": { "name": "Kamal" },
  "amounts": { "gross_salary": 1000, "net_salary": 900 },
  "header_rows": [{ "label": "Hours", "value": 160 }],
  "earnings_rows": [{ "label": "Overtime", "value": 1000 }]
}"#,
    )
    .unwrap();

    payslip_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "render",
            input.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
        ])
        .assert()
        .success();

    let html = fs::read_to_string(&output).unwrap();
    assert!(html.contains("Your Company (Pvt) Ltd"));
    assert!(html.contains("Hours: 160"));
    assert!(html.contains(">Overtime</td>"));
    assert!(!html.contains(">Basic</td>"));
}

#[test]
fn test_render_missing_input() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("payslip-config");

    init_config(&config_path);

    payslip_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "render",
            temp_dir.path().join("missing.toml").to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_render_unsupported_input() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("payslip-config");
    let input = temp_dir.path().join("slip.yaml");

    init_config(&config_path);
    fs::write(&input, "employee: {}\n").unwrap();

    payslip_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "render",
            input.to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported input"));
}

#[test]
fn test_layout_shows_balancing() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("payslip-config");

    init_config(&config_path);

    payslip_cmd()
        .args([
            "layout",
            config_path.join("sample-payslip.toml").to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("EARNINGS"))
        .stdout(predicate::str::contains("Bike & Fuel"))
        .stdout(predicate::str::contains("(pre-rendered, 1 rows)"))
        .stdout(predicate::str::contains("Left padding:   0"))
        .stdout(predicate::str::contains("Right padding:  2"))
        .stdout(predicate::str::contains("Pre-rendered:   1"));
}

#[test]
fn test_report_deposit_tools() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("payslip-config");
    let output = temp_dir.path().join("deposit.html");

    init_config(&config_path);

    payslip_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "report",
            "deposit-tools",
            config_path.join("sample-report.toml").to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Rendered Deposit/Tools Report"))
        .stdout(predicate::str::contains("Rows:   2"));

    let html = fs::read_to_string(&output).unwrap();
    assert!(html.contains("Period: March 2025 | Date: March 31, 2025"));
    assert!(html.contains("Nimal Silva"));
    assert!(html.contains("N/A"));
    assert!(html.contains("TOTAL DEPOSIT"));
    assert!(html.contains("4,500"));
}

#[test]
fn test_report_rejects_unknown_kind() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("payslip-config");

    init_config(&config_path);

    payslip_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "report",
            "bonuses",
            config_path.join("sample-report.toml").to_str().unwrap(),
        ])
        .assert()
        .failure();
}
