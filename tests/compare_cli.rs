//! E2E tests for the compare, regimes and schema commands

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::io::Write;
use std::process::{Command, Output, Stdio};

fn itax(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_itax"))
        .args(args)
        .output()
        .expect("Failed to execute command")
}

fn amount(value: &serde_json::Value) -> Decimal {
    value.as_str().unwrap().parse().unwrap()
}

/// Old regime taxpayer with no deductions is better off in the new regime
#[test]
fn compare_table_suggests_new_regime() {
    let output = itax(&["compare", "--income", "600000"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);

    assert!(stdout.contains("INCOME TAX COMPARISON (FY 2025-26, AY 2026-27)"));
    assert!(stdout.contains("Old Regime"));
    assert!(stdout.contains("New Regime"));
    assert!(stdout.contains("Total Tax Payable"));
    assert!(stdout.contains("₹33800.00"));
    assert!(stdout.contains("The New Regime (FY 2025-26) is more beneficial, saving ₹33800.00."));
}

/// JSON output carries both breakdowns and the savings
#[test]
fn compare_json_output() {
    let output = itax(&["compare", "--income", "5200000", "--salaried", "--json"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);

    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["financial_year"], "2025-26");
    assert_eq!(amount(&json["old_regime"]["taxable_income"]), dec!(5150000));
    assert_eq!(amount(&json["old_regime"]["surcharge"]), dec!(105000));
    assert_eq!(amount(&json["old_regime"]["total_tax"]), dec!(1521000));
    assert_eq!(amount(&json["new_regime"]["total_tax"]), dec!(1253200));
    assert_eq!(json["new_regime"]["regime"], "new");
    assert_eq!(json["cheaper_regime"], "new");
}

/// Requests can be read from a JSON file
#[test]
fn compare_from_input_file() {
    let output = itax(&[
        "compare",
        "--input",
        "tests/data/salaried_heavy_deductions.json",
        "--csv",
    ]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);

    assert!(stdout.starts_with("item,old_regime,new_regime"));
    assert!(stdout.contains("taxable_income,1125000.00,1925000.00"));
    assert!(stdout.contains("total_tax,156000.00,192400.00"));
}

/// Requests can be piped through stdin
#[test]
fn compare_from_stdin() {
    let mut child = Command::new(env!("CARGO_BIN_EXE_itax"))
        .args(["compare", "--input", "-", "--json"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("Failed to spawn command");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(br#"{"gross_income": 200000, "is_salaried": true}"#)
        .unwrap();
    let output = child.wait_with_output().unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("\"cheaper_regime\": \"equal\""));
}

/// Request flags cannot be mixed with a request file
#[test]
fn compare_input_file_conflicts_with_request_flags() {
    let file = "tests/data/salaried_heavy_deductions.json";
    for flags in [
        &["--salaried"][..],
        &["--age", "senior"][..],
        &["--section-80c", "1"][..],
        &["--other-deductions", "1"][..],
    ] {
        let mut args = vec!["compare", "--input", file];
        args.extend_from_slice(flags);
        let output = itax(&args);
        let stderr = String::from_utf8_lossy(&output.stderr);

        assert!(!output.status.success(), "accepted {:?}", flags);
        assert!(stderr.contains("cannot be used with"), "{}", stderr);
    }
}

/// Negative amounts are rejected before any calculation
#[test]
fn compare_rejects_negative_income() {
    let output = itax(&["compare", "--income", "-5"]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stderr.contains("gross income must not be negative"));
}

/// Only supported financial years are accepted
#[test]
fn compare_rejects_unsupported_year() {
    let output = itax(&["compare", "--income", "600000", "--year", "2031"]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stderr.contains("unsupported financial year"));
}

/// Rate tables for a senior citizen
#[test]
fn regimes_tables() {
    let output = itax(&["regimes", "--age", "senior"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);

    assert!(stdout.contains("Old Regime (FY 2025-26) - age 60 to 80"));
    assert!(stdout.contains("₹0.00 - ₹300000.00"));
    assert!(stdout.contains("New Regime (FY 2025-26)"));
    assert!(stdout.contains("No itemized deductions"));
}

/// JSON schema of the request
#[test]
fn schema_json() {
    let output = itax(&["schema"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("\"ComparisonRequest\""));
    assert!(stdout.contains("\"deductions\""));
}
