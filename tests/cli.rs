use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const LEDGER: &str = r#"[
    {"id": 1, "accountId": 1, "accountName": "Checking", "amount": 100, "type": "IN", "date": "2024-01-15", "categoryName": "Salary", "description": "Payroll"},
    {"id": 2, "accountId": 1, "accountName": "Checking", "amount": 40, "type": "OUT", "date": "2024-01-20", "categoryName": "Food", "description": "Groceries"},
    {"id": 3, "accountId": 1, "accountName": "Checking", "amount": 60, "type": "OUT", "date": "2024-02-05", "categoryName": "Food", "description": "Market"},
    {"id": 4, "accountId": 1, "accountName": "Checking", "amount": 200, "type": "OUT", "date": "2024-02-10", "transferId": "t-1"},
    {"id": 5, "accountId": 2, "accountName": "Savings", "amount": 200, "type": "IN", "date": "2024-02-10", "transferId": "t-1"},
    {"id": 6, "accountId": 1, "accountName": "Checking", "amount": 75, "type": "OUT", "date": "2024-02-12"},
    {"id": 7, "accountId": 2, "accountName": "Savings", "amount": 75, "type": "IN", "date": "2024-02-14"}
]"#;

const BROKEN: &str = r#"[
    {"id": 1, "accountId": 1, "amount": 100, "type": "IN", "date": "2024-01-15"},
    {"id": 2, "accountId": 1, "amount": 40, "type": "OUT", "date": "not a date"}
]"#;

fn ledgerlens(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("ledgerlens").unwrap();
    cmd.env("LEDGERLENS_HOME", home)
        .env_remove("LEDGERLENS_SNAPSHOT")
        .env_remove("RUST_LOG");
    cmd
}

fn setup(contents: &str) -> (TempDir, std::path::PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let snapshot = temp_dir.path().join("ledger.json");
    fs::write(&snapshot, contents).unwrap();
    (temp_dir, snapshot)
}

#[test]
fn dashboard_json_excludes_transfers() {
    let (temp_dir, snapshot) = setup(LEDGER);

    let output = ledgerlens(temp_dir.path())
        .arg("dashboard")
        .arg(&snapshot)
        .args(["--all", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["totals"]["totalIncome"], 175.0);
    assert_eq!(json["totals"]["totalExpenses"], 175.0);
    assert_eq!(json["totals"]["netBalance"], 0.0);
    assert_eq!(json["transactionCount"], 7);
    assert!(json["expenseComparison"].is_null());
}

#[test]
fn dashboard_month_has_comparison() {
    let (temp_dir, snapshot) = setup(LEDGER);

    let output = ledgerlens(temp_dir.path())
        .arg("dashboard")
        .arg(&snapshot)
        .args(["--range", "2024-02", "-f", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["range"]["start"], "2024-02-01");
    assert_eq!(json["expenseComparison"]["period"], "previous period");
    // 135 this window against 40 in 2024-01-03..2024-01-31
    assert_eq!(json["expenseComparison"]["percentageChange"], 237.5);
}

#[test]
fn dashboard_text_output() {
    let (temp_dir, snapshot) = setup(LEDGER);

    ledgerlens(temp_dir.path())
        .arg("dashboard")
        .arg(&snapshot)
        .assert()
        .success()
        .stdout(predicate::str::contains("Dashboard: all transactions"))
        .stdout(predicate::str::contains("Food"))
        .stdout(predicate::str::contains("€175.00"));
}

#[test]
fn reversed_range_fails() {
    let (temp_dir, snapshot) = setup(LEDGER);

    ledgerlens(temp_dir.path())
        .arg("dashboard")
        .arg(&snapshot)
        .args(["--start", "2024-03-01", "--end", "2024-01-01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("after end"));
}

#[test]
fn bad_records_are_skipped_and_reported() {
    let (temp_dir, snapshot) = setup(BROKEN);

    ledgerlens(temp_dir.path())
        .arg("dashboard")
        .arg(&snapshot)
        .args(["--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"totalIncome\": 100.0"))
        .stdout(predicate::str::contains("could not parse date"))
        .stderr(predicate::str::contains("Skipped 1 record(s)"));
}

#[test]
fn strict_mode_fails_on_bad_record() {
    let (temp_dir, snapshot) = setup(BROKEN);

    ledgerlens(temp_dir.path())
        .arg("dashboard")
        .arg(&snapshot)
        .arg("--strict")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid record at row 2"));
}

#[test]
fn categories_income_csv() {
    let (temp_dir, snapshot) = setup(LEDGER);

    ledgerlens(temp_dir.path())
        .arg("categories")
        .arg(&snapshot)
        .args(["--type", "in", "--format", "csv"])
        .assert()
        .success()
        .stdout("label,value\nSalary,100.0\n");
}

#[test]
fn trend_reads_snapshot_from_env() {
    let (temp_dir, snapshot) = setup(LEDGER);

    ledgerlens(temp_dir.path())
        .env("LEDGERLENS_SNAPSHOT", &snapshot)
        .args(["trend", "--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("month,type,value\n2024-01,IN,100.0\n"));
}

#[test]
fn search_by_text() {
    let (temp_dir, snapshot) = setup(LEDGER);

    ledgerlens(temp_dir.path())
        .arg("search")
        .arg(&snapshot)
        .arg("groc")
        .assert()
        .success()
        .stdout(predicate::str::contains("Groceries"))
        .stdout(predicate::str::contains("1 transaction(s)"));
}

#[test]
fn transfers_finds_counterpart() {
    let (temp_dir, snapshot) = setup(LEDGER);

    ledgerlens(temp_dir.path())
        .arg("transfers")
        .arg(&snapshot)
        .arg("6")
        .assert()
        .success()
        .stdout(predicate::str::contains("Transfer candidates for txn-6"))
        .stdout(predicate::str::contains("2 day(s), account Savings"));
}

#[test]
fn transfers_unknown_source() {
    let (temp_dir, snapshot) = setup(LEDGER);

    ledgerlens(temp_dir.path())
        .arg("transfers")
        .arg(&snapshot)
        .arg("404")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Transaction not found: 404"));
}

#[test]
fn init_and_config_set() {
    let temp_dir = TempDir::new().unwrap();
    let home = temp_dir.path().join("home");

    ledgerlens(&home).arg("init").assert().success();
    assert!(home.join("config.json").exists());

    ledgerlens(&home)
        .args(["config", "set", "currency_symbol", "$"])
        .assert()
        .success();

    ledgerlens(&home)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("currency_symbol:            $"));
}

#[test]
fn missing_snapshot_fails() {
    let temp_dir = TempDir::new().unwrap();

    ledgerlens(temp_dir.path())
        .args(["dashboard", "/nonexistent/ledger.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to open snapshot"));
}
