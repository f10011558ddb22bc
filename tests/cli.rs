use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn fintrack(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("fintrack").unwrap();
    cmd.env("FINANCE_TRACKER_DATA_DIR", dir.path())
        .env_remove("GEMINI_API_KEY")
        .env_remove("RUST_LOG")
        .current_dir(dir.path());
    cmd
}

fn add_rent(dir: &TempDir, amount: &str, date: &str) {
    fintrack(dir)
        .args(["txn", "add", amount, "-c", "Rent", "-d", date])
        .assert()
        .success()
        .stdout(predicate::str::contains("Transaction added."));
}

#[test]
fn test_init_seeds_default_categories() {
    let dir = TempDir::new().unwrap();

    fintrack(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Salary (INCOME)"))
        .stdout(predicate::str::contains("Transport (EXPENSE)"));

    assert!(dir.path().join("config.json").exists());
    assert!(dir.path().join("data").join("categories.json").exists());

    fintrack(&dir)
        .args(["category", "list", "--kind", "income"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Freelance"))
        .stdout(predicate::str::contains("Groceries").not());
}

#[test]
fn test_duplicate_category_is_rejected() {
    let dir = TempDir::new().unwrap();
    fintrack(&dir).arg("init").assert().success();

    fintrack(&dir)
        .args(["category", "add", "Utilities", "-k", "EXPENSE"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Category added. Utilities (EXPENSE, ID 7)"));

    fintrack(&dir)
        .args(["category", "add", "  rent ", "-k", "EXPENSE"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Category already exists."));
}

#[test]
fn test_transaction_validation_messages() {
    let dir = TempDir::new().unwrap();
    fintrack(&dir).arg("init").assert().success();

    fintrack(&dir)
        .args(["txn", "add", "0", "-c", "Rent", "-d", "2025-06-01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Amount must be greater than 0."));

    fintrack(&dir)
        .args(["txn", "add", "-5", "-c", "Rent", "-d", "2025-06-01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Amount must be greater than 0."));

    fintrack(&dir)
        .args(["txn", "add", "12", "-c", "Rent", "-d", "06/01/2025"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid date. Use YYYY-MM-DD."));

    fintrack(&dir)
        .args(["txn", "add", "12", "-c", "Rent", "-k", "REFUND", "-d", "2025-06-01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid transaction type."));

    fintrack(&dir)
        .args(["txn", "add", "12", "-c", "Holidays"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_budget_rules() {
    let dir = TempDir::new().unwrap();
    fintrack(&dir).arg("init").assert().success();

    fintrack(&dir)
        .args(["budget", "set", "Rent", "-1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Monthly limit must be ≥ 0."));

    fintrack(&dir)
        .args(["budget", "set", "Salary", "100"])
        .assert()
        .failure();

    fintrack(&dir)
        .args(["budget", "set", "Rent", "500"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Budget saved. Rent: $500.00 / month"));

    fintrack(&dir)
        .args(["budget", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Rent"));

    fintrack(&dir)
        .args(["budget", "delete", "Rent"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Budget deleted for Rent"));

    fintrack(&dir)
        .args(["budget", "delete", "Rent"])
        .assert()
        .failure();
}

#[test]
fn test_insights_report_over_budget() {
    let dir = TempDir::new().unwrap();
    fintrack(&dir).arg("init").assert().success();
    fintrack(&dir).args(["budget", "set", "Rent", "500"]).assert().success();

    add_rent(&dir, "450", "2025-06-01");
    add_rent(&dir, "150", "2025-06-15");
    add_rent(&dir, "900", "2025-05-20");

    fintrack(&dir)
        .args(["report", "insights", "--today", "2025-06-18"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Over budget in Rent by 100"))
        .stdout(predicate::str::contains("Savings rate: n/a"));

    fintrack(&dir)
        .args(["report", "insights", "--today", "2025-07-02"])
        .assert()
        .success()
        .stdout(predicate::str::contains("All budgets on track"));
}

#[test]
fn test_insights_budget_check_ignores_date_filter() {
    let dir = TempDir::new().unwrap();
    fintrack(&dir).arg("init").assert().success();
    fintrack(&dir).args(["budget", "set", "Rent", "500"]).assert().success();

    add_rent(&dir, "450", "2025-06-01");
    add_rent(&dir, "150", "2025-06-15");

    fintrack(&dir)
        .args([
            "report", "insights", "--start", "2025-06-10", "--end", "2025-06-30", "--today",
            "2025-06-18",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Over budget in Rent by 100"));
}

#[test]
fn test_oversized_amount_is_rejected() {
    let dir = TempDir::new().unwrap();
    fintrack(&dir).arg("init").assert().success();

    fintrack(&dir)
        .args(["txn", "add", "99999999999999999", "-c", "Rent", "-d", "2025-06-01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid amount"))
        .stderr(predicate::str::contains("panicked").not());

    fintrack(&dir)
        .args(["txn", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No transactions found."));
}

#[test]
fn test_summary_and_trend_reports() {
    let dir = TempDir::new().unwrap();
    fintrack(&dir).arg("init").assert().success();

    fintrack(&dir)
        .args(["txn", "add", "3000", "-c", "Salary", "-d", "2025-06-01"])
        .assert()
        .success();
    add_rent(&dir, "1200", "2025-06-02");
    add_rent(&dir, "1200", "2025-05-02");

    fintrack(&dir)
        .args(["report", "summary", "--start", "2025-06-01", "--end", "2025-06-30"])
        .assert()
        .success()
        .stdout(predicate::str::contains("$3000.00"))
        .stdout(predicate::str::contains("$1800.00"));

    // An unparseable bound is ignored rather than rejected
    fintrack(&dir)
        .args(["report", "summary", "--start", "June"])
        .assert()
        .success()
        .stdout(predicate::str::contains("$2400.00"));

    fintrack(&dir)
        .args(["report", "trend"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2025-05"))
        .stdout(predicate::str::contains("2025-06"));
}

#[test]
fn test_export_csv() {
    let dir = TempDir::new().unwrap();
    fintrack(&dir).arg("init").assert().success();
    let out = dir.path().join("out.csv");

    fintrack(&dir)
        .args(["export"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("No transactions to export."));
    assert!(!out.exists());

    add_rent(&dir, "450.5", "2025-06-01");

    fintrack(&dir)
        .args(["export"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 1 transactions"));

    let content = fs::read_to_string(&out).unwrap();
    let mut lines = content.lines();
    assert_eq!(
        lines.next(),
        Some("id,date,description,amount,category_id,kind,category")
    );
    assert_eq!(lines.next(), Some("1,2025-06-01,,450.50,3,EXPENSE,Rent"));
}

#[test]
fn test_category_delete_cascades() {
    let dir = TempDir::new().unwrap();
    fintrack(&dir).arg("init").assert().success();
    fintrack(&dir).args(["budget", "set", "Rent", "500"]).assert().success();
    add_rent(&dir, "450", "2025-06-01");

    fintrack(&dir)
        .args(["category", "delete", "Rent"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 transactions and its budget removed"));

    fintrack(&dir)
        .args(["txn", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No transactions found."));
}

#[test]
fn test_advice_prompt_only() {
    let dir = TempDir::new().unwrap();
    fintrack(&dir).arg("init").assert().success();

    fintrack(&dir)
        .args(["advice", "--prompt-only"])
        .assert()
        .success()
        .stdout(predicate::str::contains("User has no data."));

    add_rent(&dir, "450", "2025-06-01");

    fintrack(&dir)
        .args(["advice", "--prompt-only", "--months", "3", "--today", "2025-06-18"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Timeframe: last ~3 months"))
        .stdout(predicate::str::contains("- Total expense: 450.00"));
}

#[test]
fn test_advice_without_key_reports_unavailable() {
    let dir = TempDir::new().unwrap();
    fintrack(&dir).arg("init").assert().success();
    add_rent(&dir, "450", "2025-06-01");

    fintrack(&dir)
        .arg("advice")
        .assert()
        .success()
        .stdout(predicate::str::contains("AI advice unavailable: GEMINI_API_KEY not set."));
}
