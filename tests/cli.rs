use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn ledger(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("ledger").unwrap();
    cmd.env("EXPENSE_LEDGER_DIR", dir).env_remove("RUST_LOG");
    cmd
}

fn add(dir: &Path, description: &str, amount: &str, category: &str, date: &str) {
    ledger(dir)
        .args(["add", description, amount, "-c", category, "-d", date])
        .assert()
        .success();
}

#[test]
fn add_then_list() {
    let temp = TempDir::new().unwrap();

    ledger(temp.path())
        .args(["add", "Lunch", "250", "-c", "Food & Dining", "-d", "2025-01-05"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added EXP001"));

    ledger(temp.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Lunch"))
        .stdout(predicate::str::contains("1 expense(s), total ₹250.00"));

    let table = fs::read_to_string(temp.path().join("data").join("expenses.csv")).unwrap();
    assert_eq!(
        table,
        "id,date,description,category,amount\nEXP001,2025-01-05,Lunch,Food & Dining,250.00\n"
    );
}

#[test]
fn list_filters_by_category_and_keyword() {
    let temp = TempDir::new().unwrap();
    add(temp.path(), "Lunch", "250", "1", "2025-01-05");
    add(temp.path(), "Bus pass", "180", "Transportation", "2025-01-06");

    ledger(temp.path())
        .args(["list", "-c", "transportation"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Bus pass"))
        .stdout(predicate::str::contains("Lunch").not());

    ledger(temp.path())
        .args(["list", "--search", "LUN"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Lunch"))
        .stdout(predicate::str::contains("Bus pass").not());
}

#[test]
fn deleted_ids_are_not_reused() {
    let temp = TempDir::new().unwrap();
    add(temp.path(), "Lunch", "250", "1", "2025-01-05");
    add(temp.path(), "Bus pass", "180", "2", "2025-01-06");

    ledger(temp.path())
        .args(["delete", "EXP002", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted EXP002"));

    ledger(temp.path())
        .args(["add", "Movie", "300", "-c", "Entertainment", "-d", "2025-01-07"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added EXP003"));
}

#[test]
fn delete_without_force_only_previews() {
    let temp = TempDir::new().unwrap();
    add(temp.path(), "Lunch", "250", "1", "2025-01-05");

    ledger(temp.path())
        .args(["delete", "EXP001"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Use --force to confirm deletion"));

    ledger(temp.path())
        .args(["show", "EXP001"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Lunch"));
}

#[test]
fn edit_changes_fields_and_keeps_id() {
    let temp = TempDir::new().unwrap();
    add(temp.path(), "Lunch", "250", "1", "2025-01-05");

    ledger(temp.path())
        .args(["edit", "EXP001", "--amount", "300", "--description", "Team lunch"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated EXP001"));

    ledger(temp.path())
        .args(["show", "exp001"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Team lunch"))
        .stdout(predicate::str::contains("₹300.00"));
}

#[test]
fn missing_expense_is_reported() {
    let temp = TempDir::new().unwrap();

    ledger(temp.path())
        .args(["show", "EXP999"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn large_amount_needs_yes() {
    let temp = TempDir::new().unwrap();

    ledger(temp.path())
        .args(["add", "Car", "2000000", "-c", "Other", "-d", "2025-01-05"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--yes"));

    ledger(temp.path())
        .args(["list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No expenses found."));

    ledger(temp.path())
        .args(["add", "Car", "2000000", "-c", "Other", "-d", "2025-01-05", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added EXP001"));
}

#[test]
fn invalid_input_is_rejected() {
    let temp = TempDir::new().unwrap();

    ledger(temp.path())
        .args(["add", "Flight", "500", "-c", "Travel"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown category"));

    ledger(temp.path())
        .args(["add", "Lunch", "0", "-c", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Amount must be positive"));

    ledger(temp.path())
        .args(["add", "Lunch", "250", "-c", "1", "-d", "05/01/2025"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid date"));

    ledger(temp.path())
        .args(["list", "--from", "2025-02-01", "--to", "2025-01-01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Validation error"));
}

#[test]
fn summary_writes_category_csv() {
    let temp = TempDir::new().unwrap();
    add(temp.path(), "Lunch", "250", "Food & Dining", "2025-01-05");
    add(temp.path(), "Bus pass", "180", "Transportation", "2025-01-06");

    ledger(temp.path())
        .arg("summary")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total Spent:        ₹430.00"))
        .stdout(predicate::str::contains("Number of Expenses: 2"));

    let csv = fs::read_to_string(temp.path().join("reports").join("summary_report.csv")).unwrap();
    let mut lines = csv.lines();
    assert_eq!(lines.next(), Some("Category,Total_Spent,Count,Percentage"));
    assert_eq!(lines.next(), Some("Food & Dining,250.00,1,58.14"));
    assert_eq!(lines.next(), Some("Transportation,180.00,1,41.86"));
}

#[test]
fn summary_on_empty_ledger() {
    let temp = TempDir::new().unwrap();

    ledger(temp.path())
        .arg("summary")
        .assert()
        .success()
        .stdout(predicate::str::contains("No expenses recorded yet."));
}

#[test]
fn trend_fills_missing_months() {
    let temp = TempDir::new().unwrap();
    add(temp.path(), "Lunch", "250", "1", "2025-01-05");

    ledger(temp.path())
        .args(["trend", "--months", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2024-11"))
        .stdout(predicate::str::contains("2024-12"))
        .stdout(predicate::str::contains("2025-01"));

    ledger(temp.path())
        .args(["trend", "--months", "0"])
        .assert()
        .failure();
}

#[test]
fn top_lists_largest_first() {
    let temp = TempDir::new().unwrap();
    add(temp.path(), "Coffee", "80", "1", "2025-01-05");
    add(temp.path(), "Rent", "15000", "Bills & Utilities", "2025-01-01");
    add(temp.path(), "Books", "900", "Education", "2025-01-09");

    let output = ledger(temp.path()).args(["top", "-n", "2"]).output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let rent = stdout.find("Rent").unwrap();
    let books = stdout.find("Books").unwrap();
    assert!(rent < books);
    assert!(!stdout.contains("Coffee"));
}

#[test]
fn budget_set_show_and_clear() {
    let temp = TempDir::new().unwrap();

    ledger(temp.path())
        .args(["budget", "set", "20000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Monthly budget set to ₹20,000.00"));

    ledger(temp.path())
        .args(["budget", "show", "--month", "2025-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Budget:    ₹20,000.00"));

    ledger(temp.path())
        .args(["budget", "clear"])
        .assert()
        .success();

    ledger(temp.path())
        .args(["budget", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No monthly budget set."));
}

#[test]
fn add_warns_when_budget_exceeded() {
    let temp = TempDir::new().unwrap();

    ledger(temp.path())
        .args(["budget", "set", "100"])
        .assert()
        .success();

    // No date: recorded today, so it counts against this month's budget
    ledger(temp.path())
        .args(["add", "Headphones", "500", "-c", "Shopping"])
        .assert()
        .success()
        .stdout(predicate::str::contains("exceeded your monthly budget"));
}

#[test]
fn export_json_to_file() {
    let temp = TempDir::new().unwrap();
    add(temp.path(), "Lunch", "250", "1", "2025-01-05");
    let out = temp.path().join("out.json");

    ledger(temp.path())
        .args(["export", "json", "-o"])
        .arg(&out)
        .assert()
        .success();

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(json[0]["id"], "EXP001");
    assert_eq!(json[0]["category"], "Food & Dining");
    assert_eq!(json[0]["amount"], 250.0);
}

#[test]
fn export_with_no_expenses() {
    let temp = TempDir::new().unwrap();

    ledger(temp.path())
        .args(["export", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No expenses to export."));
}

#[test]
fn chart_writes_series() {
    let temp = TempDir::new().unwrap();
    add(temp.path(), "Lunch", "250", "1", "2025-01-05");
    let out = temp.path().join("charts.json");

    ledger(temp.path())
        .args(["chart", "-o"])
        .arg(&out)
        .assert()
        .success();

    let series: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(series.as_array().unwrap().len(), 4);
    assert_eq!(series[0]["kind"], "pie");
    assert_eq!(series[0]["points"][0]["label"], "Food & Dining");
}

#[test]
fn backups_are_listed_and_capped() {
    let temp = TempDir::new().unwrap();
    for day in 1..=8 {
        add(temp.path(), "Snack", "10", "1", &format!("2025-01-{:02}", day));
    }

    ledger(temp.path())
        .args(["backup", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total: 5 backup(s)"));

    let backups = fs::read_dir(temp.path().join("backups")).unwrap().count();
    assert_eq!(backups, 5);
}

#[test]
fn config_shows_paths() {
    let temp = TempDir::new().unwrap();

    ledger(temp.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("expenses.csv"))
        .stdout(predicate::str::contains("Backups kept:     5"));

    assert!(temp.path().join("data").join("config.json").exists());
}

#[test]
fn decorated_amounts_are_rejected() {
    let temp = TempDir::new().unwrap();

    ledger(temp.path())
        .args(["add", "Refund", "₹-250", "-c", "Other", "-d", "2025-01-05"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Amount must be positive"));

    ledger(temp.path())
        .args(["add", "Lunch", "abc10", "-c", "Other", "-d", "2025-01-05"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid money format"));

    ledger(temp.path())
        .args(["add", "Lunch", "₹1,250.50", "-c", "Other", "-d", "2025-01-05"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added EXP001"));
}

#[test]
fn signed_amount_in_table_fails_load() {
    let temp = TempDir::new().unwrap();
    add(temp.path(), "Lunch", "250", "1", "2025-01-05");

    let table = temp.path().join("data").join("expenses.csv");
    fs::write(
        &table,
        "id,date,description,category,amount\nEXP001,2025-01-05,Lunch,Food & Dining,$-10.00\n",
    )
    .unwrap();

    ledger(temp.path())
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid row"));
}

#[test]
fn history_follows_one_expense() {
    let temp = TempDir::new().unwrap();
    add(temp.path(), "Lunch", "250", "1", "2025-01-05");
    add(temp.path(), "Bus pass", "180", "2", "2025-01-06");

    ledger(temp.path())
        .args(["edit", "EXP001", "--amount", "300"])
        .assert()
        .success();
    ledger(temp.path())
        .args(["delete", "EXP001", "--force"])
        .assert()
        .success();

    ledger(temp.path())
        .args(["history", "exp001"])
        .assert()
        .success()
        .stdout(predicate::str::contains("History of EXP001"))
        .stdout(predicate::str::contains("amount: ₹250.00 -> ₹300.00"))
        .stdout(predicate::str::contains("deleted"))
        .stdout(predicate::str::contains("Bus pass").not());

    ledger(temp.path())
        .args(["history", "-n", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("deleted"))
        .stdout(predicate::str::contains("Bus pass").not());

    ledger(temp.path())
        .args(["budget", "set", "20000"])
        .assert()
        .success();
    ledger(temp.path())
        .args(["history", "budget"])
        .assert()
        .success()
        .stdout(predicate::str::contains("monthly budget: not set -> ₹20,000.00"));

    ledger(temp.path())
        .args(["history", "lunch"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid expense ID"));
}

#[test]
fn trend_window_is_bounded() {
    let temp = TempDir::new().unwrap();
    add(temp.path(), "Lunch", "250", "1", "2025-01-05");

    ledger(temp.path())
        .args(["trend", "--months", "5000"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("limited to 1200 months"));

    ledger(temp.path())
        .args(["trend", "--months", "1200"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1925-02"));
}
