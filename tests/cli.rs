use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;

fn penny(data_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("penny").unwrap();
    cmd.env("NO_COLOR", "1").arg("--data-dir").arg(data_dir);
    cmd
}

fn write_chase_csv(dir: &Path, name: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    let content = "\
Transaction Date,Post Date,Description,Category,Type,Amount,Memo
01/05/2024,01/06/2024,COFFEE SHOP,Food & Drink,Sale,-4.50,
01/06/2024,01/07/2024,PAYROLL,,Payment,\"2,000.00\",
";
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn import_then_summary_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let csv = write_chase_csv(dir.path(), "stmt.csv");

    penny(dir.path())
        .arg("import")
        .arg(&csv)
        .args(["--account", "Chase Freedom"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 imported, 0 skipped"))
        .stdout(predicate::str::contains("2024-01-05 to 2024-01-06"));

    penny(dir.path())
        .arg("summary")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total transactions: 2"))
        .stdout(predicate::str::contains("Total charges"))
        .stdout(predicate::str::contains("$4.50"))
        .stdout(predicate::str::contains("$2,000.00"))
        .stdout(predicate::str::contains("$1,995.50"));
}

#[test]
fn reimport_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let csv = write_chase_csv(dir.path(), "stmt.csv");

    penny(dir.path())
        .arg("import")
        .arg(&csv)
        .args(["--account", "Card"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 imported, 0 skipped"));

    penny(dir.path())
        .arg("import")
        .arg(&csv)
        .args(["--account", "Card"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0 imported, 2 skipped"));

    penny(dir.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Transactions:  2"));
}

#[test]
fn unsupported_institution_fails_without_touching_the_store() {
    let dir = tempfile::tempdir().unwrap();
    let csv = write_chase_csv(dir.path(), "stmt.csv");

    penny(dir.path())
        .arg("import")
        .arg(&csv)
        .args(["--institution", "bofa"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported institution: bofa"));

    penny(dir.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Database not found"));
}

#[test]
fn accounts_add_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();

    penny(dir.path())
        .args(["accounts", "add", "Chase Freedom", "--type", "Credit Card"])
        .args(["--institution", "Chase"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added account: Chase Freedom"));

    penny(dir.path())
        .args(["accounts", "add", "Chase Freedom", "--type", "Checking"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Account already exists: Chase Freedom"));

    penny(dir.path())
        .args(["accounts", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Chase Freedom"))
        .stdout(predicate::str::contains("credit_card"));
}

#[test]
fn transactions_list_newest_first_with_limit() {
    let dir = tempfile::tempdir().unwrap();
    let csv = write_chase_csv(dir.path(), "stmt.csv");

    penny(dir.path())
        .arg("import")
        .arg(&csv)
        .args(["--account", "Card"])
        .assert()
        .success();

    penny(dir.path())
        .args(["transactions", "--limit", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("PAYROLL"))
        .stdout(predicate::str::contains("COFFEE SHOP").not());
}

#[test]
fn import_missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();

    penny(dir.path())
        .arg("import")
        .arg(dir.path().join("nope.csv"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("IO error"));
}

#[test]
fn default_account_name_derived_from_file_stem() {
    let dir = tempfile::tempdir().unwrap();
    let csv = write_chase_csv(dir.path(), "january.csv");

    penny(dir.path())
        .arg("import")
        .arg(&csv)
        .assert()
        .success()
        .stdout(predicate::str::contains("Chase - january"));
}
