use assert_cmd::Command;
use predicates::prelude::*;

/// Run `penny` with HOME pointed at an isolated directory so settings and
/// data never touch the real user environment.
fn penny(home: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("penny").unwrap();
    cmd.env("HOME", home);
    cmd
}

fn init(home: &std::path::Path) {
    penny(home)
        .args(["init", "--data-dir"])
        .arg(home.join("data"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized"));
}

#[test]
fn test_help_lists_commands() {
    Command::cargo_bin("penny")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("import"))
        .stdout(predicate::str::contains("export"));
}

#[test]
fn test_import_preview_without_yes_persists_nothing() {
    let home = tempfile::tempdir().unwrap();
    init(home.path());

    let csv = home.path().join("txns.csv");
    std::fs::write(
        &csv,
        "Date,Type,Amount,Description\n2025-11-01,expense,45.50,Grocery shopping\n",
    )
    .unwrap();

    penny(home.path())
        .arg("import")
        .arg(&csv)
        .assert()
        .success()
        .stdout(predicate::str::contains("Re-run with --yes"));

    penny(home.path())
        .args(["export", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No transactions to export."));
}

#[test]
fn test_import_export_round_trip() {
    let home = tempfile::tempdir().unwrap();
    init(home.path());

    penny(home.path())
        .args(["accounts", "add", "Checking"])
        .assert()
        .success();
    penny(home.path())
        .args(["categories", "add", "Food & Dining", "--kind", "expense"])
        .assert()
        .success();

    let csv = home.path().join("txns.csv");
    std::fs::write(
        &csv,
        "Date,Type,Amount,Description,Category,Account\n\
         2025-11-01,expense,45.50,Grocery shopping,Food & Dining,Checking\n\
         2025-11-01,income,3500.00,Salary payment,,Checking\n",
    )
    .unwrap();

    penny(home.path())
        .arg("import")
        .arg(&csv)
        .arg("--yes")
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 2 transactions"));

    let out = home.path().join("export.csv");
    penny(home.path())
        .args(["export", "csv", "--output"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote"));

    let exported = std::fs::read_to_string(&out).unwrap();
    assert!(exported.starts_with(
        "Date,Type,Amount,Description,Category,Account,From Account,To Account,Notes"
    ));
    assert!(exported.contains("2025-11-01,expense,45.50,Grocery shopping,Food & Dining,Checking"));
    assert!(exported.contains("2025-11-01,income,3500.00,Salary payment,,Checking"));
}

#[test]
fn test_reimporting_same_file_is_refused() {
    let home = tempfile::tempdir().unwrap();
    init(home.path());

    let csv = home.path().join("txns.csv");
    std::fs::write(
        &csv,
        "Date,Type,Amount,Description\n2025-11-01,expense,45.50,Coffee\n",
    )
    .unwrap();

    penny(home.path())
        .arg("import")
        .arg(&csv)
        .arg("--yes")
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 1 transactions"));

    penny(home.path())
        .arg("import")
        .arg(&csv)
        .arg("--yes")
        .assert()
        .success()
        .stdout(predicate::str::contains("already been imported"));
}

#[test]
fn test_invalid_csv_row_fails_with_line_number() {
    let home = tempfile::tempdir().unwrap();
    init(home.path());

    let csv = home.path().join("bad.csv");
    std::fs::write(
        &csv,
        "Date,Type,Amount\n2025-11-01,withdrawal,45.50\n",
    )
    .unwrap();

    penny(home.path())
        .arg("import")
        .arg(&csv)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Row 2"))
        .stderr(predicate::str::contains("invalid type"));
}

#[test]
fn test_ofx_import_with_skipped_block() {
    let home = tempfile::tempdir().unwrap();
    init(home.path());

    let ofx = home.path().join("bank.ofx");
    std::fs::write(
        &ofx,
        "OFXHEADER:100\n<OFX><BANKTRANLIST>\
         <STMTTRN><TRNTYPE>DEBIT<DTPOSTED>20251101120000<TRNAMT>-45.00<FITID>T1<NAME>Grocery Store</STMTTRN>\
         <STMTTRN><TRNTYPE>CREDIT<DTPOSTED>20251103090000<TRNAMT>1200.00<FITID>T2<NAME>Payroll</STMTTRN>\
         <STMTTRN><TRNTYPE>DEBIT<DTPOSTED>20251104090000<TRNAMT>-9.99<NAME>No Id</STMTTRN>\
         </BANKTRANLIST></OFX>",
    )
    .unwrap();

    penny(home.path())
        .arg("import")
        .arg(&ofx)
        .arg("--yes")
        .assert()
        .success()
        .stdout(predicate::str::contains("1 incomplete bank record(s) skipped"))
        .stdout(predicate::str::contains("Imported 2 transactions"));
}
