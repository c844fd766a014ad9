//! CLI integration tests
//!
//! Run the `valuate` binary as a subprocess and check its observable
//! behavior: exit codes, console output, and the files it writes.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

fn valuate() -> Command {
    Command::cargo_bin("valuate").expect("binary builds")
}

#[test]
fn test_help_lists_commands() {
    valuate()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("generate"))
        .stdout(predicate::str::contains("summary"));
}

#[test]
fn test_version() {
    valuate()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_generate_writes_workbook() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("listing-482.csv");
    fs::write(&input, "amount,year\n100,2022\n50,2022\n300,2023\n").unwrap();
    let out_dir = dir.path().join("sheets");

    valuate()
        .arg("generate")
        .arg(&input)
        .arg("--output-dir")
        .arg(&out_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("2022"))
        .stdout(predicate::str::contains("2023"));

    let bytes = fs::read(out_dir.join("Listing 482 Valuation.xlsx")).unwrap();
    assert_eq!(&bytes[..2], b"PK");
}

#[test]
fn test_summary_prints_totals_and_inputs() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("earnings.csv");
    fs::write(&input, "amount,year\n100,2022\n50,2022\n300,2023\n").unwrap();

    valuate()
        .arg("summary")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("150.00"))
        .stdout(predicate::str::contains("300.00"))
        .stdout(predicate::str::contains("Base year"));

    // Summary never writes output
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn test_generate_missing_column_fails() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("bad.csv");
    fs::write(&input, "track,plays\nSong,10\n").unwrap();

    valuate()
        .arg("generate")
        .arg(&input)
        .arg("--output-dir")
        .arg(dir.path().join("out"))
        .assert()
        .failure();
}

#[test]
fn test_generate_nonexistent_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    valuate()
        .arg("generate")
        .arg(dir.path().join("missing.csv"))
        .arg("--output-dir")
        .arg(dir.path().join("out"))
        .assert()
        .failure();
}

#[test]
fn test_server_help() {
    Command::cargo_bin("valuate-server")
        .expect("binary builds")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--port"));
}
