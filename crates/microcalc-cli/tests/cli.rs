//! CLI integration tests
//!
//! Runs the `microcalc` binary against sheet files in a temporary directory.

#![allow(deprecated)] // Command::cargo_bin

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn microcalc(sheet: &Path) -> Command {
    let mut cmd = Command::cargo_bin("microcalc").unwrap();
    cmd.env_remove("MICROCALC_HELP")
        .env_remove("RUST_LOG")
        .arg("--sheet")
        .arg(sheet);
    cmd
}

// ═══════════════════════════════════════════════════════════════════════════
// HELP AND VERSION
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("microcalc").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("microcalc"))
        .stdout(predicate::str::contains("eval"))
        .stdout(predicate::str::contains("repl"));
}

#[test]
fn test_cli_version() {
    let mut cmd = Command::cargo_bin("microcalc").unwrap();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("microcalc"));
}

// ═══════════════════════════════════════════════════════════════════════════
// EDITING AND DISPLAY
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_set_then_show() {
    let dir = TempDir::new().unwrap();
    let sheet = dir.path().join("sheet.json");

    microcalc(&sheet)
        .args(["set", "A1", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("A1: value stored"));
    microcalc(&sheet)
        .args(["set", "A2", "A1*3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("A2: formula stored"));

    assert!(sheet.exists());

    microcalc(&sheet)
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("30.00"))
        .stdout(predicate::str::contains("AutoCalc: ON"));
}

#[test]
fn test_debug_log_reports_sheet_files() {
    let dir = TempDir::new().unwrap();
    let sheet = dir.path().join("sheet.json");

    microcalc(&sheet)
        .env("RUST_LOG", "debug")
        .args(["set", "A1", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("saved sheet").not())
        .stderr(predicate::str::contains("no sheet file, starting empty"))
        .stderr(predicate::str::contains("saved sheet"));

    microcalc(&sheet)
        .env("RUST_LOG", "debug")
        .arg("show")
        .assert()
        .success()
        .stderr(predicate::str::contains("loaded sheet"));
}

#[test]
fn test_set_rejects_bad_number() {
    let dir = TempDir::new().unwrap();
    let sheet = dir.path().join("sheet.json");

    microcalc(&sheet)
        .args(["set", "B2", "3+"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unexpected end of expression (Pos 3)"));
}

#[test]
fn test_set_rejects_bad_address() {
    let dir = TempDir::new().unwrap();
    microcalc(&dir.path().join("sheet.json"))
        .args(["set", "H1", "1"])
        .assert()
        .failure();
}

#[test]
fn test_format_locks_neighbor() {
    let dir = TempDir::new().unwrap();
    let sheet = dir.path().join("sheet.json");

    microcalc(&sheet)
        .args(["format", "A", "1", "21", "--decimals", "-1", "--width", "14"])
        .assert()
        .success();
    microcalc(&sheet)
        .args(["set", "B3", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cell is locked"));
}

// ═══════════════════════════════════════════════════════════════════════════
// EVALUATION
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_eval_expression() {
    let dir = TempDir::new().unwrap();
    microcalc(&dir.path().join("sheet.json"))
        .args(["eval", "2+3*4"])
        .assert()
        .success()
        .stdout("14\n");
}

#[test]
fn test_eval_error_reports_position() {
    let dir = TempDir::new().unwrap();
    microcalc(&dir.path().join("sheet.json"))
        .args(["eval", "1/0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("division by zero (Pos 4)"));
}

#[test]
fn test_recalc_after_manual_mode() {
    let dir = TempDir::new().unwrap();
    let sheet = dir.path().join("sheet.json");

    microcalc(&sheet)
        .args(["auto", "off"])
        .assert()
        .success()
        .stdout("AutoCalc: OFF\n");
    microcalc(&sheet).args(["set", "A1", "1"]).assert().success();
    microcalc(&sheet).args(["set", "A2", "A1+1"]).assert().success();
    microcalc(&sheet).args(["set", "A1", "5"]).assert().success();
    microcalc(&sheet)
        .arg("recalc")
        .assert()
        .success()
        .stdout(predicate::str::contains("recalculated"));
    microcalc(&sheet)
        .args(["eval", "A2"])
        .assert()
        .success()
        .stdout("6\n");
}

// ═══════════════════════════════════════════════════════════════════════════
// EXPORT AND HELP
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_print_to_file() {
    let dir = TempDir::new().unwrap();
    let sheet = dir.path().join("sheet.json");
    let output = dir.path().join("sheet.txt");

    microcalc(&sheet).args(["set", "A1", "Total"]).assert().success();
    microcalc(&sheet)
        .arg("print")
        .arg("--output")
        .arg(&output)
        .args(["--margin", "2"])
        .assert()
        .success();

    let text = fs::read_to_string(&output).unwrap();
    assert!(text.contains("  Total"));
}

#[test]
fn test_help_missing_file() {
    let dir = TempDir::new().unwrap();
    microcalc(&dir.path().join("sheet.json"))
        .arg("--help-file")
        .arg(dir.path().join("CALC.HLP"))
        .arg("help")
        .assert()
        .success()
        .stdout(predicate::str::contains("help file not found"));
}

#[test]
fn test_help_pages() {
    let dir = TempDir::new().unwrap();
    let help = dir.path().join("CALC.HLP");
    fs::write(&help, "Welcome\r\n.PA\r\nFormulas\r\n\x1a").unwrap();

    microcalc(&dir.path().join("sheet.json"))
        .arg("--help-file")
        .arg(&help)
        .args(["help", "--page", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Formulas\n-- page 2/2 --"));
}

// ═══════════════════════════════════════════════════════════════════════════
// INTERACTIVE MODE
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_repl_session() {
    let dir = TempDir::new().unwrap();
    let sheet = dir.path().join("sheet.json");

    microcalc(&sheet)
        .arg("repl")
        .write_stdin("A1 4\nA2 SQRT(A1)\nsave\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("formula stored"))
        .stdout(predicate::str::contains("saved"));

    microcalc(&sheet)
        .args(["eval", "A2"])
        .assert()
        .success()
        .stdout("2\n");
}
