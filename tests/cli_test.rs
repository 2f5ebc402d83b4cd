//! Binary smoke tests.

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn help_shows_usage() {
    Command::cargo_bin("evicheck")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("evidence-checklist"))
        .stdout(predicate::str::contains("--non-interactive"));
}

#[test]
fn version_prints_crate_name() {
    Command::cargo_bin("evicheck")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("evicheck"));
}

#[test]
fn unconfigured_non_interactive_run_fails_before_any_browser_work() {
    let dir = tempfile::tempdir().unwrap();
    Command::cargo_bin("evicheck")
        .unwrap()
        .current_dir(dir.path())
        .env_clear()
        .arg("--non-interactive")
        .arg("--env-file")
        .arg("absent.env")
        .assert()
        .failure()
        .stderr(predicate::str::contains("input_file"));
}

#[test]
fn unknown_flag_is_rejected() {
    Command::cargo_bin("evicheck")
        .unwrap()
        .arg("--frobnicate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unexpected argument"));
}
