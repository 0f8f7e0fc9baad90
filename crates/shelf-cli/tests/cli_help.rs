//! Basic CLI surface tests.

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_help_lists_subcommands() {
    Command::cargo_bin("shelf")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("search"))
        .stdout(predicate::str::contains("login"))
        .stdout(predicate::str::contains("logout"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_search_requires_author() {
    Command::cargo_bin("shelf")
        .unwrap()
        .arg("search")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--author"));
}

#[test]
fn test_config_help_shows_subcommands() {
    Command::cargo_bin("shelf")
        .unwrap()
        .args(["config", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("path"))
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("show"));
}
