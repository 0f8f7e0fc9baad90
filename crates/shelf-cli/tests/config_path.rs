//! Integration tests for the config commands.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_config_path_command() {
    let dir = tempdir().unwrap();

    Command::cargo_bin("shelf")
        .unwrap()
        .env("SHELF_HOME", dir.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_config_init_creates_file() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("config.toml");

    assert!(!config_path.exists());

    Command::cargo_bin("shelf")
        .unwrap()
        .env("SHELF_HOME", dir.path())
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created config at"));

    assert!(config_path.exists());

    let contents = fs::read_to_string(&config_path).unwrap();
    assert!(contents.contains("page_size ="));
    assert!(contents.contains("base_url ="));
}

#[test]
fn test_config_init_fails_if_exists() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("config.toml");

    fs::write(&config_path, "# existing config").unwrap();

    Command::cargo_bin("shelf")
        .unwrap()
        .env("SHELF_HOME", dir.path())
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_config_show_prints_effective_config() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("config.toml"),
        "[catalog]\npage_size = 25\n",
    )
    .unwrap();

    Command::cargo_bin("shelf")
        .unwrap()
        .env("SHELF_HOME", dir.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("page_size = 25"))
        .stdout(predicate::str::contains("openlibrary.org"));
}
