//! CLI end-to-end tests
//!
//! Tests for the posterctl command-line interface.

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::tempdir;

/// Get a command for the posterctl binary with a clean environment and a
/// scratch working directory (keeps the log file and default config lookup
/// away from the real filesystem).
fn posterctl_cmd(dir: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("posterctl").unwrap();
    cmd.current_dir(dir)
        .env_remove("PLEX_URL")
        .env_remove("PLEX_TOKEN")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_cli_help_flag() {
    let temp = tempdir().unwrap();
    let mut cmd = posterctl_cmd(temp.path());
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("posterctl"))
        .stdout(predicate::str::contains("--rating_key"))
        .stdout(predicate::str::contains("--dry-run"));
}

#[test]
fn test_cli_version_flag() {
    let temp = tempdir().unwrap();
    let mut cmd = posterctl_cmd(temp.path());
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("posterctl"));
}

#[test]
fn test_cli_missing_credentials_is_fatal() {
    let temp = tempdir().unwrap();
    let mut cmd = posterctl_cmd(temp.path());
    cmd.args(["--rating_key", "1234"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("PLEX_URL"));
}

#[test]
fn test_cli_no_scope_exits_cleanly() {
    let temp = tempdir().unwrap();
    let mut cmd = posterctl_cmd(temp.path());
    cmd.env("PLEX_URL", "http://127.0.0.1:1")
        .env("PLEX_TOKEN", "token")
        .assert()
        .success()
        .stdout(predicate::str::contains("No --rating_key or --library"));
}

#[test]
fn test_cli_no_scope_makes_no_connection() {
    // The URL points nowhere; a clean exit proves no connection was attempted
    let temp = tempdir().unwrap();
    let mut cmd = posterctl_cmd(temp.path());
    cmd.env("PLEX_URL", "http://203.0.113.1:1")
        .env("PLEX_TOKEN", "token")
        .assert()
        .success();
}

#[test]
fn test_cli_connection_failure_is_nonzero() {
    let temp = tempdir().unwrap();
    let mut cmd = posterctl_cmd(temp.path());
    cmd.env("PLEX_URL", "http://127.0.0.1:1")
        .env("PLEX_TOKEN", "token")
        .args(["--rating_key", "1234"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Failed to connect"));
}

#[test]
fn test_cli_rejects_non_numeric_rating_key() {
    let temp = tempdir().unwrap();
    let mut cmd = posterctl_cmd(temp.path());
    cmd.args(["--rating_key", "abc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn test_cli_invalid_config_file() {
    let temp = tempdir().unwrap();
    let config_file = temp.path().join("config.toml");
    fs::write(&config_file, "[server\nurl = ").unwrap();

    let mut cmd = posterctl_cmd(temp.path());
    cmd.args(["--config", config_file.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("parse"));
}

#[test]
fn test_cli_credentials_from_config_file() {
    let temp = tempdir().unwrap();
    let config_file = temp.path().join("config.toml");
    fs::write(
        &config_file,
        r#"
[server]
url = "http://127.0.0.1:1"
token = "file-token"
"#,
    )
    .unwrap();

    // Credentials resolve from the file; failure comes from the dead URL,
    // not from missing configuration
    let mut cmd = posterctl_cmd(temp.path());
    cmd.args([
        "--config",
        config_file.to_str().unwrap(),
        "--rating_key",
        "1",
    ])
    .assert()
    .failure()
    .stdout(predicate::str::contains("Failed to connect"));
}

#[test]
fn test_cli_writes_append_log_file() {
    let temp = tempdir().unwrap();
    let mut cmd = posterctl_cmd(temp.path());
    cmd.env("PLEX_URL", "http://127.0.0.1:1")
        .env("PLEX_TOKEN", "token")
        .assert()
        .success();

    let log = temp.path().join("posterctl.log");
    let first = fs::read_to_string(&log).unwrap();
    assert!(first.contains("No --rating_key or --library"));

    let mut cmd = posterctl_cmd(temp.path());
    cmd.env("PLEX_URL", "http://127.0.0.1:1")
        .env("PLEX_TOKEN", "token")
        .assert()
        .success();

    let second = fs::read_to_string(&log).unwrap();
    assert!(second.len() > first.len(), "log file should append");
}
