//! Error scenario integration tests

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn serial_chime() -> Command {
    let mut cmd = Command::cargo_bin("serial-chime").unwrap();
    cmd.env_remove("SERIAL_CHIME_CONFIG")
        .env_remove("SERIAL_CHIME_PORT")
        .env_remove("SERIAL_CHIME_BAUD");
    cmd
}

#[test]
fn invalid_baud_rate_is_usage_error() {
    serial_chime()
        .args(["--baud", "fast"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid baud rate"));
}

#[test]
fn out_of_range_baud_rate_is_usage_error() {
    serial_chime().args(["--baud", "7"]).assert().code(2);
}

#[test]
fn invalid_pool_size_is_usage_error() {
    serial_chime()
        .args(["--pool-size", "0"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("pool size"));
}

#[test]
fn unknown_subcommand_is_usage_error() {
    serial_chime().arg("listen").assert().code(2);
}

#[test]
fn config_get_unknown_key() {
    let dir = TempDir::new().unwrap();
    serial_chime()
        .arg("--config")
        .arg(dir.path().join("config.toml"))
        .args(["config", "get", "unknown_key"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unknown key"));
}

#[test]
fn config_set_invalid_values() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");

    for (key, value) in [
        ("baud_rate", "fast"),
        ("backoff", "soon"),
        ("pool_size", "64"),
        ("sounds.team_template", "team.mp3"),
    ] {
        serial_chime()
            .arg("--config")
            .arg(&path)
            .args(["config", "set", key, value])
            .assert()
            .code(1)
            .stderr(predicate::str::contains(key));
    }

    assert!(!path.exists(), "rejected values must not create the file");
}

#[test]
fn config_init_twice_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");

    serial_chime()
        .arg("--config")
        .arg(&path)
        .args(["config", "init"])
        .assert()
        .success();

    serial_chime()
        .arg("--config")
        .arg(&path)
        .args(["config", "init"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn play_corrupt_file_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("sound.mp3");
    std::fs::write(&path, b"definitely not audio").unwrap();

    serial_chime()
        .arg("play")
        .arg(&path)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("decode"));
}
