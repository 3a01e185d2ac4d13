//! CLI integration tests

use std::process::Command;

use tempfile::TempDir;

fn serial_chime_bin() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_serial-chime"));
    cmd.env_remove("SERIAL_CHIME_CONFIG")
        .env_remove("SERIAL_CHIME_PORT")
        .env_remove("SERIAL_CHIME_BAUD");
    cmd
}

#[test]
fn help_output() {
    let output = serial_chime_bin()
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("serial"));
    assert!(stdout.contains("--port"));
    assert!(stdout.contains("--baud"));
    assert!(stdout.contains("--pool-size"));
    assert!(stdout.contains("--config"));
    assert!(stdout.contains("play"));
    assert!(stdout.contains("ports"));
}

#[test]
fn version_output() {
    let output = serial_chime_bin()
        .arg("--version")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("serial-chime"));
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn config_path_command() {
    let dir = TempDir::new().unwrap();
    let output = serial_chime_bin()
        .env("XDG_CONFIG_HOME", dir.path())
        .env("HOME", dir.path())
        .args(["config", "path"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("serial-chime"));
    assert!(stdout.contains("config.toml"));
}

#[test]
fn config_path_honors_flag_and_env() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("chime.toml");

    let output = serial_chime_bin()
        .args(["config", "path", "--config"])
        .arg(&path)
        .output()
        .expect("Failed to execute command");
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        path.to_string_lossy()
    );

    let output = serial_chime_bin()
        .env("SERIAL_CHIME_CONFIG", &path)
        .args(["config", "path"])
        .output()
        .expect("Failed to execute command");
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        path.to_string_lossy()
    );
}

#[test]
fn config_help() {
    let output = serial_chime_bin()
        .args(["config", "--help"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("init"));
    assert!(stdout.contains("set"));
    assert!(stdout.contains("get"));
    assert!(stdout.contains("list"));
    assert!(stdout.contains("path"));
}

#[test]
fn config_set_then_get() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");

    let output = serial_chime_bin()
        .arg("--config")
        .arg(&path)
        .args(["config", "set", "baud_rate", "9600"])
        .output()
        .expect("Failed to execute command");
    assert!(output.status.success());
    assert!(path.exists());

    let output = serial_chime_bin()
        .arg("--config")
        .arg(&path)
        .args(["config", "get", "baud_rate"])
        .output()
        .expect("Failed to execute command");
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "9600");
}

#[test]
fn config_init_then_list() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");

    let output = serial_chime_bin()
        .arg("--config")
        .arg(&path)
        .args(["config", "init"])
        .output()
        .expect("Failed to execute command");
    assert!(output.status.success());

    let output = serial_chime_bin()
        .arg("--config")
        .arg(&path)
        .args(["config", "list"])
        .output()
        .expect("Failed to execute command");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("115200"));
    assert!(stdout.contains("team_#t#.mp3"));
    assert!(stdout.contains("Arduino,Serielles,SERIAL"));
}

#[test]
fn play_missing_file_fails() {
    let dir = TempDir::new().unwrap();
    let output = serial_chime_bin()
        .arg("play")
        .arg(dir.path().join("ready.mp3"))
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("decode") || stderr.contains("ready.mp3"),
        "Expected decode error, got: {}",
        stderr
    );
}
