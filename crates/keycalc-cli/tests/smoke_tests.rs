//! Smoke tests for the keycalc binary

#![allow(deprecated)] // Allow deprecated Command::cargo_bin until assert_cmd is updated
#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Get a command for the keycalc binary with a clean environment
fn keycalc() -> Command {
    let mut cmd = Command::cargo_bin("keycalc").expect("keycalc binary should exist");
    cmd.env_remove("KEYCALC_CONFIG")
        .env_remove("KEYCALC_LOG")
        .arg("--color")
        .arg("never");
    cmd
}

// ============================================================================
// Basic CLI Tests
// ============================================================================

#[test]
fn test_version_flag() {
    keycalc()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("keycalc"));
}

#[test]
fn test_help_flag() {
    keycalc()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("tui"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_no_args_shows_help() {
    Command::cargo_bin("keycalc")
        .expect("keycalc binary should exist")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

// ============================================================================
// Run Command
// ============================================================================

#[test]
fn test_run_chains_eagerly() {
    keycalc()
        .args(["run", "5+3*"])
        .assert()
        .success()
        .stdout("8\n");
}

#[test]
fn test_run_no_precedence() {
    keycalc()
        .args(["run", "2+3*4="])
        .assert()
        .success()
        .stdout("20\n");
}

#[test]
fn test_run_divide_by_zero() {
    keycalc()
        .args(["run", "7/0="])
        .assert()
        .success()
        .stdout("0\n");
}

#[test]
fn test_run_float_rounding_visible() {
    keycalc()
        .args(["run", "0.1+0.2="])
        .assert()
        .success()
        .stdout("0.30000000000000004\n");
}

#[test]
fn test_run_multi_character_keys() {
    keycalc()
        .args(["run", "9 +/- AC 4 %"])
        .assert()
        .success()
        .stdout("0.04\n");
}

#[test]
fn test_run_trace() {
    keycalc()
        .args(["run", "1+2=", "--trace"])
        .assert()
        .success()
        .stdout(predicate::str::contains("   +  1"))
        .stdout(predicate::str::contains("   =  3"));
}

#[test]
fn test_run_json() {
    keycalc()
        .args(["run", "6*7=", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"steps\""))
        .stdout(predicate::str::contains("\"42\""));
}

#[test]
fn test_run_invalid_script() {
    keycalc()
        .args(["run", "2^3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("unknown key '^' at position 1"));
}

#[test]
fn test_run_verbose_logs_to_stderr() {
    keycalc()
        .args(["run", "1+1=", "-v"])
        .assert()
        .success()
        .stdout("2\n")
        .stderr(predicate::str::contains("replaying script"));
}

#[test]
fn test_run_log_env_overrides_verbosity() {
    keycalc()
        .env("KEYCALC_LOG", "off")
        .args(["run", "1+1=", "-vv"])
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}

// ============================================================================
// Config Command
// ============================================================================

#[test]
fn test_config_defaults() {
    keycalc()
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("theme: plain"))
        .stdout(predicate::str::contains("flash_frames: 3"))
        .stdout(predicate::str::contains("transcript_capacity: 1000"));
}

#[test]
fn test_config_file_flag() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("keycalc.yaml");
    fs::write(&path, "theme: glow\nflash_frames: 5\n").unwrap();

    keycalc()
        .arg("config")
        .arg("--config")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("theme: glow"))
        .stdout(predicate::str::contains("flash_frames: 5"));
}

#[test]
fn test_config_env_variable() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("keycalc.yaml");
    fs::write(&path, "transcript_capacity: 10\n").unwrap();

    keycalc()
        .env("KEYCALC_CONFIG", &path)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("transcript_capacity: 10"));
}

#[test]
fn test_config_defaults_flag_ignores_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("keycalc.yaml");
    fs::write(&path, "theme: glow\n").unwrap();

    keycalc()
        .args(["config", "--defaults", "--config"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("theme: plain"));
}

#[test]
fn test_config_invalid_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("keycalc.yaml");
    fs::write(&path, "flash_frames: 99\n").unwrap();

    keycalc()
        .arg("config")
        .arg("--config")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn test_config_unknown_field_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("keycalc.yaml");
    fs::write(&path, "colour: red\n").unwrap();

    keycalc()
        .arg("config")
        .arg("--config")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot parse"));
}

#[test]
fn test_config_missing_file() {
    keycalc()
        .args(["config", "--config", "/nonexistent/keycalc.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot read"));
}

// ============================================================================
// TUI Command
// ============================================================================

#[test]
fn test_tui_requires_terminal() {
    keycalc()
        .arg("tui")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a terminal"));
}

#[test]
fn test_tui_rejects_out_of_range_flash() {
    keycalc()
        .args(["tui", "--flash-frames", "200"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("flash_frames"));
}
