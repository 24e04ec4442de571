//! Integration tests for ptrsweep CLI functionality

#![allow(clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_help_output() {
    let mut cmd = Command::cargo_bin("ptrsweep").expect("Failed to find ptrsweep binary");
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Bulk reverse DNS sweeps"))
        .stdout(predicate::str::contains("--workers"))
        .stdout(predicate::str::contains("--nameserver"))
        .stdout(predicate::str::contains("--lookup-timeout-ms"));
}

#[test]
fn test_version_output() {
    let mut cmd = Command::cargo_bin("ptrsweep").expect("Failed to find ptrsweep binary");
    cmd.arg("--version");

    let output = cmd.output().expect("Failed to execute command");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("ptrsweep "));
    // In debug builds, should contain -UNRELEASED
    if cfg!(debug_assertions) {
        assert!(stdout.contains("-UNRELEASED"));
    }
}

#[test]
fn test_invalid_prefix_is_fatal() {
    let mut cmd = Command::cargo_bin("ptrsweep").unwrap();
    cmd.arg("not-a-prefix");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("invalid network prefix"));
}

#[test]
fn test_invalid_nameserver_is_fatal() {
    let mut cmd = Command::cargo_bin("ptrsweep").unwrap();
    cmd.args(["192.0.2.0/30", "--nameserver", "no port here"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("invalid nameserver address"));
}

#[test]
fn test_unanswered_lookups_report_errors_per_address() {
    // Bind a local socket that never answers, so every lookup times out; the
    // sweep itself must still drain and exit with a zero status.
    let silent = std::net::UdpSocket::bind("127.0.0.1:0").unwrap();
    let nameserver = format!("127.0.0.1:{}", silent.local_addr().unwrap().port());

    let mut cmd = Command::cargo_bin("ptrsweep").unwrap();
    cmd.args([
        "192.0.2.0/30",
        "--nameserver",
        &nameserver,
        "--lookup-timeout-ms",
        "100",
        "--workers",
        "2",
    ]);

    let output = cmd.output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let error_lines = stdout
        .lines()
        .filter(|line| line.starts_with("WorkerID:") && line.contains("Err:"))
        .count();
    assert_eq!(error_lines, 4);
}
