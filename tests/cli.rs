//! Runs the `raysurfer` binary as a subprocess.

use serde_json::Value;
use std::process::{Command, Output};

fn raysurfer(args: &[&str]) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_raysurfer"));
    cmd.args(args)
        .env_remove("RAYSURFER_API_KEY")
        .env_remove("RAYSURFER_BASE_URL")
        .env_remove("RAYSURFER_TIMEOUT")
        .env_remove("RUST_LOG");
    cmd
}

fn run(cmd: &mut Command) -> Output {
    cmd.output().expect("failed to run raysurfer binary")
}

#[test]
fn test_version_outputs_semver() {
    let output = run(&mut raysurfer(&["version"]));
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("0.1.0"));
}

#[test]
fn test_version_json() {
    let output = run(&mut raysurfer(&["version", "--json"]));
    assert_eq!(output.status.code(), Some(0));
    let value: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value, serde_json::json!({"version": "0.1.0"}));
}

#[test]
fn test_search_without_key_fails() {
    // Unroutable base URL: a network attempt would surface as a different error
    let output = run(&mut raysurfer(&[
        "search",
        "test query",
        "--base-url",
        "http://127.0.0.1:9",
    ]));
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("RAYSURFER_API_KEY"));
    assert_eq!(stderr.trim().lines().count(), 1);
}

#[test]
fn test_upload_missing_file_fails() {
    let output = run(raysurfer(&[
        "upload",
        "some task",
        "--file",
        "definitely/not/here.py",
        "--base-url",
        "http://127.0.0.1:9",
    ])
    .env("RAYSURFER_API_KEY", "test-key"));
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("File not found"));
    assert!(stderr.contains("definitely/not/here.py"));
}

#[test]
fn test_no_arguments_shows_help() {
    let output = run(&mut raysurfer(&[]));
    assert!(!output.status.success());
}
