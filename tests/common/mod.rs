// tests/common/mod.rs
// Shared test utilities for integration tests
#![allow(dead_code)]

use std::io::Write;
use std::process::{Command, Stdio};
use tempfile::NamedTempFile;

/// Path of the binary under test
pub fn rowmill_binary() -> &'static str {
    // Use the built binary directly instead of cargo run to avoid compilation output
    if cfg!(debug_assertions) {
        "./target/debug/rowmill"
    } else {
        "./target/release/rowmill"
    }
}

/// Run rowmill with the given arguments and nothing on stdin
pub fn run_rowmill(args: &[&str]) -> (String, String, i32) {
    let output = Command::new(rowmill_binary())
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .expect("Failed to execute rowmill");

    (
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
        output.status.code().unwrap_or(-1),
    )
}

/// Run rowmill with the given arguments and input via stdin
pub fn run_rowmill_with_input(args: &[&str], input: &str) -> (String, String, i32) {
    run_rowmill_with_bytes(args, input.as_bytes())
}

/// Run rowmill with raw bytes on stdin (compressed or non-UTF-8 fixtures)
pub fn run_rowmill_with_bytes(args: &[&str], input: &[u8]) -> (String, String, i32) {
    let mut cmd = Command::new(rowmill_binary())
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to start rowmill");

    if let Some(stdin) = cmd.stdin.as_mut() {
        stdin.write_all(input).expect("Failed to write to stdin");
    }

    let output = cmd.wait_with_output().expect("Failed to read output");

    (
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
        output.status.code().unwrap_or(-1),
    )
}

/// Run rowmill with a temp file appended as the last (positional) argument
pub fn run_rowmill_with_file(args: &[&str], file_content: &str) -> (String, String, i32) {
    let temp_file = temp_csv(file_content);

    let mut full_args = args.to_vec();
    full_args.push(temp_file.path().to_str().unwrap());

    run_rowmill(&full_args)
}

/// Write content to a temp file that lives until the guard drops
pub fn temp_csv(content: &str) -> NamedTempFile {
    temp_bytes(content.as_bytes())
}

/// Byte-level variant of temp_csv for non-UTF-8 and compressed fixtures
pub fn temp_bytes(content: &[u8]) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
    temp_file
        .write_all(content)
        .expect("Failed to write to temp file");
    temp_file.flush().expect("Failed to flush temp file");
    temp_file
}

/// Sort output lines for comparisons that must not depend on worker order
pub fn sorted_lines(output: &str) -> Vec<String> {
    let mut lines: Vec<String> = output.lines().map(|line| line.to_string()).collect();
    lines.sort();
    lines
}
