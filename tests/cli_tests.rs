//! Tests for the shardbuf-cli binary
//!
//! These tests verify:
//! - `dump` prints entries and chunks, with and without compaction
//! - `get` prints a single entry
//! - Bad indices and missing files exit with a failure status

use std::io::Write;
use std::process::{Command, Output};

use tempfile::NamedTempFile;

// =============================================================================
// Helper Functions
// =============================================================================

fn input_file(lines: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    for line in lines {
        writeln!(file, "{}", line).unwrap();
    }
    file.flush().unwrap();
    file
}

fn run_cli(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_shardbuf-cli"))
        .args(args)
        .env("RUST_LOG", "off")
        .output()
        .unwrap()
}

// =============================================================================
// Dump Tests
// =============================================================================

#[test]
fn test_cli_dump_without_compaction() {
    let file = input_file(&["hello", "world"]);
    let path = file.path().to_str().unwrap();

    let output = run_cli(&["dump", path]);

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        "entry 0 (-,0): [hello]\nentry 1 (-,0): [world]\n"
    );
}

#[test]
fn test_cli_dump_compacted() {
    let file = input_file(&["hello", "world"]);
    let path = file.path().to_str().unwrap();

    let output = run_cli(&["dump", path, "--compact"]);

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        "entry 0 (0:0,5): []\nentry 1 (0:5,5): []\nchunk-0: [helloworld]\n"
    );
}

#[test]
fn test_cli_dump_small_chunks() {
    let file = input_file(&["aaaa", "bbbb", "cccc"]);
    let path = file.path().to_str().unwrap();

    let output = run_cli(&["dump", path, "--compact", "--chunk-log", "3"]);

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("chunk-0: [aaaabbbb]\n"));
    assert!(stdout.contains("chunk-1: [cccc]\n"));
}

// =============================================================================
// Get Tests
// =============================================================================

#[test]
fn test_cli_get_entry() {
    let file = input_file(&["first", "second", "third"]);
    let path = file.path().to_str().unwrap();

    let output = run_cli(&["get", path, "1", "--compact"]);

    assert!(output.status.success());
    assert_eq!(output.stdout, b"second\n".to_vec());
}

#[test]
fn test_cli_get_out_of_range_fails() {
    let file = input_file(&["only"]);
    let path = file.path().to_str().unwrap();

    let output = run_cli(&["get", path, "5"]);

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn test_cli_missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.txt");

    let output = run_cli(&["dump", missing.to_str().unwrap()]);

    assert!(!output.status.success());
}
