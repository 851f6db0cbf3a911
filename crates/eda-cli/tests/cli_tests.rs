//! Command-line contract tests
//!
//! Run the built binary and check exit codes, the stderr error line and
//! that `overview --json` writes nothing but JSON to stdout.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

fn eda_bin() -> &'static str {
    env!("CARGO_BIN_EXE_eda-cli")
}

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn run_eda(args: &[&str]) -> Output {
    Command::new(eda_bin())
        .args(args)
        // a developer's RUST_LOG must not change what the binary prints
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run eda-cli")
}

fn stderr_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

fn path_arg(path: &Path) -> &str {
    path.to_str().unwrap()
}

// ============================================================================
// Exit codes
// ============================================================================

#[test]
fn test_overview_succeeds() {
    let input = fixture("sample.csv");
    let output = run_eda(&["overview", path_arg(&input)]);

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("Rows: 3\nColumns: 2\n"));
}

#[test]
fn test_missing_file_exits_with_2() {
    let output = run_eda(&["overview", "does_not_exist.csv"]);

    assert_eq!(output.status.code(), Some(2));
    let stderr = stderr_of(&output);
    assert!(stderr.starts_with("error: "), "stderr: {}", stderr);
    assert!(stderr.contains("does_not_exist.csv"));
}

#[test]
fn test_negative_max_cat_columns_exits_with_2() {
    let dir = TempDir::new().unwrap();
    let out_dir = dir.path().join("report");
    let input = fixture("sample.csv");
    let output = run_eda(&[
        "report",
        path_arg(&input),
        "--out-dir",
        path_arg(&out_dir),
        "--max-cat-columns",
        "-1",
    ]);

    assert_eq!(output.status.code(), Some(2));
    let stderr = stderr_of(&output);
    assert!(stderr.starts_with("error: "), "stderr: {}", stderr);
    assert!(stderr.contains("--max-cat-columns"));
    assert!(!out_dir.exists());
}

#[test]
fn test_quote_separator_exits_with_2() {
    let input = fixture("sample.csv");
    let output = run_eda(&["overview", path_arg(&input), "--sep", "\""]);

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr_of(&output).contains("--sep"));
}

#[test]
fn test_unwritable_output_exits_with_1() {
    let dir = TempDir::new().unwrap();
    // a regular file where the output directory should go
    let blocker = dir.path().join("taken");
    std::fs::write(&blocker, "not a directory").unwrap();
    let input = fixture("sample.csv");

    let output = run_eda(&["report", path_arg(&input), "--out-dir", path_arg(&blocker)]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = stderr_of(&output);
    assert!(stderr.starts_with("error: "), "stderr: {}", stderr);
    assert!(stderr.contains("Failed to create output directory"));
}

// ============================================================================
// Output streams
// ============================================================================

#[test]
fn test_overview_json_stdout_is_pure_json() {
    let input = fixture("people.csv");
    // debug logging would be noisy if it were not switched off for --json
    let output = run_eda(&["overview", path_arg(&input), "--json", "--log-level", "debug"]);

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let value: serde_json::Value = serde_json::from_str(&stdout).expect("Invalid JSON");
    assert_eq!(value["n_rows"], 8);
    assert_eq!(value["columns"].as_array().unwrap().len(), 6);
    assert!(output.stderr.is_empty(), "stderr: {}", stderr_of(&output));
}

#[test]
fn test_report_logs_to_stderr_only() {
    let dir = TempDir::new().unwrap();
    let out_dir = dir.path().join("report");
    let input = fixture("people.csv");
    let output = run_eda(&[
        "report",
        path_arg(&input),
        "--out-dir",
        path_arg(&out_dir),
        "--log-level",
        "info",
    ]);

    assert_eq!(output.status.code(), Some(0));
    assert!(stderr_of(&output).contains("Writing report to"));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.contains("INFO"));
    assert!(out_dir.join("report.md").exists());
}
