mod common;
use common::*;

use std::fs;
use tempfile::TempDir;

#[test]
fn test_select_by_index_keeps_columns_in_requested_order() {
    let (stdout, _stderr, exit_code) = run_rowmill_with_input(
        &["select", "-c", "0,2", "--threads", "1"],
        "a,b,c\n1,2,3\n4,5,6\n",
    );

    assert_eq!(exit_code, 0);
    assert_eq!(stdout, "1,3\n4,6\n", "index selection should not echo the header");
}

#[test]
fn test_select_by_index_can_reorder_and_duplicate() {
    let (stdout, _stderr, exit_code) = run_rowmill_with_input(
        &["select", "-c", "2,0,0", "--threads", "1"],
        "a,b,c\n1,2,3\n",
    );

    assert_eq!(exit_code, 0);
    assert_eq!(stdout, "3,1,1\n");
}

#[test]
fn test_select_by_name_writes_projected_header() {
    let (stdout, stderr, exit_code) = run_rowmill_with_input(
        &["select", "-c", "name,phone", "--threads", "1"],
        "name,city,phone\nalice,berlin,030\nbob,paris,170\n",
    );

    assert_eq!(exit_code, 0);
    assert_eq!(stdout, "name,phone\nalice,030\nbob,170\n");
    assert!(
        stderr.contains("2 read, 2 transformed, 2 written"),
        "summary should account for data rows only: {}",
        stderr
    );
}

#[test]
fn test_select_name_resolution_ignores_case_and_padding() {
    // The file header carries stray spaces and different casing.
    let (stdout, _stderr, exit_code) = run_rowmill_with_input(
        &["select", "-c", "name,phone", "--threads", "1"],
        " Name ,PHONE\nx,1\n",
    );

    assert_eq!(exit_code, 0);
    assert_eq!(
        stdout, "Name,PHONE\nx,1\n",
        "projected header should carry the file's own spellings"
    );
}

#[test]
fn test_select_pads_short_rows_with_default_sentinel() {
    let (stdout, stderr, exit_code) = run_rowmill_with_input(
        &["select", "-c", "0,2", "--threads", "1"],
        "a,b,c\n1,2,3\n4,5\n",
    );

    assert_eq!(exit_code, 0, "a short row must not abort the run");
    assert_eq!(stdout, "1,3\n4,NULL\n");
    assert!(stderr.contains("padding with sentinel"), "stderr: {}", stderr);
    assert!(stderr.contains("1 padded"), "stderr: {}", stderr);
}

#[test]
fn test_select_with_empty_sentinel() {
    let (stdout, _stderr, exit_code) = run_rowmill_with_input(
        &["select", "-c", "0,2", "--sentinel", "", "--threads", "1"],
        "a,b,c\n1,2,3\n4,5\n",
    );

    assert_eq!(exit_code, 0);
    assert_eq!(stdout, "1,3\n4,\n");
}

#[test]
fn test_select_writes_to_output_file() {
    let input = temp_csv("a,b\n1,2\n3,4\n");
    let out_dir = TempDir::new().unwrap();
    let out_path = out_dir.path().join("out.csv");

    let (stdout, _stderr, exit_code) = run_rowmill(&[
        "select",
        "-c",
        "1",
        "--threads",
        "1",
        "-o",
        out_path.to_str().unwrap(),
        input.path().to_str().unwrap(),
    ]);

    assert_eq!(exit_code, 0);
    assert!(stdout.is_empty(), "rows should go to the file, not stdout");
    assert_eq!(fs::read_to_string(&out_path).unwrap(), "2\n4\n");
}

#[test]
fn test_select_with_semicolon_delimiter() {
    let (stdout, _stderr, exit_code) = run_rowmill_with_input(
        &["select", "-c", "1", "-d", ";", "--threads", "1"],
        "a;b\n1;2\n",
    );

    assert_eq!(exit_code, 0);
    assert_eq!(stdout, "2\n");
}

#[test]
fn test_select_with_tab_delimiter() {
    let (stdout, _stderr, exit_code) = run_rowmill_with_input(
        &["select", "-c", "b", "-d", "\\t", "--threads", "1"],
        "a\tb\n1\t2\n",
    );

    assert_eq!(exit_code, 0);
    assert_eq!(stdout, "b\n2\n");
}

#[test]
fn test_select_reads_explicit_stdin_marker() {
    let (stdout, _stderr, exit_code) = run_rowmill_with_input(
        &["select", "-c", "0", "--threads", "1", "-"],
        "a\nx\ny\n",
    );

    assert_eq!(exit_code, 0);
    assert_eq!(stdout, "x\ny\n");
}

#[test]
fn test_quiet_suppresses_warnings_but_not_summary() {
    let (stdout, stderr, exit_code) = run_rowmill_with_input(
        &["select", "-c", "0,2", "-q", "--threads", "1"],
        "a,b,c\n1,2,3\n4,5\n",
    );

    assert_eq!(exit_code, 0);
    assert_eq!(stdout, "1,3\n4,NULL\n");
    assert!(
        !stderr.contains("padding with sentinel"),
        "warnings should be silenced by --quiet: {}",
        stderr
    );
    assert!(
        stderr.contains("Rows processed:"),
        "the final summary is always printed: {}",
        stderr
    );
    assert!(stderr.contains("1 padded"), "counts stay complete under --quiet");
}
