mod common;
use common::*;

#[test]
fn test_derive_combines_trimmed_values_with_a_space() {
    let (stdout, _stderr, exit_code) = run_rowmill_with_input(
        &[
            "derive",
            "--from",
            "first_name,last_name",
            "--name",
            "full_name",
            "--threads",
            "1",
        ],
        "first_name,last_name\n Jane ,Doe\nJohn,  Smith \n",
    );

    assert_eq!(exit_code, 0);
    assert_eq!(
        stdout,
        "first_name,last_name,full_name\n Jane ,Doe,Jane Doe\nJohn,  Smith ,John Smith\n",
        "originals keep their whitespace; only the derived value is trimmed"
    );
}

#[test]
fn test_derive_with_custom_separator() {
    let (stdout, _stderr, exit_code) = run_rowmill_with_input(
        &[
            "derive",
            "--from",
            "year,month",
            "--name",
            "period",
            "--separator",
            "-",
            "--threads",
            "1",
        ],
        "year,month\n2024,07\n",
    );

    assert_eq!(exit_code, 0);
    assert_eq!(stdout, "year,month,period\n2024,07,2024-07\n");
}

#[test]
fn test_derive_by_index_still_writes_full_header() {
    let (stdout, _stderr, exit_code) = run_rowmill_with_input(
        &["derive", "--from", "1,0", "--name", "swapped", "--threads", "1"],
        "a,b\nx,y\n",
    );

    assert_eq!(exit_code, 0);
    assert_eq!(stdout, "a,b,swapped\nx,y,y x\n");
}

#[test]
fn test_derive_pads_missing_source_with_sentinel() {
    let (stdout, stderr, exit_code) = run_rowmill_with_input(
        &["derive", "--from", "a,b", "--name", "c", "--threads", "1"],
        "a,b\nonly\nx,y\n",
    );

    assert_eq!(exit_code, 0);
    assert_eq!(stdout, "a,b,c\nonly,only NULL\nx,y,x y\n");
    assert!(stderr.contains("1 padded"), "stderr: {}", stderr);
}

#[test]
fn test_derive_rejects_out_of_range_index() {
    let (_stdout, stderr, exit_code) = run_rowmill_with_input(
        &["derive", "--from", "0,9", "--name", "c"],
        "a,b\nx,y\n",
    );

    assert_eq!(exit_code, 1);
    assert!(stderr.contains("out of range"), "stderr: {}", stderr);
}

#[test]
fn test_derive_requires_exactly_two_sources() {
    let (_stdout, stderr, exit_code) = run_rowmill_with_input(
        &["derive", "--from", "a", "--name", "c"],
        "a,b\nx,y\n",
    );

    assert_eq!(exit_code, 1);
    assert!(
        stderr.contains("exactly two columns"),
        "stderr: {}",
        stderr
    );
}

#[test]
fn test_derive_unknown_source_column_is_fatal_before_any_output() {
    let (stdout, stderr, exit_code) = run_rowmill_with_input(
        &["derive", "--from", "a,missing", "--name", "c"],
        "a,b\nx,y\n",
    );

    assert_eq!(exit_code, 1);
    assert!(stdout.is_empty(), "no rows may be emitted on a fatal setup error");
    assert!(stderr.contains("missing"), "stderr: {}", stderr);
}
