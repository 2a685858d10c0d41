//! End-to-end tests: program text → decode → evaluate → console output.

use std::io::Write as _;
use std::path::Path;
use std::process::{Command, Output};

use jexp::{run_file, run_source, EvalConfig, EvalError, JexpError, SourceFile, Value};

// ══════════════════════════════════════════════════════════════════════════════
// Helpers
// ══════════════════════════════════════════════════════════════════════════════

fn program_file(source: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("create temp program");
    file.write_all(source.as_bytes()).expect("write temp program");
    file
}

fn jexp(args: &[&Path]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_jexp"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to launch jexp")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

// ══════════════════════════════════════════════════════════════════════════════
// Library pipeline
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn run_file_reads_and_evaluates() {
    let file = program_file(r#"["seq", ["set", "x", 10], ["print", ["get", "x"]], ["add", ["get", "x"], 1]]"#);
    let mut out = Vec::new();
    let value = run_file(file.path(), &mut out, EvalConfig::default()).unwrap();
    assert_eq!(value, Value::Int(11));
    assert_eq!(String::from_utf8(out).unwrap(), "10\n");
}

#[test]
fn run_file_missing_path() {
    let mut out = Vec::new();
    let err = run_file(Path::new("/no/such/program.json"), &mut out, EvalConfig::default())
        .unwrap_err();
    assert!(matches!(err, JexpError::Io { .. }));
    assert!(err.to_string().contains("/no/such/program.json"));
}

#[test]
fn decode_error_names_the_file() {
    let mut out = Vec::new();
    let err = run_source(&SourceFile::new("broken.json", "[\"seq\", 1,"), &mut out).unwrap_err();
    assert!(matches!(err, JexpError::Decode(_)));
    assert!(err.to_string().starts_with("broken.json:1:"));
}

#[test]
fn output_before_failure_is_kept() {
    let mut out = Vec::new();
    let err = run_source(
        &SourceFile::new("t.json", r#"["seq", ["print", 1], ["bogus"]]"#),
        &mut out,
    )
    .unwrap_err();
    assert!(matches!(err, JexpError::Eval(EvalError::UnknownOperation(_))));
    assert_eq!(String::from_utf8(out).unwrap(), "1\n");
}

#[test]
fn thousand_deep_program_runs() {
    let depth = 1_000;
    let source = format!(
        "{}[\"add\", 1, 2]{}",
        r#"["seq", "#.repeat(depth),
        "]".repeat(depth)
    );
    let mut out = Vec::new();
    let value = run_source(&SourceFile::new("deep.json", source), &mut out).unwrap();
    assert_eq!(value, Value::Int(3));
}

#[test]
fn huge_array_is_reported_not_aborted() {
    let mut out = Vec::new();
    let source = format!(r#"["array", {}]"#, i64::MAX);
    let err = run_source(&SourceFile::new("t.json", source), &mut out).unwrap_err();
    assert!(matches!(err, JexpError::Eval(EvalError::Allocation { .. })));
}

// ══════════════════════════════════════════════════════════════════════════════
// Command line
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn cli_prints_final_value() {
    let file = program_file(
        r#"["seq", ["set","x",10], ["set","y",["add",["get","x"],5]], ["get","y"]]"#,
    );
    let output = jexp(&[file.path()]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "=> 15\n");
}

#[test]
fn cli_print_then_nothing() {
    let file = program_file(r#"["print", ["add", 2, 3], ["equal", 1, 1]]"#);
    let output = jexp(&[file.path()]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "5\ntrue\n=> none\n");
}

#[test]
fn cli_renders_arrays_and_strings() {
    let file = program_file(r#"["seq", ["print", "hello"], ["array", 3]]"#);
    let output = jexp(&[file.path()]);
    assert_eq!(stdout(&output), "hello\n=> [none, none, none]\n");
}

#[test]
fn cli_without_arguments_is_usage_error() {
    let output = jexp(&[]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Usage"));
    assert!(stdout(&output).is_empty());
}

#[test]
fn cli_with_two_arguments_is_usage_error() {
    let file = program_file(r#"["print", "should not run"]"#);
    let output = jexp(&[file.path(), file.path()]);
    assert_eq!(output.status.code(), Some(2));
    assert!(!stdout(&output).contains("should not run"));
}

#[test]
fn cli_unknown_operation_fails_loudly() {
    let file = program_file(r#"["bogus", 1, 2]"#);
    let output = jexp(&[file.path()]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("unknown operation: bogus"));
    assert!(!stdout(&output).contains("=>"));
}

#[test]
fn cli_unknown_variable_fails_loudly() {
    let file = program_file(r#"["get", "missing"]"#);
    let output = jexp(&[file.path()]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("unknown variable: missing"));
}

#[test]
fn cli_missing_file_fails() {
    let output = jexp(&[Path::new("/no/such/program.json")]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("failed to read"));
}
