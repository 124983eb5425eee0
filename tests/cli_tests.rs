// ABOUTME: End-to-end CLI tests running the interpreter binary on script files

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn write_script(source: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("failed to create temp script");
    file.write_all(source.as_bytes())
        .expect("failed to write temp script");
    file
}

fn ascript() -> Command {
    Command::cargo_bin("ascript").expect("binary not built")
}

#[test]
fn test_no_arguments_prints_usage() {
    ascript()
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn test_surplus_arguments_fail() {
    ascript().args(["a.as", "b.as"]).assert().failure();
}

#[test]
fn test_missing_file_fails() {
    ascript()
        .arg("definitely-not-a-real-file.as")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error :"));
}

#[test]
fn test_print_output() {
    let script = write_script("print(1 + 2);\nprint(\"Hello World\");\n");
    ascript()
        .arg(script.path())
        .assert()
        .success()
        .stdout(predicate::str::diff("3\nHello World\n"));
}

#[test]
fn test_print_containers() {
    let script = write_script("var xs = [1, 2, 3];\nprint(xs);\n");
    ascript()
        .arg(script.path())
        .assert()
        .success()
        .stdout(predicate::str::diff("[1, 2, 3]\n"));
}

#[test]
fn test_fibonacci_program() {
    let script = write_script(
        "function fib(n) {
            if (n <= 1) { return n; }
            return fib(n - 2) + fib(n - 1);
        }
        print(fib(10));",
    );
    ascript()
        .arg(script.path())
        .assert()
        .success()
        .stdout(predicate::str::diff("55\n"));
}

#[test]
fn test_syntax_error_exits_nonzero() {
    let script = write_script("var x = 1");
    ascript()
        .arg(script.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Syntax Error at line 1"));
}

#[test]
fn test_runtime_error_exits_nonzero() {
    let script = write_script("var x = 10 / 0;");
    ascript()
        .arg(script.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Runtime Error : 10 at Division by zero",
        ));
}

#[test]
fn test_shadow_warning_does_not_fail_the_run() {
    let script = write_script("var x = 1;\nvar x = 2;\nprint(x);\n");
    ascript()
        .arg(script.path())
        .assert()
        .success()
        .stdout(predicate::str::diff("2\n"))
        .stderr(predicate::str::contains(
            "Shadow warning at line 2, Declaring an already declared variable: \"x\"",
        ));
}

#[test]
fn test_non_utf8_string_bytes_survive() {
    // A string literal holding bytes that are not valid UTF-8 still lexes,
    // and len counts its raw bytes
    let mut file = NamedTempFile::new().expect("failed to create temp script");
    file.write_all(b"print(len(\"\xFF\xFE\"));\n")
        .expect("failed to write temp script");
    ascript()
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::diff("2\n"));
}

#[test]
fn test_comments_are_ignored() {
    let script = write_script("// greet\nprint(\"hi\"); // trailing\n");
    ascript()
        .arg(script.path())
        .assert()
        .success()
        .stdout(predicate::str::diff("hi\n"));
}
