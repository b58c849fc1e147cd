// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Integration tests for the `tinytalk` binary.
//!
//! Each test runs the built executable with source on standard input (or in
//! a temporary file) and checks stdout and the exit status.

use std::io::Write;
use std::process::{Command, Output, Stdio};

/// Runs `tinytalk` with `args`, feeding `stdin` to it.
fn tinytalk(args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_tinytalk"))
        .args(args)
        .env_remove("TINYTALK_LOG")
        .env("NO_COLOR", "1")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to start tinytalk");
    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(stdin.as_bytes())
        .expect("failed to write stdin");
    child.wait_with_output().expect("failed to wait for tinytalk")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn tokens_lists_each_token() {
    let output = tinytalk(&["tokens", "-"], "x := 3 + 4");
    assert!(output.status.success(), "{}", stderr(&output));
    let out = stdout(&output);
    assert_eq!(out.lines().count(), 5);
    assert!(out.starts_with("1:1\tidentifier\tx\n"));
}

#[test]
fn tokens_warns_on_illegal_character_but_succeeds() {
    let output = tinytalk(&["tokens"], "x § y");
    assert!(output.status.success());
    assert_eq!(stdout(&output).lines().count(), 2);
    assert!(stderr(&output).contains("illegal character"));
}

#[test]
fn strict_tokens_fails_on_illegal_character() {
    let output = tinytalk(&["tokens", "--strict"], "x § y");
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("1 lexical error"));
}

#[test]
fn parse_compact_prints_s_expressions() {
    let output = tinytalk(&["parse", "--format", "compact"], "x := 3 + 4. ^ x");
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "(:= x (send 3 + 4))\n(^ x)\n");
}

#[test]
fn parse_debug_prints_the_tree() {
    let output = tinytalk(&["parse"], "obj at: 1");
    assert!(output.status.success(), "{}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("Program {"));
    assert!(out.contains("Keyword("));
}

#[test]
fn parse_failure_exits_with_status_one() {
    let output = tinytalk(&["parse"], "x := (3 + 4");
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).is_empty());
    assert!(stderr(&output).contains("unexpected end of input"));
}

#[test]
fn max_depth_limits_nesting() {
    let source = format!("{}1{}", "(".repeat(10), ")".repeat(10));
    assert!(tinytalk(&["parse"], &source).status.success());
    let output = tinytalk(&["parse", "--max-depth", "4"], &source);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("too deep"));
}

#[test]
fn check_is_silent_for_clean_source() {
    let output = tinytalk(&["check"], "| a | a := 1. a printString");
    assert!(output.status.success());
    assert!(stdout(&output).is_empty());
}

#[test]
fn check_reports_syntax_errors() {
    let output = tinytalk(&["check"], "x := 1.\n]");
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("2:1"));
}

#[test]
fn check_reads_files() {
    let path = std::env::temp_dir().join(format!("tinytalk-cli-test-{}.st", std::process::id()));
    std::fs::write(&path, "3 + 4").unwrap();
    let output = tinytalk(&["check", path.to_str().unwrap()], "");
    std::fs::remove_file(&path).unwrap();
    assert!(output.status.success(), "{}", stderr(&output));
}

#[test]
fn missing_file_fails() {
    let output = tinytalk(&["check", "/nonexistent/tinytalk/missing.st"], "");
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("missing.st"));
}
