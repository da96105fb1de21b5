// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Behavioral specs for text and JSON output.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use crate::prelude::*;

// =============================================================================
// TEXT
// =============================================================================

#[test]
fn text_output_exact() {
    check()
        .on("ssh-project")
        .exits(1)
        .stdout_eq(
            "\
app/client.py:4:1: S507 Paramiko call with policy set to automatically trust the unknown host key
app/client.py:5:1: T201 [*] `print` found
Found 2 errors.
[*] 1 fixable with the --fix option.
",
        );
}

#[test]
fn text_output_line_format() {
    check()
        .on("ssh-project")
        .exits(1)
        .stdout_has(
            predicates::str::is_match(r"(?m)^[a-z/_.]+\.py:\d+:\d+: [A-Z]+\d+ .+$").unwrap(),
        );
}

#[test]
fn limit_truncates_text_output() {
    let temp = default_project();
    temp.file("app.py", "print(1)\nprint(2)\nprint(3)\n");

    check()
        .pwd(temp.path())
        .args(&["--select", "T201", "--limit", "2"])
        .exits(1)
        .stdout_has("app.py:2:1:")
        .stdout_lacks("app.py:3:1:")
        .stdout_has("Found 3 errors.")
        .stdout_has("Showing 2 of 3 violations. Use --no-limit to see all.");
}

#[test]
fn no_limit_overrides_limit() {
    let temp = default_project();
    temp.file("app.py", "print(1)\nprint(2)\nprint(3)\n");

    check()
        .pwd(temp.path())
        .args(&["--select", "T201", "--limit", "1", "--no-limit"])
        .exits(1)
        .stdout_has("app.py:3:1:")
        .stdout_lacks("Showing");
}

#[test]
fn no_color_by_default_when_piped() {
    check()
        .on("ssh-project")
        .exits(1)
        .stdout_lacks("\x1b[");
}

#[test]
fn color_flag_forces_color() {
    check()
        .on("ssh-project")
        .args(&["--color"])
        .exits(1)
        .stdout_has("\x1b[");
}

#[test]
fn color_env_forces_color() {
    check()
        .on("ssh-project")
        .env("COLOR", "1")
        .exits(1)
        .stdout_has("\x1b[");
}

#[test]
fn no_color_beats_color_env() {
    check()
        .on("ssh-project")
        .env("COLOR", "1")
        .env("NO_COLOR", "1")
        .exits(1)
        .stdout_lacks("\x1b[");
}

#[test]
fn no_color_flag_beats_color_env() {
    check()
        .on("ssh-project")
        .args(&["--no-color"])
        .env("COLOR", "1")
        .exits(1)
        .stdout_lacks("\x1b[");
}

// =============================================================================
// JSON
// =============================================================================

#[test]
fn json_output_structure() {
    let json = check().on("ssh-project").json().fails();
    let root = json.value();

    assert_eq!(root["passed"], false);
    assert_eq!(root["files_checked"], 3);
    assert_eq!(root["fixed"], 0);
    assert!(root["timestamp"].as_str().unwrap().ends_with('Z'));
    assert!(json.errors().is_empty());

    let first = &json.violations()[0];
    assert_eq!(first["file"], "app/client.py");
    assert_eq!(first["line"], 4);
    assert_eq!(first["column"], 1);
    assert_eq!(first["end_line"], 4);
    assert_eq!(first["end_column"], 50);
    assert_eq!(first["code"], "S507");
    assert_eq!(first["rule"], "ssh-no-host-key-verification");
    assert!(first.get("fix_title").is_none());

    let second = &json.violations()[1];
    assert_eq!(second["fix_title"], "Remove `print`");
    assert_eq!(second["end_column"], 6);
}

#[test]
fn json_output_ignores_limit() {
    let temp = default_project();
    temp.file("app.py", "print(1)\nprint(2)\nprint(3)\n");

    let json = check()
        .pwd(temp.path())
        .args(&["--select", "T201", "--limit", "1"])
        .json()
        .fails();
    assert_eq!(json.violations().len(), 3);
}

#[test]
fn json_passing_run() {
    let temp = default_project();
    temp.file("app.py", "x = 1\n");

    let json = check().pwd(temp.path()).json().passes();
    assert_eq!(json.value()["passed"], true);
    assert_eq!(json.value()["files_checked"], 1);
}
