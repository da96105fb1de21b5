// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Behavioral specs for `pyward check`: discovery, selection, exit codes.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use crate::prelude::*;

// =============================================================================
// EXIT CODES
// =============================================================================

#[test]
fn clean_project_passes() {
    let temp = default_project();
    temp.file("app.py", "import paramiko\n\nclient = paramiko.SSHClient()\n");

    check()
        .pwd(temp.path())
        .passes()
        .stdout_eq("All checks passed!\n");
}

#[test]
fn violation_exits_1() {
    let temp = default_project();
    temp.file("app.py", INSECURE_CLIENT);

    check().pwd(temp.path()).exits(1).stdout_has("app.py:4:1: S507 ");
}

#[test]
fn exit_zero_reports_but_succeeds() {
    let temp = default_project();
    temp.file("app.py", INSECURE_CLIENT);

    check()
        .pwd(temp.path())
        .args(&["--exit-zero"])
        .passes()
        .stdout_has("Found 1 error.");
}

#[test]
fn empty_directory_passes() {
    let temp = default_project();
    check().pwd(temp.path()).passes();
}

// =============================================================================
// FILE DISCOVERY
// =============================================================================

#[test]
fn walks_python_files_only() {
    let temp = default_project();
    temp.file("pkg/client.py", INSECURE_CLIENT);
    temp.file("pkg/stub.pyi", INSECURE_CLIENT);
    temp.file("notes.txt", INSECURE_CLIENT);

    let json = check().pwd(temp.path()).json().fails();
    assert_eq!(json.locations(), vec!["pkg/client.py:4", "pkg/stub.pyi:4"]);
    assert_eq!(json.value()["files_checked"], 2);
}

#[test]
fn explicit_file_is_linted_regardless_of_extension() {
    let temp = default_project();
    temp.file("bin/deploy", INSECURE_CLIENT);

    check()
        .pwd(temp.path())
        .args(&["bin/deploy"])
        .exits(1)
        .stdout_has("bin/deploy:4:1: S507");
}

#[test]
fn explicit_directory_limits_scope() {
    let temp = default_project();
    temp.file("a/client.py", INSECURE_CLIENT);
    temp.file("b/client.py", INSECURE_CLIENT);

    let json = check().pwd(temp.path()).args(&["b"]).json().fails();
    assert_eq!(json.locations(), vec!["b/client.py:4"]);
}

#[test]
fn respects_gitignore() {
    let temp = default_project();
    temp.file(".gitignore", "generated/\n");
    temp.file("generated/client.py", INSECURE_CLIENT);
    temp.file("app.py", "x = 1\n");

    check().pwd(temp.path()).passes();
}

#[test]
fn project_ignore_patterns_skip_files() {
    let temp = Project::empty();
    temp.config("[project.ignore]\npatterns = [\"vendor/**\"]\n");
    temp.file("vendor/client.py", INSECURE_CLIENT);

    check().pwd(temp.path()).passes();
}

#[test]
fn max_depth_limits_walk() {
    let temp = default_project();
    temp.file("a/b/c/client.py", INSECURE_CLIENT);

    check()
        .pwd(temp.path())
        .args(&["--max-depth", "2"])
        .passes();
    check().pwd(temp.path()).fails();
}

#[test]
fn results_sorted_by_path() {
    let temp = default_project();
    temp.file("z.py", INSECURE_CLIENT);
    temp.file("a.py", INSECURE_CLIENT);
    temp.file("m/x.py", INSECURE_CLIENT);

    let json = check().pwd(temp.path()).json().fails();
    assert_eq!(json.locations(), vec!["a.py:4", "m/x.py:4", "z.py:4"]);
}

// =============================================================================
// RULE SELECTION
// =============================================================================

#[test]
fn print_rules_disabled_by_default() {
    let temp = default_project();
    temp.file("app.py", "print('hello')\n");

    check().pwd(temp.path()).passes();
}

#[test]
fn select_enables_rules() {
    let temp = default_project();
    temp.file("app.py", "print('hello')\n");

    check()
        .pwd(temp.path())
        .args(&["--select", "T201"])
        .exits(1)
        .stdout_has("app.py:1:1: T201 [*] `print` found");
}

#[test]
fn select_replaces_default_selection() {
    let temp = default_project();
    temp.file("app.py", INSECURE_CLIENT);

    check().pwd(temp.path()).args(&["--select", "T20"]).passes();
}

#[test]
fn ignore_disables_rules() {
    let temp = default_project();
    temp.file("app.py", INSECURE_CLIENT);

    check().pwd(temp.path()).args(&["--ignore", "S507"]).passes();
}

#[test]
fn comma_separated_selectors() {
    let temp = default_project();
    temp.file("app.py", "from pprint import pprint\nprint(1)\npprint(2)\n");

    let json = check()
        .pwd(temp.path())
        .args(&["--select", "T201,T203"])
        .json()
        .fails();
    assert_eq!(json.codes(), vec!["T201", "T203"]);
}

#[test]
fn unknown_cli_selector_is_error() {
    let temp = default_project();

    check()
        .pwd(temp.path())
        .args(&["--select", "s507"])
        .exits(2)
        .stderr_has("unknown rule selector `s507`. Did you mean `S507`?");
}

#[test]
fn syntax_errors_reported() {
    let temp = default_project();
    temp.file("broken.py", "def (:\n");

    check()
        .pwd(temp.path())
        .exits(1)
        .stdout_has("broken.py:1:")
        .stdout_has("E999 SyntaxError: ");
}

// =============================================================================
// SUPPRESSION
// =============================================================================

#[test]
fn noqa_suppresses_line() {
    let temp = default_project();
    temp.file(
        "app.py",
        &INSECURE_CLIENT.replace("(AutoAddPolicy)", "(AutoAddPolicy)  # noqa: S507"),
    );

    check().pwd(temp.path()).passes();
}

#[test]
fn noqa_for_other_code_does_not_suppress() {
    let temp = default_project();
    temp.file(
        "app.py",
        &INSECURE_CLIENT.replace("(AutoAddPolicy)", "(AutoAddPolicy)  # noqa: T201"),
    );

    check().pwd(temp.path()).fails();
}

#[test]
fn file_level_noqa_suppresses_file() {
    let temp = default_project();
    temp.file("app.py", &format!("# pyward: noqa\n{INSECURE_CLIENT}"));

    check().pwd(temp.path()).passes();
}

#[test]
fn per_file_ignores_from_fixture() {
    let json = check().on("ssh-project").json().fails();
    assert_eq!(json.locations(), vec!["app/client.py:4", "app/client.py:5"]);
    assert_eq!(json.codes(), vec!["S507", "T201"]);
}

// =============================================================================
// FILE ERRORS
// =============================================================================

#[test]
fn invalid_utf8_is_reported_and_fails() {
    let temp = default_project();
    std::fs::write(temp.path().join("latin1.py"), b"name = '\xe9'\n").unwrap();
    temp.file("ok.py", "x = 1\n");

    check()
        .pwd(temp.path())
        .exits(1)
        .stdout_has("latin1.py: error: invalid UTF-8 at byte 8")
        .stdout_has("Could not lint 1 file.");
}

#[test]
fn missing_path_is_reported() {
    let temp = default_project();

    let json = check()
        .pwd(temp.path())
        .args(&["missing.py"])
        .json()
        .fails();
    assert_eq!(json.errors()[0]["file"], "missing.py");
}
