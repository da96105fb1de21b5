// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Behavioral specs for `pyward check --fix`.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use crate::prelude::*;

#[test]
fn fix_removes_print_statements() {
    let temp = default_project();
    temp.file(
        "app.py",
        "import os\nprint(os.getcwd())\nname = os.name\nprint(name); x = 1\n",
    );

    check()
        .pwd(temp.path())
        .args(&["--select", "T201", "--fix"])
        .passes()
        .stdout_eq("Fixed 2 errors.\n");

    similar_asserts::assert_eq!(temp.read("app.py"), "import os\nname = os.name\nx = 1\n");
}

#[test]
fn fix_keeps_blocks_non_empty() {
    let temp = default_project();
    temp.file("app.py", "def debug(x):\n    print(x)\n");

    check()
        .pwd(temp.path())
        .args(&["--select", "T201", "--fix"])
        .passes();

    similar_asserts::assert_eq!(temp.read("app.py"), "def debug(x):\n    pass\n");
}

#[test]
fn fix_leaves_unfixable_violations() {
    let temp = default_project();
    temp.file("app.py", &format!("{INSECURE_CLIENT}print(client)\n"));

    check()
        .pwd(temp.path())
        .args(&["--select", "S507,T201", "--fix"])
        .exits(1)
        .stdout_eq(
            "\
app.py:4:1: S507 Paramiko call with policy set to automatically trust the unknown host key
Fixed 1 error.
Found 1 error.
",
        );

    similar_asserts::assert_eq!(temp.read("app.py"), INSECURE_CLIENT);
}

#[test]
fn nested_print_is_reported_but_not_fixed() {
    let temp = default_project();
    let source = "value = str(print(1))\n";
    temp.file("app.py", source);

    check()
        .pwd(temp.path())
        .args(&["--select", "T201", "--fix"])
        .exits(1)
        .stdout_has("app.py:1:13: T201 `print` found");

    assert_eq!(temp.read("app.py"), source);
}

#[test]
fn without_fix_reports_fixable_count() {
    let temp = default_project();
    let source = "print(1)\nprint(2)\n";
    temp.file("app.py", source);

    check()
        .pwd(temp.path())
        .args(&["--select", "T201"])
        .exits(1)
        .stdout_has("[*] 2 fixable with the --fix option.");

    assert_eq!(temp.read("app.py"), source);
}

#[test]
fn fix_count_in_json() {
    let temp = default_project();
    temp.file("app.py", "print(1)\nx = 1\n");

    let json = check()
        .pwd(temp.path())
        .args(&["--select", "T201", "--fix"])
        .json()
        .passes();
    assert_eq!(json.value()["fixed"], 1);
    assert!(json.violations().is_empty());
}
