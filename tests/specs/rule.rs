// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Behavioral specs for `pyward rule`.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use crate::prelude::*;

#[test]
fn explains_rule_by_code() {
    pyward_cmd()
        .args(["rule", "S507"])
        .assert()
        .success()
        .stdout(predicates::str::contains(
            "ssh-no-host-key-verification (S507)",
        ))
        .stdout(predicates::str::contains("Enabled by default: yes"))
        .stdout(predicates::str::contains("Fix: not available"))
        .stdout(predicates::str::contains("RejectPolicy"));
}

#[test]
fn explains_rule_by_name() {
    pyward_cmd()
        .args(["rule", "print"])
        .assert()
        .success()
        .stdout(predicates::str::contains("print (T201)"))
        .stdout(predicates::str::contains("Enabled by default: no"))
        .stdout(predicates::str::contains("Fix: Remove `print`"));
}

#[test]
fn unknown_rule_is_argument_error() {
    pyward_cmd()
        .args(["rule", "s507"])
        .assert()
        .code(2)
        .stderr(predicates::str::contains(
            "unknown rule `s507`. Did you mean `S507`?",
        ));
}

#[test]
fn rule_requires_code_or_all() {
    pyward_cmd().arg("rule").assert().code(2);
}

#[test]
fn all_lists_every_rule() {
    let output = pyward_cmd()
        .args(["rule", "--all", "-o", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let rules: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let codes: Vec<&str> = rules
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["code"].as_str().unwrap())
        .collect();
    assert_eq!(codes, vec!["E999", "S507", "T201", "T203"]);
}

#[test]
fn single_rule_json() {
    let output = pyward_cmd()
        .args(["rule", "T203", "-o", "json"])
        .output()
        .unwrap();
    let rule: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();

    assert_eq!(rule["name"], "p-print");
    assert_eq!(rule["default_enabled"], false);
    assert_eq!(rule["fixable"], true);
    assert_eq!(rule["fix_title"], "Remove `pprint`");
}
