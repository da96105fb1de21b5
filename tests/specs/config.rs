// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Behavioral specs for pyward.toml loading and validation.
//!
//! Unknown keys and selectors warn (forward compatibility); a bad version
//! or an unreadable config is a config error (exit 2).

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use crate::prelude::*;

// =============================================================================
// VALIDATION
// =============================================================================

#[test]
fn unknown_config_key_warns() {
    let temp = Project::empty();
    temp.config("unknown_key = true\n");

    check()
        .pwd(temp.path())
        .passes()
        .stderr_has("pyward: warning:")
        .stderr_has("unrecognized field `unknown_key` (ignored)");
}

#[test]
fn unknown_nested_key_warns() {
    let temp = Project::empty();
    temp.config("[lint]\nextend-select = [\"T\"]\n");

    check()
        .pwd(temp.path())
        .passes()
        .stderr_has("unrecognized field `lint.extend-select` (ignored)");
}

#[test]
fn unknown_selector_warns_with_suggestion() {
    let temp = Project::empty();
    temp.config("[lint]\nselect = [\"print\"]\n");
    temp.file("app.py", "print(1)\n");

    check()
        .pwd(temp.path())
        .passes()
        .stderr_has("lint.select: unknown rule selector `print`. Did you mean `T201`?");
}

#[test]
fn valid_config_has_no_warnings() {
    let temp = Project::empty();
    temp.config(
        r#"
[project]
name = "svc"
ignore.patterns = ["build/**"]

[lint]
select = ["E", "S", "T20"]
ignore = ["T203"]

[lint.per-file-ignores]
"tests/**" = ["S507"]
"#,
    );

    check().pwd(temp.path()).passes().stderr_eq("");
}

#[test]
fn unsupported_version_is_config_error() {
    let temp = Project::empty();
    temp.config("version = 2\n");

    check()
        .pwd(temp.path())
        .exits(2)
        .stderr_has("unsupported config version 2");
}

#[test]
fn invalid_toml_is_config_error() {
    let temp = Project::empty();
    temp.file("pyward.toml", "version = \n");

    check().pwd(temp.path()).exits(2).stderr_has("pyward: config error:");
}

#[test]
fn invalid_per_file_glob_is_config_error() {
    let temp = Project::empty();
    temp.config("[lint.per-file-ignores]\n\"src/[\" = [\"S507\"]\n");

    check().pwd(temp.path()).exits(2).stderr_has("invalid glob");
}

#[test]
fn config_only_validates_without_linting() {
    let temp = default_project();
    temp.file("app.py", INSECURE_CLIENT);

    check()
        .pwd(temp.path())
        .args(&["--config-only"])
        .passes()
        .stdout_eq("");
}

#[test]
fn config_only_reports_errors() {
    let temp = Project::empty();
    temp.config("version = 7\n");

    check().pwd(temp.path()).args(&["--config-only"]).exits(2);
}

// =============================================================================
// DISCOVERY AND PRECEDENCE
// =============================================================================

#[test]
fn config_discovered_from_parent_directory() {
    let temp = Project::empty();
    temp.config("[lint]\nselect = [\"T201\"]\n");
    temp.file("pkg/app.py", "print(1)\n");

    check()
        .pwd(temp.path().join("pkg"))
        .exits(1)
        .stdout_has("app.py:1:1: T201");
}

#[test]
fn explicit_config_flag_wins() {
    let temp = default_project();
    temp.file("strict.toml", "version = 1\n[lint]\nselect = [\"ALL\"]\n");
    temp.file("app.py", "print(1)\n");

    check().pwd(temp.path()).passes();
    check()
        .pwd(temp.path())
        .args(&["-C", "strict.toml"])
        .exits(1)
        .stdout_has("T201");
}

#[test]
fn config_env_var_is_used() {
    let temp = default_project();
    temp.file("strict.toml", "version = 1\n[lint]\nselect = [\"T20\"]\n");
    temp.file("app.py", "print(1)\n");

    check()
        .pwd(temp.path())
        .env("PYWARD_CONFIG", "strict.toml")
        .exits(1)
        .stdout_has("T201");
}

#[test]
fn missing_explicit_config_is_error() {
    let temp = default_project();

    check()
        .pwd(temp.path())
        .args(&["--config", "nope.toml"])
        .exits(2)
        .stderr_has("config file not found");
}

#[test]
fn cli_select_overrides_config_select() {
    let temp = Project::empty();
    temp.config("[lint]\nselect = [\"T201\"]\n");
    temp.file("app.py", INSECURE_CLIENT);

    check().pwd(temp.path()).passes();
    check()
        .pwd(temp.path())
        .args(&["--select", "S507"])
        .exits(1);
}

#[test]
fn cli_ignore_extends_config_ignore() {
    let temp = Project::empty();
    temp.config("[lint]\nselect = [\"ALL\"]\nignore = [\"T203\"]\n");
    temp.file("app.py", &format!("{INSECURE_CLIENT}print(client)\n"));

    let json = check()
        .pwd(temp.path())
        .args(&["--ignore", "T201"])
        .json()
        .fails();
    assert_eq!(json.codes(), vec!["S507"]);
}

#[test]
fn debug_logging_goes_to_stderr() {
    let temp = default_project();

    check()
        .pwd(temp.path())
        .env("PYWARD_LOG", "debug")
        .passes()
        .stderr_has("loading config from")
        .stdout_eq("All checks passed!\n");
}
