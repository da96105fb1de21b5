// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared unit test utilities.
//!
//! Provides common helpers for unit tests in the cli crate.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tempfile::TempDir;

use crate::diagnostic::Diagnostic;
use crate::linter::lint_only;
use crate::rules::{Rule, select_rules};
use crate::source::Locator;

/// Creates a temp directory with a minimal pyward.toml.
pub fn temp_project() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("pyward.toml"), "version = 1\n").unwrap();
    dir
}

/// Creates a temp directory with custom config content.
pub fn temp_project_with_config(config: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("pyward.toml"), config).unwrap();
    dir
}

/// Creates a directory tree from a list of (path, content) pairs.
///
/// Parent directories are created automatically.
pub fn create_tree(root: &Path, files: &[(&str, &str)]) {
    for (path, content) in files {
        let full_path = root.join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(full_path, content).unwrap();
    }
}

/// Rules matching `select`, e.g. `&["S507"]`.
pub fn rules(select: &[&str]) -> Vec<Arc<dyn Rule>> {
    let select: Vec<String> = select.iter().map(|s| s.to_string()).collect();
    select_rules(&select, &[])
}

/// Lint `source` with the rules matching `select`.
pub fn lint(source: &str, select: &[&str]) -> Vec<Diagnostic> {
    lint_only(source, &rules(select))
}

fn resources() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("resources/test")
}

/// Path of a lint fixture, relative to `resources/test/fixtures`.
pub fn fixture_path(relative: &str) -> PathBuf {
    resources().join("fixtures").join(relative)
}

/// Render diagnostics one per line as `file:line:col: CODE message`.
pub fn render(file_name: &str, source: &str, diagnostics: &[Diagnostic]) -> String {
    let locator = Locator::new(source);
    diagnostics
        .iter()
        .map(|diagnostic| {
            let location = locator.location(diagnostic.range.start);
            format!(
                "{file_name}:{}:{}: {} {}\n",
                location.line, location.column, diagnostic.code, diagnostic.message
            )
        })
        .collect()
}

/// Lint a fixture and compare against its committed snapshot.
///
/// The snapshot lives at `resources/test/snapshots/<rule>_<file>.snap`.
pub fn assert_fixture_snapshot(relative: &str, select: &[&str]) {
    let path = fixture_path(relative);
    let source = fs::read_to_string(&path).unwrap();
    let file_name = path.file_name().unwrap().to_string_lossy().into_owned();
    let actual = render(&file_name, &source, &lint(&source, select));

    let snapshot = resources()
        .join("snapshots")
        .join(format!("{}_{}.snap", select.join("_"), file_name));
    let expected = fs::read_to_string(&snapshot)
        .unwrap_or_else(|e| panic!("missing snapshot {}: {e}", snapshot.display()));
    similar_asserts::assert_eq!(actual, expected);
}
