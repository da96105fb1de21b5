// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Check result types for output formatting.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::diagnostic::Diagnostic;
use crate::source::Locator;

/// A diagnostic resolved to a file position.
///
/// Lines and columns are 1-based; columns count characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// File path as given on the command line or found by the walker.
    pub file: PathBuf,

    pub line: u32,
    pub column: u32,
    pub end_line: u32,
    pub end_column: u32,

    /// Rule code (e.g., "S507").
    pub code: String,

    /// Rule name (e.g., "ssh-no-host-key-verification").
    pub rule: String,

    pub message: String,

    /// Fix description, present only when a fix is available.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fix_title: Option<String>,
}

impl Violation {
    /// Resolve a diagnostic's byte range against the file's source.
    pub fn from_diagnostic(file: &Path, diagnostic: &Diagnostic, locator: &Locator) -> Self {
        let start = locator.location(diagnostic.range.start);
        let end = locator.location(diagnostic.range.end);
        Self {
            file: file.to_path_buf(),
            line: start.line,
            column: start.column,
            end_line: end.line,
            end_column: end.column,
            code: diagnostic.code.to_string(),
            rule: diagnostic.name.to_string(),
            message: diagnostic.message.clone(),
            fix_title: diagnostic
                .fix
                .as_ref()
                .and(diagnostic.fix_title.clone()),
        }
    }

    /// Whether `--fix` could resolve this violation.
    pub fn is_fixable(&self) -> bool {
        self.fix_title.is_some()
    }
}

/// A file that could not be linted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileError {
    pub file: PathBuf,
    pub message: String,
}

/// Outcome of linting one file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileResult {
    pub path: PathBuf,
    pub violations: Vec<Violation>,
    /// Fixes applied and written back.
    pub fixed: usize,
    pub error: Option<String>,
}

impl FileResult {
    /// Result for a file that failed before linting finished.
    pub fn failed(path: impl Into<PathBuf>, error: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            error: Some(error.into()),
            ..Default::default()
        }
    }
}

/// Aggregated results for a check run.
#[derive(Debug, Clone, Serialize)]
pub struct CheckOutput {
    /// ISO 8601 timestamp.
    pub timestamp: String,

    /// True when no violations remain and every file was linted.
    pub passed: bool,

    pub files_checked: usize,

    /// Fixes applied across all files.
    pub fixed: usize,

    pub violations: Vec<Violation>,

    pub errors: Vec<FileError>,
}

impl CheckOutput {
    /// Flatten per-file results, which the runner returns sorted by path.
    pub fn new(timestamp: String, results: Vec<FileResult>) -> Self {
        let files_checked = results.len();
        let mut fixed = 0;
        let mut violations = Vec::new();
        let mut errors = Vec::new();

        for result in results {
            fixed += result.fixed;
            violations.extend(result.violations);
            if let Some(message) = result.error {
                errors.push(FileError {
                    file: result.path,
                    message,
                });
            }
        }

        Self {
            timestamp,
            passed: violations.is_empty() && errors.is_empty(),
            files_checked,
            fixed,
            violations,
            errors,
        }
    }

    /// Count total violations.
    pub fn total_violations(&self) -> usize {
        self.violations.len()
    }

    /// Count violations `--fix` could resolve.
    pub fn fixable_violations(&self) -> usize {
        self.violations.iter().filter(|v| v.is_fixable()).count()
    }
}

#[cfg(test)]
#[path = "check_tests.rs"]
mod tests;
