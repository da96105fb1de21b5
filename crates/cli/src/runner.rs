// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Parallel lint runner with error recovery.
//!
//! Lints files in parallel using rayon, isolating failures so one
//! unreadable file or rule panic doesn't stop the rest of the run.

use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::check::{FileResult, Violation};
use crate::linter::{lint_fix, lint_only};
use crate::reader::FileReader;
use crate::settings::Settings;
use crate::source::Locator;
use crate::walker::WalkedFile;

/// Configuration for the lint runner.
#[derive(Debug, Clone, Default)]
pub struct RunnerConfig {
    /// Apply fixes and write changed files back.
    pub fix: bool,
    /// Paths are reported relative to this directory when under it.
    pub display_root: Option<PathBuf>,
}

/// The lint runner lints many files in parallel.
pub struct LintRunner {
    config: RunnerConfig,
    reader: FileReader,
}

impl LintRunner {
    pub fn new(config: RunnerConfig) -> Self {
        Self {
            config,
            reader: FileReader::new(),
        }
    }

    /// Use a custom reader (e.g., a smaller size limit).
    pub fn with_reader(mut self, reader: FileReader) -> Self {
        self.reader = reader;
        self
    }

    /// Lint every file and return results sorted by display path.
    pub fn run(&self, files: &[WalkedFile], settings: &Settings) -> Vec<FileResult> {
        let mut results: Vec<FileResult> = files
            .par_iter()
            .map(|file| {
                let shown = self.display_path(&file.path);
                match std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                    self.lint_file(&file.path, &shown, settings)
                })) {
                    Ok(result) => result,
                    Err(_) => {
                        tracing::warn!("panic while linting {}", shown.display());
                        let err = crate::Error::Internal("linter panicked".to_string());
                        FileResult::failed(shown, err.to_string())
                    }
                }
            })
            .collect();

        results.sort_by(|a, b| a.path.cmp(&b.path));
        results
    }

    fn display_path(&self, path: &Path) -> PathBuf {
        self.config
            .display_root
            .as_deref()
            .and_then(|root| path.strip_prefix(root).ok())
            .unwrap_or(path)
            .to_path_buf()
    }

    fn lint_file(&self, path: &Path, shown: &Path, settings: &Settings) -> FileResult {
        let source = match self.reader.read_source(path) {
            Ok(source) => source,
            Err(e) => {
                tracing::warn!("skipping {}: {}", shown.display(), e);
                return FileResult::failed(shown, read_error_message(&e));
            }
        };
        let rules = settings.rules_for(path);

        if !self.config.fix {
            let diagnostics = lint_only(&source.text, &rules);
            let locator = Locator::new(&source.text);
            return FileResult {
                path: shown.to_path_buf(),
                violations: diagnostics
                    .iter()
                    .map(|d| Violation::from_diagnostic(shown, d, &locator))
                    .collect(),
                fixed: 0,
                error: None,
            };
        }

        let result = lint_fix(&source.text, &rules);
        let locator = Locator::new(&result.source);
        let violations = result
            .diagnostics
            .iter()
            .map(|d| Violation::from_diagnostic(shown, d, &locator))
            .collect();

        if result.is_modified() {
            if let Err(e) = std::fs::write(path, source.encode(&result.source)) {
                return FileResult {
                    path: shown.to_path_buf(),
                    violations,
                    fixed: 0,
                    error: Some(format!("failed to write fixes: {e}")),
                };
            }
            tracing::debug!("fixed {} issue(s) in {}", result.fixed, shown.display());
        }

        FileResult {
            path: shown.to_path_buf(),
            violations,
            fixed: result.fixed,
            error: None,
        }
    }
}

/// Error text without the path, which the output already shows.
fn read_error_message(err: &crate::Error) -> String {
    match err {
        crate::Error::Io { source, .. } => source.to_string(),
        crate::Error::Parse { message, .. } => message.clone(),
        crate::Error::FileTooLarge { size, max_size, .. } => {
            format!("file too large ({size} bytes, max: {max_size} bytes)")
        }
        other => other.to_string(),
    }
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
