// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Resolved lint settings: the active rules and per-file ignores.
//!
//! Combines `[lint]` from pyward.toml with `--select`/`--ignore`. A CLI
//! `--select` replaces the configured selection; `--ignore` extends it.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use globset::{Glob, GlobMatcher};

use crate::config::{LintConfig, suggest_rule_selector};
use crate::error::{Error, Result};
use crate::rules::{self, Rule, is_valid_selector};

/// Rules disabled for files matching a glob.
#[derive(Debug, Clone)]
struct PerFileIgnore {
    matcher: GlobMatcher,
    selectors: Vec<String>,
}

/// Rule selection for a check run.
#[derive(Clone)]
pub struct Settings {
    rules: Vec<Arc<dyn Rule>>,
    per_file_ignores: Vec<PerFileIgnore>,
    root: PathBuf,
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let codes: Vec<&str> = self.rules.iter().map(|rule| rule.code()).collect();
        f.debug_struct("Settings")
            .field("rules", &codes)
            .field("per_file_ignores", &self.per_file_ignores.len())
            .field("root", &self.root)
            .finish()
    }
}

/// Reject selectors that match no rule, suggesting a fix when one is obvious.
fn validate_cli_selectors(flag: &str, selectors: &[String]) -> Result<()> {
    for selector in selectors {
        if is_valid_selector(selector) {
            continue;
        }
        let message = match suggest_rule_selector(selector) {
            Some(suggested) => format!(
                "{flag}: unknown rule selector `{selector}`. Did you mean `{suggested}`?"
            ),
            None => format!("{flag}: unknown rule selector `{selector}`"),
        };
        return Err(Error::Argument(message));
    }
    Ok(())
}

impl Settings {
    /// Resolve settings from config and command-line overrides.
    ///
    /// `root` is the directory per-file ignore globs are relative to.
    pub fn resolve(
        lint: &LintConfig,
        cli_select: &[String],
        cli_ignore: &[String],
        root: &Path,
    ) -> Result<Self> {
        validate_cli_selectors("--select", cli_select)?;
        validate_cli_selectors("--ignore", cli_ignore)?;

        let select = if cli_select.is_empty() {
            &lint.select
        } else {
            cli_select
        };
        let ignore: Vec<String> = lint.ignore.iter().chain(cli_ignore).cloned().collect();
        let rules = rules::select_rules(select, &ignore);

        let mut per_file_ignores = Vec::with_capacity(lint.per_file_ignores.len());
        for (pattern, selectors) in &lint.per_file_ignores {
            let glob = Glob::new(pattern).map_err(|e| Error::Config {
                message: format!("lint.per-file-ignores: invalid glob `{pattern}`: {e}"),
                path: None,
            })?;
            per_file_ignores.push(PerFileIgnore {
                matcher: glob.compile_matcher(),
                selectors: selectors.clone(),
            });
        }

        let settings = Self {
            rules,
            per_file_ignores,
            root: root.to_path_buf(),
        };
        tracing::debug!(?settings, "resolved settings");
        Ok(settings)
    }

    /// Settings from config alone.
    pub fn from_config(lint: &LintConfig, root: &Path) -> Result<Self> {
        Self::resolve(lint, &[], &[], root)
    }

    /// Rules active for the run, before per-file ignores.
    pub fn rules(&self) -> &[Arc<dyn Rule>] {
        &self.rules
    }

    /// Rules active for `path`.
    ///
    /// Globs match the path relative to the project root; paths outside
    /// the root are matched as given.
    pub fn rules_for(&self, path: &Path) -> Vec<Arc<dyn Rule>> {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        let relative = relative.strip_prefix(".").unwrap_or(relative);

        let ignored: Vec<String> = self
            .per_file_ignores
            .iter()
            .filter(|entry| entry.matcher.is_match(relative))
            .flat_map(|entry| entry.selectors.iter().cloned())
            .collect();

        if ignored.is_empty() {
            self.rules.clone()
        } else {
            tracing::debug!(path = %path.display(), ?ignored, "per-file ignores");
            rules::without(&self.rules, &ignored)
        }
    }
}

#[cfg(test)]
#[path = "settings_tests.rs"]
mod tests;
