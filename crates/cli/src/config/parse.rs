// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Parse helper functions for configuration.

use std::collections::BTreeMap;
use std::path::Path;

use super::suggest::warn_unknown_selector;
use super::{IgnoreConfig, LintConfig, ProjectConfig, config_error};
use crate::error::Result;
use crate::rules::is_valid_selector;

/// Known project keys in the config.
const KNOWN_PROJECT_KEYS: &[&str] = &["name", "ignore"];

/// Known lint keys in the config.
const KNOWN_LINT_KEYS: &[&str] = &["select", "ignore", "per-file-ignores"];

/// Parse a TOML array of strings into a Vec<String>.
pub(super) fn parse_string_array(value: Option<&toml::Value>) -> Option<Vec<String>> {
    value?.as_array().map(|arr| {
        arr.iter()
            .filter_map(|v| v.as_str().map(String::from))
            .collect()
    })
}

/// Parse a TOML array of strings, returning empty vec if not found.
pub(super) fn parse_string_array_or_empty(value: Option<&toml::Value>) -> Vec<String> {
    parse_string_array(value).unwrap_or_default()
}

/// Parse the `[project]` table.
pub(super) fn parse_project_config(value: Option<&toml::Value>, path: &Path) -> ProjectConfig {
    let Some(toml::Value::Table(t)) = value else {
        return ProjectConfig::default();
    };

    let name = t.get("name").and_then(|v| v.as_str()).map(String::from);

    let ignore = match t.get("ignore") {
        Some(toml::Value::Table(ignore_table)) => {
            for key in ignore_table.keys() {
                if key != "patterns" {
                    warn_unknown_key(path, &format!("project.ignore.{}", key));
                }
            }
            IgnoreConfig {
                patterns: parse_string_array_or_empty(ignore_table.get("patterns")),
            }
        }
        _ => IgnoreConfig::default(),
    };

    for key in t.keys() {
        if !KNOWN_PROJECT_KEYS.contains(&key.as_str()) {
            warn_unknown_key(path, &format!("project.{}", key));
        }
    }

    ProjectConfig { name, ignore }
}

/// Parse the `[lint]` table.
///
/// Unknown selectors warn and are kept; they simply match nothing. A
/// per-file-ignores pattern that is not a valid glob is an error.
pub(super) fn parse_lint_config(value: Option<&toml::Value>, path: &Path) -> Result<LintConfig> {
    let Some(toml::Value::Table(t)) = value else {
        return Ok(LintConfig::default());
    };

    for key in t.keys() {
        if !KNOWN_LINT_KEYS.contains(&key.as_str()) {
            warn_unknown_key(path, &format!("lint.{}", key));
        }
    }

    let select = parse_selectors(t.get("select"), "lint.select", path);
    let ignore = parse_selectors(t.get("ignore"), "lint.ignore", path);

    let mut per_file_ignores = BTreeMap::new();
    if let Some(toml::Value::Table(table)) = t.get("per-file-ignores") {
        for (pattern, codes) in table {
            globset::Glob::new(pattern).map_err(|e| {
                config_error(format!("lint.per-file-ignores: invalid glob `{pattern}`: {e}"), path)
            })?;
            let key = format!("lint.per-file-ignores.\"{pattern}\"");
            per_file_ignores.insert(pattern.clone(), parse_selectors(Some(codes), &key, path));
        }
    }

    Ok(LintConfig {
        select,
        ignore,
        per_file_ignores,
    })
}

fn parse_selectors(value: Option<&toml::Value>, key: &str, path: &Path) -> Vec<String> {
    let selectors = parse_string_array_or_empty(value);
    for selector in &selectors {
        if !is_valid_selector(selector) {
            warn_unknown_selector(path, key, selector);
        }
    }
    selectors
}

/// Warn about unknown config key.
pub(super) fn warn_unknown_key(path: &Path, key: &str) {
    eprintln!(
        "pyward: warning: {}: unrecognized field `{}` (ignored)",
        path.display(),
        key
    );
}
