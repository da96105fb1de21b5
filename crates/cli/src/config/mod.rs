// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Configuration parsing and validation.
//!
//! Handles pyward.toml parsing with version validation, unknown key warnings
//! and rule selector suggestions.

mod parse;
mod suggest;

pub use suggest::suggest_rule_selector;

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};
use parse::{parse_lint_config, parse_project_config, warn_unknown_key};

/// Minimum config structure for version checking.
#[derive(Deserialize)]
struct VersionOnly {
    version: Option<i64>,
}

/// Config with flexible parsing that captures unknown keys.
#[derive(Deserialize)]
struct FlexibleConfig {
    version: i64,

    #[serde(default)]
    project: Option<toml::Value>,

    #[serde(default)]
    lint: Option<toml::Value>,

    #[serde(flatten)]
    unknown: BTreeMap<String, toml::Value>,
}

/// Full configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Config file version (must be 1).
    pub version: i64,

    /// Project configuration.
    #[serde(default)]
    pub project: ProjectConfig,

    /// Rule selection.
    #[serde(default)]
    pub lint: LintConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    /// Project name.
    pub name: Option<String>,

    /// Custom ignore patterns.
    #[serde(default)]
    pub ignore: IgnoreConfig,
}

/// Ignore pattern configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IgnoreConfig {
    /// Glob patterns to skip while walking (e.g., "build/**", "*.generated.py").
    #[serde(default)]
    pub patterns: Vec<String>,
}

/// Which rules run where.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LintConfig {
    /// Rule codes or prefixes to enable. Empty means the default rules.
    #[serde(default)]
    pub select: Vec<String>,

    /// Rule codes or prefixes to disable.
    #[serde(default)]
    pub ignore: Vec<String>,

    /// Glob pattern to rule codes or prefixes disabled for matching files.
    #[serde(default, rename = "per-file-ignores")]
    pub per_file_ignores: BTreeMap<String, Vec<String>>,
}

/// Currently supported config version.
pub const SUPPORTED_VERSION: i64 = 1;

/// Known top-level keys in the config.
const KNOWN_KEYS: &[&str] = &["version", "project", "lint"];

/// Load and validate config from a file path.
pub fn load(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    parse(&content, path)
}

/// Load config with warnings for unknown keys.
pub fn load_with_warnings(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    parse_with_warnings(&content, path)
}

fn config_error(message: impl Into<String>, path: &Path) -> Error {
    Error::Config {
        message: message.into(),
        path: Some(path.to_path_buf()),
    }
}

/// Parse config from string content (strict mode).
pub fn parse(content: &str, path: &Path) -> Result<Config> {
    // First check version
    let version_check: VersionOnly =
        toml::from_str(content).map_err(|e| config_error(e.to_string(), path))?;

    let version = version_check
        .version
        .ok_or_else(|| config_error("missing required field: version", path))?;

    if version != SUPPORTED_VERSION {
        return Err(config_error(
            format!(
                "unsupported config version {} (supported: {})\n  Upgrade pyward to use this config.",
                version, SUPPORTED_VERSION
            ),
            path,
        ));
    }

    toml::from_str(content).map_err(|e| config_error(e.to_string(), path))
}

/// Parse config, warning on unknown keys and unknown rule selectors.
pub fn parse_with_warnings(content: &str, path: &Path) -> Result<Config> {
    let flexible: FlexibleConfig =
        toml::from_str(content).map_err(|e| config_error(e.to_string(), path))?;

    if flexible.version != SUPPORTED_VERSION {
        return Err(config_error(
            format!(
                "unsupported config version {} (supported: {})",
                flexible.version, SUPPORTED_VERSION
            ),
            path,
        ));
    }

    let unknown_keys: BTreeSet<&str> = flexible
        .unknown
        .keys()
        .map(String::as_str)
        .filter(|key| !KNOWN_KEYS.contains(key))
        .collect();
    for key in unknown_keys {
        warn_unknown_key(path, key);
    }

    Ok(Config {
        version: flexible.version,
        project: parse_project_config(flexible.project.as_ref(), path),
        lint: parse_lint_config(flexible.lint.as_ref(), path)?,
    })
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
