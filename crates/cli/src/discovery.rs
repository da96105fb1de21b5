// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Config file discovery.
//!
//! Walks from the start directory up to the git root looking for pyward.toml.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Name of the project config file.
pub const CONFIG_FILE: &str = "pyward.toml";

/// Find pyward.toml starting from `start_dir` and walking up to git root.
pub fn find_config(start_dir: &Path) -> Option<PathBuf> {
    start_dir
        .ancestors()
        .find_map(|dir| {
            let candidate = dir.join(CONFIG_FILE);
            if candidate.is_file() {
                Some(Some(candidate))
            } else if dir.join(".git").exists() {
                // Git root reached without a config
                Some(None)
            } else {
                None
            }
        })
        .flatten()
}

/// Resolve config path from CLI arg, env var, or discovery.
///
/// Priority:
/// 1. CLI flag `-C`/`--config` (clap also reads `PYWARD_CONFIG`)
/// 2. Discovery from `cwd` up to the git root
/// 3. None (use defaults)
pub fn resolve_config(explicit: Option<&Path>, cwd: &Path) -> Result<Option<PathBuf>> {
    match explicit {
        Some(path) if path.is_file() => Ok(Some(path.to_path_buf())),
        Some(path) => Err(Error::Config {
            message: format!("config file not found: {}", path.display()),
            path: Some(path.to_path_buf()),
        }),
        None => Ok(find_config(cwd)),
    }
}

/// Directory that per-file ignore globs are relative to.
///
/// The config file's directory when one is in use, otherwise `cwd`.
pub fn project_root(config_path: Option<&Path>, cwd: &Path) -> PathBuf {
    config_path
        .and_then(Path::parent)
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| cwd.to_path_buf())
}

#[cfg(test)]
#[path = "discovery_tests.rs"]
mod tests;
