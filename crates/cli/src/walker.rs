// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Python source discovery with gitignore support.
//!
//! Uses the `ignore` crate to stream `.py` and `.pyi` files while respecting
//! `.gitignore`, configured exclude patterns, and depth limits.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crossbeam_channel::{Receiver, Sender, bounded};
use ignore::overrides::{Override, OverrideBuilder};
use ignore::{WalkBuilder, WalkState};

use crate::config::IgnoreConfig;

/// Default maximum directory depth.
pub const DEFAULT_MAX_DEPTH: usize = 100;

/// Extensions linted when walking directories.
pub const PYTHON_EXTENSIONS: &[&str] = &["py", "pyi"];

/// Directories never descended into.
pub(crate) const SKIP_DIRECTORIES: &[&str] = &[
    ".git",
    "__pycache__",
    ".venv",
    "venv",
    ".tox",
    ".mypy_cache",
    "node_modules",
];

/// Default threshold for switching from sequential to parallel walking.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 1000;

/// Walker configuration.
#[derive(Debug, Clone)]
pub struct WalkerConfig {
    /// Maximum directory depth (default: 100).
    pub max_depth: Option<usize>,

    /// Exclude globs from `[project.ignore]`, relative to the walk root.
    pub exclude_patterns: Vec<String>,

    /// Whether to respect gitignore files.
    pub git_ignore: bool,

    /// Whether to skip hidden files.
    pub hidden: bool,

    /// Number of threads (0 = auto).
    pub threads: usize,

    /// Top-level entry count (times ten) above which the parallel walker is used.
    pub parallel_threshold: usize,
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            max_depth: Some(DEFAULT_MAX_DEPTH),
            exclude_patterns: Vec::new(),
            git_ignore: true,
            hidden: true,
            threads: 0,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

/// File discovered by the walker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkedFile {
    /// Path to the file.
    pub path: PathBuf,

    /// Directory depth from the walk root (0 for explicit file arguments).
    pub depth: usize,
}

/// Statistics from a walk operation.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct WalkStats {
    /// Python files discovered.
    pub files_found: usize,

    /// Files skipped because they are not Python sources.
    pub files_ignored: usize,

    /// Symlink loops detected.
    pub symlink_loops: usize,

    /// Errors encountered.
    pub errors: usize,
}

impl WalkStats {
    fn merge(&mut self, other: WalkStats) {
        self.files_found += other.files_found;
        self.files_ignored += other.files_ignored;
        self.symlink_loops += other.symlink_loops;
        self.errors += other.errors;
    }
}

fn is_loop_error(err: &ignore::Error) -> bool {
    match err {
        ignore::Error::Loop { .. } => true,
        ignore::Error::WithPath { err, .. }
        | ignore::Error::WithDepth { err, .. }
        | ignore::Error::WithLineNumber { err, .. } => is_loop_error(err),
        _ => false,
    }
}

/// True for `.py` and `.pyi` paths.
pub fn is_python_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| PYTHON_EXTENSIONS.contains(&ext))
}

fn is_skipped_dir(entry: &ignore::DirEntry) -> bool {
    entry.file_type().is_some_and(|t| t.is_dir())
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| SKIP_DIRECTORIES.contains(&name))
}

/// Counters shared by the walker threads.
#[derive(Default)]
struct Counters {
    files_found: AtomicUsize,
    files_ignored: AtomicUsize,
    symlink_loops: AtomicUsize,
    errors: AtomicUsize,
}

impl Counters {
    fn snapshot(&self) -> WalkStats {
        WalkStats {
            files_found: self.files_found.load(Ordering::Relaxed),
            files_ignored: self.files_ignored.load(Ordering::Relaxed),
            symlink_loops: self.symlink_loops.load(Ordering::Relaxed),
            errors: self.errors.load(Ordering::Relaxed),
        }
    }

    /// Handle one walk entry. Returns false once the receiver is gone.
    fn visit(&self, entry: Result<ignore::DirEntry, ignore::Error>, tx: &Sender<WalkedFile>) -> bool {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                if is_loop_error(&err) {
                    tracing::warn!("symlink loop detected: {}", err);
                    self.symlink_loops.fetch_add(1, Ordering::Relaxed);
                } else {
                    tracing::warn!("walk error: {}", err);
                    self.errors.fetch_add(1, Ordering::Relaxed);
                }
                return true;
            }
        };

        if !entry.file_type().is_some_and(|t| t.is_file()) {
            return true;
        }

        if !is_python_file(entry.path()) {
            self.files_ignored.fetch_add(1, Ordering::Relaxed);
            return true;
        }

        self.files_found.fetch_add(1, Ordering::Relaxed);
        tx.send(WalkedFile {
            depth: entry.depth(),
            path: entry.into_path(),
        })
        .is_ok()
    }
}

/// Python file walker with gitignore support.
pub struct FileWalker {
    config: WalkerConfig,
}

impl FileWalker {
    /// Create a new walker with the given configuration.
    pub fn new(config: WalkerConfig) -> Self {
        Self { config }
    }

    /// Create a walker from the project ignore config.
    pub fn from_ignore_config(ignore: &IgnoreConfig, max_depth: usize) -> Self {
        Self::new(WalkerConfig {
            max_depth: Some(max_depth),
            exclude_patterns: ignore.patterns.clone(),
            ..Default::default()
        })
    }

    /// Quick heuristic: a root with many top-level entries is worth a thread pool.
    fn should_use_parallel(&self, root: &Path) -> bool {
        let entry_count = std::fs::read_dir(root)
            .map(|entries| entries.count())
            .unwrap_or(0);

        entry_count >= self.config.parallel_threshold / 10
    }

    /// Exclude overrides. Only `!` globs are added, so unmatched paths stay
    /// subject to the normal ignore rules.
    fn overrides(&self, root: &Path) -> Option<Override> {
        if self.config.exclude_patterns.is_empty() {
            return None;
        }

        let mut builder = OverrideBuilder::new(root);
        for pattern in &self.config.exclude_patterns {
            if let Err(e) = builder.add(&format!("!{}", pattern)) {
                tracing::warn!("ignoring invalid exclude pattern `{}`: {}", pattern, e);
            }
        }
        match builder.build() {
            Ok(overrides) => Some(overrides),
            Err(e) => {
                tracing::warn!("failed to build exclude patterns: {}", e);
                None
            }
        }
    }

    /// Walk `root`, streaming Python files through the returned channel.
    ///
    /// Join the handle to get stats once the receiver is drained.
    pub fn walk(&self, root: &Path) -> (Receiver<WalkedFile>, WalkHandle) {
        let (tx, rx) = bounded(1000);

        let mut builder = WalkBuilder::new(root);
        builder
            .hidden(self.config.hidden)
            .git_ignore(self.config.git_ignore)
            .git_exclude(self.config.git_ignore)
            .git_global(self.config.git_ignore)
            .follow_links(true)
            .max_depth(self.config.max_depth)
            .filter_entry(|entry| !is_skipped_dir(entry));

        if self.config.threads > 0 {
            builder.threads(self.config.threads);
        }

        if let Some(overrides) = self.overrides(root) {
            builder.overrides(overrides);
        }

        let counters = Arc::new(Counters::default());
        let parallel = self.should_use_parallel(root);
        tracing::debug!(root = %root.display(), parallel, "walking");

        let handle = std::thread::spawn(move || {
            if parallel {
                builder.build_parallel().run(|| {
                    let tx = tx.clone();
                    let counters = Arc::clone(&counters);
                    Box::new(move |entry| {
                        if counters.visit(entry, &tx) {
                            WalkState::Continue
                        } else {
                            WalkState::Quit
                        }
                    })
                });
            } else {
                for entry in builder.build() {
                    if !counters.visit(entry, &tx) {
                        break;
                    }
                }
            }
            counters.snapshot()
        });

        (rx, WalkHandle { handle })
    }

    /// Walk and collect all files, sorted by path.
    pub fn walk_collect(&self, root: &Path) -> (Vec<WalkedFile>, WalkStats) {
        let (rx, handle) = self.walk(root);
        let mut files: Vec<_> = rx.iter().collect();
        let stats = handle.join();
        files.sort_by(|a, b| a.path.cmp(&b.path));
        (files, stats)
    }

    /// Expand command-line paths into the files to lint.
    ///
    /// Directories are walked; file arguments are kept regardless of
    /// extension. The result is sorted and free of duplicates.
    pub fn collect_paths(&self, paths: &[PathBuf]) -> (Vec<WalkedFile>, WalkStats) {
        let mut files = Vec::new();
        let mut stats = WalkStats::default();

        for path in paths {
            if path.is_dir() {
                let (walked, walk_stats) = self.walk_collect(path);
                files.extend(walked);
                stats.merge(walk_stats);
            } else {
                stats.files_found += 1;
                files.push(WalkedFile {
                    path: path.clone(),
                    depth: 0,
                });
            }
        }

        files.sort_by(|a, b| a.path.cmp(&b.path));
        files.dedup_by(|a, b| a.path == b.path);
        (files, stats)
    }
}

/// Handle to a running walk operation.
pub struct WalkHandle {
    handle: std::thread::JoinHandle<WalkStats>,
}

impl WalkHandle {
    /// Wait for the walk to complete and return stats.
    pub fn join(self) -> WalkStats {
        self.handle.join().unwrap_or_default()
    }
}

#[cfg(test)]
#[path = "walker_tests.rs"]
mod tests;
