// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Test helpers for behavioral specifications.
//!
//! Provides a small DSL for testing pyward CLI behavior.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

pub use assert_cmd::prelude::*;
pub use predicates;
pub use predicates::prelude::{Predicate, PredicateBooleanExt};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Trait for converting into a string predicate.
/// Allows passing `&str` (as contains) or any `Predicate<str>`.
pub trait IntoStrPredicate<P: Predicate<str>> {
    fn into_predicate(self) -> P;
}

impl IntoStrPredicate<predicates::str::ContainsPredicate> for &str {
    fn into_predicate(self) -> predicates::str::ContainsPredicate {
        predicates::str::contains(self)
    }
}

impl<P: Predicate<str>> IntoStrPredicate<P> for P {
    fn into_predicate(self) -> P {
        self
    }
}

/// Returns a Command configured to run the pyward binary.
///
/// Environment that changes behavior is cleared so host settings don't leak in.
pub fn pyward_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("pyward"));
    for key in ["PYWARD_CONFIG", "PYWARD_LOG", "NO_COLOR", "COLOR"] {
        cmd.env_remove(key);
    }
    cmd
}

/// Create a builder for `pyward check`.
pub fn check() -> CheckBuilder<Text> {
    CheckBuilder::new()
}

/// Typestate markers for output mode
pub struct Text;
pub struct Json;

/// High-level check builder for fluent test assertions
pub struct CheckBuilder<Mode = Text> {
    dir: Option<PathBuf>,
    args: Vec<String>,
    envs: Vec<(String, String)>,
    _mode: PhantomData<Mode>,
}

#[allow(dead_code)]
impl CheckBuilder<Text> {
    fn new() -> Self {
        Self {
            dir: None,
            args: Vec::new(),
            envs: Vec::new(),
            _mode: PhantomData,
        }
    }

    pub fn json(self) -> CheckBuilder<Json> {
        CheckBuilder {
            dir: self.dir,
            args: self.args,
            envs: self.envs,
            _mode: PhantomData,
        }
    }

    pub fn passes(self) -> RunAssert {
        run_passes(self.command())
    }

    pub fn fails(self) -> RunAssert {
        run_fails(self.command())
    }

    pub fn exits(self, code: i32) -> RunAssert {
        run_exits(self.command(), code)
    }
}

#[allow(dead_code)]
impl CheckBuilder<Json> {
    pub fn passes(self) -> CheckJson {
        CheckJson::new(&run_passes(self.command()).output.stdout)
    }

    pub fn fails(self) -> CheckJson {
        CheckJson::new(&run_fails(self.command()).output.stdout)
    }
}

#[allow(dead_code)]
impl<Mode: 'static> CheckBuilder<Mode> {
    /// Set fixture directory by name
    pub fn on(mut self, fixture_name: &str) -> Self {
        self.dir = Some(fixture(fixture_name));
        self
    }

    /// Set working directory (alternative to fixture)
    pub fn pwd(mut self, path: impl Into<PathBuf>) -> Self {
        self.dir = Some(path.into());
        self
    }

    /// Add CLI arguments
    pub fn args(mut self, args: &[&str]) -> Self {
        self.args.extend(args.iter().map(|s| s.to_string()));
        self
    }

    /// Set environment variable
    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.envs.push((key.to_string(), value.to_string()));
        self
    }

    /// Build the command without running it
    fn command(self) -> Command {
        let is_json = std::any::TypeId::of::<Mode>() == std::any::TypeId::of::<Json>();
        let mut cmd = pyward_cmd();
        cmd.arg("check");

        if is_json {
            cmd.args(["-o", "json"]);
        }

        cmd.args(&self.args);

        if let Some(dir) = self.dir {
            cmd.current_dir(dir);
        }

        for (key, value) in &self.envs {
            cmd.env(key, value);
        }

        cmd
    }
}

fn run_passes(mut cmd: Command) -> RunAssert {
    let output = cmd.output().expect("command should run");
    assert!(
        output.status.success(),
        "expected check to pass, got exit code {:?}\nstdout: {}\nstderr: {}",
        output.status.code(),
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    RunAssert { output }
}

fn run_fails(mut cmd: Command) -> RunAssert {
    let output = cmd.output().expect("command should run");
    assert!(
        !output.status.success(),
        "expected check to fail, but it passed\nstdout: {}",
        String::from_utf8_lossy(&output.stdout)
    );
    RunAssert { output }
}

fn run_exits(mut cmd: Command, code: i32) -> RunAssert {
    let output = cmd.output().expect("command should run");
    assert_eq!(
        output.status.code(),
        Some(code),
        "expected exit code {}, got {:?}\nstdout: {}\nstderr: {}",
        code,
        output.status.code(),
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    RunAssert { output }
}

/// Result of a run for chaining assertions
pub struct RunAssert {
    output: std::process::Output,
}

#[allow(dead_code)]
impl RunAssert {
    /// Get stdout as string
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    /// Get stderr as string
    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }

    /// Assert stdout equals expected (with diff on failure)
    pub fn stdout_eq(self, expected: &str) -> Self {
        let stdout = String::from_utf8_lossy(&self.output.stdout);
        similar_asserts::assert_eq!(stdout, expected);
        self
    }

    /// Assert stderr equals expected (with diff on failure)
    pub fn stderr_eq(self, expected: &str) -> Self {
        let stderr = String::from_utf8_lossy(&self.output.stderr);
        similar_asserts::assert_eq!(stderr, expected);
        self
    }

    /// Assert stdout matches predicate.
    /// Prefer `stdout_eq` for strict matching.
    pub fn stdout_has<I, P>(self, predicate: I) -> Self
    where
        I: IntoStrPredicate<P>,
        P: Predicate<str>,
    {
        let stdout = String::from_utf8_lossy(&self.output.stdout);
        assert!(
            predicate.into_predicate().eval(&stdout),
            "stdout predicate failed:\n{}",
            stdout
        );
        self
    }

    /// Assert stdout does not match predicate.
    pub fn stdout_lacks<I, P>(self, predicate: I) -> Self
    where
        I: IntoStrPredicate<P>,
        P: Predicate<str>,
    {
        let stdout = String::from_utf8_lossy(&self.output.stdout);
        assert!(
            !predicate.into_predicate().eval(&stdout),
            "stdout should NOT match predicate:\n{}",
            stdout
        );
        self
    }

    /// Assert stderr matches predicate.
    pub fn stderr_has<I, P>(self, predicate: I) -> Self
    where
        I: IntoStrPredicate<P>,
        P: Predicate<str>,
    {
        let stderr = String::from_utf8_lossy(&self.output.stderr);
        assert!(
            predicate.into_predicate().eval(&stderr),
            "stderr predicate failed:\n{}",
            stderr
        );
        self
    }

    /// Assert stderr does not match predicate.
    pub fn stderr_lacks<I, P>(self, predicate: I) -> Self
    where
        I: IntoStrPredicate<P>,
        P: Predicate<str>,
    {
        let stderr = String::from_utf8_lossy(&self.output.stderr);
        assert!(
            !predicate.into_predicate().eval(&stderr),
            "stderr should NOT match predicate:\n{}",
            stderr
        );
        self
    }
}

/// JSON output of `pyward check -o json`
pub struct CheckJson {
    root: serde_json::Value,
}

#[allow(dead_code)]
impl CheckJson {
    fn new(stdout: &[u8]) -> Self {
        Self {
            root: serde_json::from_slice(stdout).expect("valid JSON"),
        }
    }

    /// Get the root JSON value
    pub fn value(&self) -> &serde_json::Value {
        &self.root
    }

    /// Get all violations as a slice
    pub fn violations(&self) -> &[serde_json::Value] {
        self.root
            .get("violations")
            .and_then(|v| v.as_array())
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Get all file errors as a slice
    pub fn errors(&self) -> &[serde_json::Value] {
        self.root
            .get("errors")
            .and_then(|v| v.as_array())
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Rule codes of all violations, in output order
    pub fn codes(&self) -> Vec<&str> {
        self.violations()
            .iter()
            .filter_map(|v| v.get("code").and_then(|c| c.as_str()))
            .collect()
    }

    /// `file:line` of all violations, in output order
    pub fn locations(&self) -> Vec<String> {
        self.violations()
            .iter()
            .map(|v| format!("{}:{}", v["file"].as_str().unwrap(), v["line"]))
            .collect()
    }
}

/// Get path to a test fixture directory
pub fn fixture(name: &str) -> PathBuf {
    let manifest_dir =
        std::env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR should be set");
    PathBuf::from(manifest_dir)
        .parent()
        .expect("parent should exist")
        .parent()
        .expect("grandparent should exist")
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Creates a temp project with a default pyward.toml
pub fn default_project() -> Project {
    Project::with_defaults()
}

// =============================================================================
// Project
// =============================================================================

/// Temporary test project directory with helper methods.
///
/// The directory gets an empty `.git` so config discovery stops at it.
///
/// ```ignore
/// let temp = default_project();
/// temp.config("[lint]\nselect = [\"T20\"]");
/// temp.file("app.py", "print(1)\n");
/// check().pwd(temp.path()).fails();
/// ```
pub struct Project {
    dir: tempfile::TempDir,
}

#[allow(dead_code)]
impl Project {
    /// Create an empty project with no config
    pub fn empty() -> Self {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join(".git")).unwrap();
        Self { dir }
    }

    /// Create a project with a default pyward.toml
    pub fn with_defaults() -> Self {
        let temp = Self::empty();
        temp.file("pyward.toml", "version = 1\n");
        temp
    }

    /// Get the project path
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write pyward.toml (auto-prefixes with `version = 1` if not present)
    pub fn config(&self, content: &str) {
        let content = if content.contains("version") {
            content.to_string()
        } else {
            format!("version = 1\n{}", content)
        };
        std::fs::write(self.dir.path().join("pyward.toml"), content).unwrap();
    }

    /// Write a file at the given path (parent directories created automatically)
    pub fn file(&self, path: impl AsRef<Path>, content: &str) {
        let full_path = self.dir.path().join(path.as_ref());
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(full_path, content).unwrap();
    }

    /// Read a file back
    pub fn read(&self, path: impl AsRef<Path>) -> String {
        std::fs::read_to_string(self.dir.path().join(path.as_ref())).unwrap()
    }
}

/// Source that trips S507 once, on line 4.
pub const INSECURE_CLIENT: &str = "\
from paramiko import AutoAddPolicy, SSHClient

client = SSHClient()
client.set_missing_host_key_policy(AutoAddPolicy)
";
