// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Pyward: a Python linter that follows imports and bindings.
//!
//! Source is parsed with tree-sitter, lowered into a small typed AST, and
//! walked by a [`checker`] that tracks scopes and bindings so rules can ask
//! what a name refers to at the point of use.

pub mod ast;
pub mod check;
pub mod checker;
pub mod cli;
pub mod color;
pub mod config;
pub mod diagnostic;
pub mod discovery;
pub mod error;
pub mod fix;
pub mod linter;
pub mod noqa;
pub mod output;
pub mod reader;
pub mod rules;
pub mod runner;
pub mod semantic;
pub mod settings;
pub mod source;
pub mod walker;

pub use check::{CheckOutput, FileError, FileResult, Violation};
pub use cli::{CheckArgs, Cli, Command, OutputFormat, RuleArgs};
pub use diagnostic::Diagnostic;
pub use error::{Error, ExitCode, Result};
pub use linter::{LintResult, lint_fix, lint_only};
pub use reader::{FileReader, SourceText};
pub use settings::Settings;
pub use walker::{FileWalker, WalkStats, WalkedFile, WalkerConfig};

#[cfg(test)]
pub mod test_utils;
