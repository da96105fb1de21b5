// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Lint one source text, optionally fixing it.

use std::borrow::Cow;
use std::sync::Arc;

use crate::ast::parse_module;
use crate::checker::check_module;
use crate::diagnostic::Diagnostic;
use crate::fix::apply_fixes;
use crate::noqa;
use crate::rules::Rule;
use crate::rules::pycodestyle::{SyntaxError, syntax_error_message};
use crate::source::Locator;

/// Upper bound on lint-and-fix passes over one file.
pub const MAX_FIX_ITERATIONS: usize = 100;

/// Diagnostics for one file, after fixing when requested.
#[derive(Debug)]
pub struct LintResult<'a> {
    /// Remaining diagnostics, sorted by position then code.
    pub diagnostics: Vec<Diagnostic>,
    /// Final source text. Borrowed when nothing was fixed.
    pub source: Cow<'a, str>,
    /// Number of fixes applied.
    pub fixed: usize,
}

impl LintResult<'_> {
    pub fn is_modified(&self) -> bool {
        matches!(self.source, Cow::Owned(_))
    }
}

/// Lint `source` once.
pub fn lint_only(source: &str, rules: &[Arc<dyn Rule>]) -> Vec<Diagnostic> {
    check_source(source, rules)
}

/// Lint `source`, applying fixes until none apply.
pub fn lint_fix<'a>(source: &'a str, rules: &[Arc<dyn Rule>]) -> LintResult<'a> {
    let mut transformed: Cow<'a, str> = Cow::Borrowed(source);
    let mut fixed = 0;
    let mut iterations = 0;

    loop {
        let diagnostics = check_source(&transformed, rules);

        if iterations >= MAX_FIX_ITERATIONS {
            tracing::warn!("fixes did not converge after {MAX_FIX_ITERATIONS} passes");
            return LintResult {
                diagnostics,
                source: transformed,
                fixed,
            };
        }

        match apply_fixes(&diagnostics, &transformed) {
            Some(result) => {
                tracing::debug!("pass {}: applied {} fix(es)", iterations + 1, result.applied);
                fixed += result.applied;
                iterations += 1;
                transformed = Cow::Owned(result.source);
            }
            None => {
                return LintResult {
                    diagnostics,
                    source: transformed,
                    fixed,
                };
            }
        }
    }
}

fn check_source(source: &str, rules: &[Arc<dyn Rule>]) -> Vec<Diagnostic> {
    let locator = Locator::new(source);
    let mut diagnostics = match parse_module(source) {
        Ok(module) => check_module(&module, &locator, rules),
        Err(err) => {
            tracing::debug!("syntax error at {}: {}", err.range, err.message);
            if rules.iter().any(|rule| rule.code() == "E999") {
                vec![
                    Diagnostic::new(&SyntaxError, err.range)
                        .with_message(syntax_error_message(&err.message)),
                ]
            } else {
                Vec::new()
            }
        }
    };

    diagnostics = noqa::filter(diagnostics, &locator);
    diagnostics.sort_by(|a, b| {
        (a.range.start, a.code).cmp(&(b.range.start, b.code))
    });
    diagnostics
}

#[cfg(test)]
#[path = "linter_tests.rs"]
mod tests;
