// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Rule registry and selection.
//!
//! Built-in rules:
//! - E999: syntax error (enabled by default)
//! - S507: SSH client with no host key verification (enabled by default)
//! - T201: `print` found (disabled by default)
//! - T203: `pprint` found (disabled by default)

pub mod flake8_bandit;
pub mod flake8_print;
pub mod pycodestyle;

use std::sync::Arc;

use crate::ast::ExprCall;
use crate::checker::Checker;

/// Selector matching every rule.
pub const ALL: &str = "ALL";

/// A single lint rule.
///
/// Object-safe so the registry can hand out `Arc<dyn Rule>`.
pub trait Rule: Send + Sync {
    /// Stable code, e.g. "S507".
    fn code(&self) -> &'static str;

    /// Kebab-case name, e.g. "ssh-no-host-key-verification".
    fn name(&self) -> &'static str;

    /// Message attached to every diagnostic.
    fn message(&self) -> String;

    /// Longer explanation shown by `pyward rule`.
    fn explanation(&self) -> &'static str;

    /// Short imperative description of the fix, for fixable rules.
    fn fix_title(&self) -> Option<&'static str> {
        None
    }

    /// Whether the rule runs without an explicit selection.
    fn default_enabled(&self) -> bool {
        true
    }

    /// Inspect a call expression.
    fn check_call(&self, _checker: &mut Checker, _call: &ExprCall) {}
}

/// Create all registered rules, sorted by code.
pub fn all_rules() -> Vec<Arc<dyn Rule>> {
    vec![
        Arc::new(pycodestyle::SyntaxError),
        Arc::new(flake8_bandit::SshNoHostKeyVerification),
        Arc::new(flake8_print::Print),
        Arc::new(flake8_print::PPrint),
    ]
}

/// Look a rule up by exact code or name.
pub fn get_rule(key: &str) -> Option<Arc<dyn Rule>> {
    all_rules()
        .into_iter()
        .find(|rule| rule.code() == key || rule.name() == key)
}

/// True if `selector` is `ALL` or a prefix of at least one rule code.
pub fn is_valid_selector(selector: &str) -> bool {
    selector == ALL || all_rules().iter().any(|rule| rule.code().starts_with(selector))
}

fn matches(selector: &str, rule: &dyn Rule) -> bool {
    selector == ALL || rule.code().starts_with(selector)
}

/// Resolve the active rule set.
///
/// Semantics:
/// - No `select`: the default-enabled rules
/// - `select`: every rule matching any selector (`ALL` or a code prefix)
/// - `ignore` is subtracted afterwards
pub fn select_rules(select: &[String], ignore: &[String]) -> Vec<Arc<dyn Rule>> {
    all_rules()
        .into_iter()
        .filter(|rule| {
            if select.is_empty() {
                rule.default_enabled()
            } else {
                select.iter().any(|s| matches(s, rule.as_ref()))
            }
        })
        .filter(|rule| !ignore.iter().any(|s| matches(s, rule.as_ref())))
        .collect()
}

/// Drop rules matched by any of `ignore`.
pub fn without(rules: &[Arc<dyn Rule>], ignore: &[String]) -> Vec<Arc<dyn Rule>> {
    rules
        .iter()
        .filter(|rule| !ignore.iter().any(|s| matches(s, rule.as_ref())))
        .cloned()
        .collect()
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
