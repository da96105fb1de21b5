// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Rule selector suggestions for config validation.

use std::path::Path;

use crate::rules::{ALL, all_rules, is_valid_selector};

/// Suggest a valid selector for a typo.
pub fn suggest_rule_selector(unknown: &str) -> Option<String> {
    // Empty strings can't be typos
    if unknown.is_empty() {
        return None;
    }

    // Wrong case: `s507`, `t20`, `all`
    let upper = unknown.to_ascii_uppercase();
    if upper != unknown && is_valid_selector(&upper) {
        return Some(upper);
    }

    // A rule name instead of its code
    if let Some(rule) = all_rules().into_iter().find(|rule| rule.name() == unknown) {
        return Some(rule.code().to_string());
    }

    // Common aliases
    let suggestion = match unknown {
        "bandit" | "security" | "ssh" | "paramiko" => Some("S507"),
        "debug" | "prints" | "pprint" => Some("T20"),
        "syntax" | "parse" => Some("E999"),
        "*" | "every" => Some(ALL),
        _ => None,
    };
    if let Some(suggested) = suggestion {
        return Some(suggested.to_string());
    }

    // A code with the right prefix but an unknown number, e.g. `S508`
    let prefix: String = upper.chars().take_while(|c| c.is_ascii_alphabetic()).collect();
    if !prefix.is_empty() && prefix.len() < upper.len() && is_valid_selector(&prefix) {
        return Some(prefix);
    }

    None
}

/// Warn about an unknown rule selector with suggestion.
pub fn warn_unknown_selector(path: &Path, key: &str, selector: &str) {
    if let Some(suggested) = suggest_rule_selector(selector) {
        eprintln!(
            "pyward: warning: {}: {}: unknown rule selector `{}`. Did you mean `{}`?",
            path.display(),
            key,
            selector,
            suggested
        );
    } else {
        let codes: Vec<&str> = all_rules().iter().map(|rule| rule.code()).collect();
        eprintln!(
            "pyward: warning: {}: {}: unknown rule selector `{}`\n  Valid rules: {}",
            path.display(),
            key,
            selector,
            codes.join(", ")
        );
    }
}

#[cfg(test)]
#[path = "suggest_tests.rs"]
mod tests;
