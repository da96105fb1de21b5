// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use super::Rule;

/// E999: the file could not be parsed.
///
/// Reported by the linter rather than the checker, since no syntax tree
/// exists to walk.
pub struct SyntaxError;

impl Rule for SyntaxError {
    fn code(&self) -> &'static str {
        "E999"
    }

    fn name(&self) -> &'static str {
        "syntax-error"
    }

    fn message(&self) -> String {
        "SyntaxError".to_string()
    }

    fn explanation(&self) -> &'static str {
        "Checks for source files that cannot be parsed as Python.\n\n\
         No other rule runs on a file with a syntax error."
    }
}

/// Message for a parse failure.
pub fn syntax_error_message(detail: &str) -> String {
    format!("SyntaxError: {detail}")
}
