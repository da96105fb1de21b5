// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Leftover debug output.

use crate::ast::{ExprCall, is_const_none};
use crate::checker::Checker;
use crate::diagnostic::Diagnostic;
use crate::fix::Fix;

use super::Rule;

/// T201: a call to the builtin `print`.
///
/// Printing to an explicit stream other than stdout or stderr is allowed.
pub struct Print;

impl Rule for Print {
    fn code(&self) -> &'static str {
        "T201"
    }

    fn name(&self) -> &'static str {
        "print"
    }

    fn message(&self) -> String {
        "`print` found".to_string()
    }

    fn explanation(&self) -> &'static str {
        "Checks for `print` calls.\n\n\
         `print` is usually left over from debugging. Use `logging` for \
         output that should stay. Calls writing to a file other than \
         `sys.stdout` or `sys.stderr` are not flagged."
    }

    fn fix_title(&self) -> Option<&'static str> {
        Some("Remove `print`")
    }

    fn default_enabled(&self) -> bool {
        false
    }

    fn check_call(&self, checker: &mut Checker, call: &ExprCall) {
        let Some(name) = checker.semantic().resolve_qualified_name(&call.func) else {
            return;
        };
        if name.segments().as_slice() != ["", "print"] {
            return;
        }

        // `print(..., file=stream)` writing somewhere other than the console.
        if let Some(keyword) = call.arguments.find_keyword("file")
            && !is_const_none(&keyword.value)
        {
            let is_console = checker
                .semantic()
                .resolve_qualified_name(&keyword.value)
                .is_some_and(|stream| {
                    matches!(stream.segments().as_slice(), ["sys", "stdout" | "stderr"])
                });
            if !is_console {
                return;
            }
        }

        report_with_removal(self, checker, call);
    }
}

/// T203: a call to `pprint.pprint`.
pub struct PPrint;

impl Rule for PPrint {
    fn code(&self) -> &'static str {
        "T203"
    }

    fn name(&self) -> &'static str {
        "p-print"
    }

    fn message(&self) -> String {
        "`pprint` found".to_string()
    }

    fn explanation(&self) -> &'static str {
        "Checks for `pprint` calls.\n\n\
         Like `print`, `pprint` is usually left over from debugging."
    }

    fn fix_title(&self) -> Option<&'static str> {
        Some("Remove `pprint`")
    }

    fn default_enabled(&self) -> bool {
        false
    }

    fn check_call(&self, checker: &mut Checker, call: &ExprCall) {
        let is_pprint = checker
            .semantic()
            .resolve_qualified_name(&call.func)
            .is_some_and(|name| name.segments().as_slice() == ["pprint", "pprint"]);
        if is_pprint {
            report_with_removal(self, checker, call);
        }
    }
}

/// Report the callee of `call`, removing the statement when the call stands alone.
fn report_with_removal(rule: &dyn Rule, checker: &mut Checker, call: &ExprCall) {
    let mut diagnostic = Diagnostic::new(rule, call.func.range());
    if let Some(edit) = checker.delete_current_expression_statement(call.range) {
        diagnostic.set_fix(Fix::new(edit));
    }
    checker.report(diagnostic);
}

#[cfg(test)]
#[path = "flake8_print_tests.rs"]
mod tests;
