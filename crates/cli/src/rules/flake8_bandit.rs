// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Security rules.

use crate::ast::{Expr, ExprCall, map_callable};
use crate::checker::Checker;
use crate::diagnostic::Diagnostic;

use super::Rule;

/// S507: an SSH client configured to accept unknown host keys.
///
/// Flags `client.set_missing_host_key_policy(policy)` when `policy` is
/// paramiko's `AutoAddPolicy` or `WarningPolicy` (the class or an instance) and `client` was assigned
/// from a call to paramiko's `SSHClient`.
pub struct SshNoHostKeyVerification;

impl Rule for SshNoHostKeyVerification {
    fn code(&self) -> &'static str {
        "S507"
    }

    fn name(&self) -> &'static str {
        "ssh-no-host-key-verification"
    }

    fn message(&self) -> String {
        "Paramiko call with policy set to automatically trust the unknown host key".to_string()
    }

    fn explanation(&self) -> &'static str {
        "Checks for SSH clients that accept unknown host keys.\n\n\
         `AutoAddPolicy` silently trusts and stores any key the server \
         presents, and `WarningPolicy` only logs it. Either way the client \
         cannot detect a man-in-the-middle. Use `RejectPolicy` and load \
         known hosts instead."
    }

    fn check_call(&self, checker: &mut Checker, call: &ExprCall) {
        let Expr::Attribute(func) = call.func.as_ref() else {
            return;
        };
        if func.attr.as_str() != "set_missing_host_key_policy" {
            return;
        }

        let Some(policy) = call.arguments.find_argument("policy", 0) else {
            return;
        };
        let trusts_unknown_keys = checker
            .semantic()
            .resolve_qualified_name(map_callable(policy))
            .is_some_and(|name| {
                matches!(
                    name.segments().as_slice(),
                    ["paramiko", "client", "AutoAddPolicy" | "WarningPolicy"]
                        | ["paramiko", "AutoAddPolicy" | "WarningPolicy"]
                )
            });
        if !trusts_unknown_keys {
            return;
        }

        let is_ssh_client = checker
            .semantic()
            .resolve_assignment(&func.value)
            .is_some_and(|name| {
                matches!(
                    name.segments().as_slice(),
                    ["paramiko", "client", "SSHClient"] | ["paramiko", "SSHClient"]
                )
            });
        if !is_ssh_client {
            return;
        }

        checker.report(Diagnostic::new(self, call.range));
    }
}

#[cfg(test)]
#[path = "flake8_bandit_tests.rs"]
mod tests;
