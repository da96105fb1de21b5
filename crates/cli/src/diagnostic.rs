// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! A rule finding inside one source file.

use crate::fix::Fix;
use crate::rules::Rule;
use crate::source::TextRange;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub code: &'static str,
    pub name: &'static str,
    pub message: String,
    pub range: TextRange,
    pub fix_title: Option<String>,
    pub fix: Option<Fix>,
}

impl Diagnostic {
    pub fn new(rule: &dyn Rule, range: TextRange) -> Self {
        Self {
            code: rule.code(),
            name: rule.name(),
            message: rule.message(),
            range,
            fix_title: rule.fix_title().map(str::to_string),
            fix: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn set_fix(&mut self, fix: Fix) {
        self.fix = Some(fix);
    }

    pub fn is_fixable(&self) -> bool {
        self.fix.is_some()
    }
}
