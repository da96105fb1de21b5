// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Inline suppression comments.
//!
//! - `# noqa` suppresses every diagnostic starting on its line
//! - `# noqa: S507, T201` suppresses only the listed codes
//! - `# pyward: noqa` on its own line exempts the whole file;
//!   `# pyward: noqa: T201` exempts the file from the listed codes

use std::sync::LazyLock;

use regex::Regex;

use crate::diagnostic::Diagnostic;
use crate::source::Locator;

const CODES: &str = r"[A-Z]+[0-9]+(?:[,\s]+[A-Z]+[0-9]+)*";

#[allow(clippy::expect_used)]
static LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)#\s*noqa(?::\s*(?P<codes>{CODES}))?")).expect("valid regex")
});

#[allow(clippy::expect_used)]
static FILE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?im)^[ \t]*#\s*(?:pyward|flake8)\s*:\s*noqa(?::\s*(?P<codes>{CODES}))?\s*$"
    ))
    .expect("valid regex")
});

/// A parsed suppression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// Suppress everything.
    All,
    /// Suppress only these codes (upper-cased).
    Codes(Vec<String>),
}

impl Directive {
    fn from_codes(codes: Option<&str>) -> Self {
        match codes {
            None => Directive::All,
            Some(codes) => Directive::Codes(
                codes
                    .split(|c: char| c == ',' || c.is_whitespace())
                    .filter(|code| !code.is_empty())
                    .map(str::to_ascii_uppercase)
                    .collect(),
            ),
        }
    }

    pub fn suppresses(&self, code: &str) -> bool {
        match self {
            Directive::All => true,
            Directive::Codes(codes) => codes.iter().any(|c| c == code),
        }
    }
}

/// The `# noqa` directive in `line`, if any.
pub fn parse_line(line: &str) -> Option<Directive> {
    let caps = LINE_RE.captures(line)?;
    Some(Directive::from_codes(
        caps.name("codes").map(|m| m.as_str()),
    ))
}

/// File-level exemptions in `source`, merged.
pub fn file_exemption(source: &str) -> Option<Directive> {
    let mut codes = Vec::new();
    for caps in FILE_RE.captures_iter(source) {
        match Directive::from_codes(caps.name("codes").map(|m| m.as_str())) {
            Directive::All => return Some(Directive::All),
            Directive::Codes(more) => codes.extend(more),
        }
    }
    (!codes.is_empty()).then_some(Directive::Codes(codes))
}

/// Drop diagnostics suppressed by file or line directives.
pub fn filter(diagnostics: Vec<Diagnostic>, locator: &Locator) -> Vec<Diagnostic> {
    let exemption = file_exemption(locator.contents());
    diagnostics
        .into_iter()
        .filter(|diagnostic| {
            if exemption
                .as_ref()
                .is_some_and(|directive| directive.suppresses(diagnostic.code))
            {
                return false;
            }
            let line = locator.line_text(diagnostic.range.start);
            !parse_line(line).is_some_and(|directive| directive.suppresses(diagnostic.code))
        })
        .collect()
}

#[cfg(test)]
#[path = "noqa_tests.rs"]
mod tests;
