// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Source edits and their application.

use std::collections::HashSet;

use crate::ast::Stmt;
use crate::diagnostic::Diagnostic;
use crate::source::{Locator, TextRange, TextSize};

/// Replace `range` with `content`. Deletions have empty content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub range: TextRange,
    pub content: String,
}

impl Edit {
    pub fn deletion(start: TextSize, end: TextSize) -> Self {
        Self {
            range: TextRange::new(start, end),
            content: String::new(),
        }
    }

    pub fn range_deletion(range: TextRange) -> Self {
        Self::deletion(range.start, range.end)
    }

    pub fn range_replacement(content: impl Into<String>, range: TextRange) -> Self {
        Self {
            range,
            content: content.into(),
        }
    }

    pub fn is_deletion(&self) -> bool {
        self.content.is_empty()
    }
}

/// A set of edits applied together or not at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fix {
    edits: Vec<Edit>,
}

impl Fix {
    pub fn new(edit: Edit) -> Self {
        Self { edits: vec![edit] }
    }

    pub fn with_edits(edit: Edit, rest: impl IntoIterator<Item = Edit>) -> Self {
        let mut edits = vec![edit];
        edits.extend(rest);
        edits.sort_by_key(|edit| edit.range.start);
        Self { edits }
    }

    pub fn edits(&self) -> &[Edit] {
        &self.edits
    }

    pub fn min_start(&self) -> TextSize {
        self.edits.first().map_or(0, |edit| edit.range.start)
    }
}

/// Remove `stmt` from `suite` without leaving invalid syntax behind.
///
/// `deleted` holds statements already removed from the same suite in this
/// pass. When every other statement of a nested block is gone, the
/// statement is replaced with `pass` so the block stays non-empty.
pub fn delete_stmt(
    stmt: &Stmt,
    suite: &[Stmt],
    nested: bool,
    deleted: &HashSet<TextRange>,
    locator: &Locator,
) -> Edit {
    let range = stmt.range();
    let remaining = suite
        .iter()
        .any(|sibling| sibling.range() != range && !deleted.contains(&sibling.range()));
    if nested && !remaining {
        return Edit::range_replacement("pass", range);
    }

    let index = locator.index();
    let position = suite.iter().position(|sibling| sibling.range() == range);
    let next = position.and_then(|i| suite.get(i + 1));
    let prev = position.and_then(|i| i.checked_sub(1)).and_then(|i| suite.get(i));

    // `a; b`: take the separator along with the statement.
    if let Some(next) = next
        && index.line_index(next.range().start) == index.line_index(range.end)
    {
        return Edit::deletion(range.start, next.range().start);
    }
    if let Some(prev) = prev
        && index.line_index(prev.range().end) == index.line_index(range.start)
    {
        return Edit::deletion(prev.range().end, range.end);
    }

    if locator.is_first_on_line(range.start) && locator.is_last_on_line(range.end) {
        Edit::range_deletion(locator.full_lines_range(range))
    } else {
        Edit::range_deletion(range)
    }
}

/// Result of applying one round of fixes.
#[derive(Debug)]
pub struct FixResult {
    pub source: String,
    /// Number of diagnostics whose fix was applied.
    pub applied: usize,
}

/// Apply the fixes of `diagnostics` to `source` in offset order.
///
/// A fix overlapping an earlier applied fix is skipped; the next lint pass
/// picks it up against the updated source. Returns `None` when nothing
/// applied.
pub fn apply_fixes<'a>(
    diagnostics: impl IntoIterator<Item = &'a Diagnostic>,
    source: &str,
) -> Option<FixResult> {
    let mut fixes: Vec<&Fix> = diagnostics
        .into_iter()
        .filter_map(|diagnostic| diagnostic.fix.as_ref())
        .collect();
    if fixes.is_empty() {
        return None;
    }
    fixes.sort_by_key(|fix| fix.min_start());

    let mut output = String::with_capacity(source.len());
    let mut last_pos: Option<TextSize> = None;
    let mut applied = 0;

    for fix in fixes {
        if last_pos.is_some_and(|last| fix.min_start() < last) {
            continue;
        }

        for edit in fix.edits() {
            let start = last_pos.unwrap_or(0) as usize;
            output.push_str(&source[start..edit.range.start as usize]);
            output.push_str(&edit.content);
            last_pos = Some(edit.range.end);
        }
        applied += 1;
    }

    if applied == 0 {
        return None;
    }
    output.push_str(&source[last_pos.unwrap_or(0) as usize..]);
    Some(FixResult {
        source: output,
        applied,
    })
}

#[cfg(test)]
#[path = "fix_tests.rs"]
mod tests;
