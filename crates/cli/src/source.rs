// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Source positions.
//!
//! Offsets are byte positions into the file text. Human-facing locations are
//! 1-based lines and 1-based character columns.

use std::fmt;

use serde::Serialize;

/// Byte offset into a source file.
pub type TextSize = u32;

/// Half-open byte range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct TextRange {
    pub start: TextSize,
    pub end: TextSize,
}

impl TextRange {
    pub fn new(start: TextSize, end: TextSize) -> Self {
        debug_assert!(start <= end);
        Self { start, end }
    }

    /// Empty range at `offset`.
    pub fn empty(offset: TextSize) -> Self {
        Self::new(offset, offset)
    }

    pub fn len(&self) -> TextSize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn contains_range(&self, other: TextRange) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// True if the two ranges share at least one byte.
    pub fn intersects(&self, other: TextRange) -> bool {
        self.start < other.end && other.start < self.end
    }

    pub fn as_usize(&self) -> std::ops::Range<usize> {
        self.start as usize..self.end as usize
    }
}

impl fmt::Display for TextRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// A 1-based line and character column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct SourceLocation {
    pub line: u32,
    pub column: u32,
}

/// Precomputed line starts for offset-to-location conversion.
#[derive(Debug, Clone)]
pub struct LineIndex {
    line_starts: Vec<TextSize>,
}

impl LineIndex {
    pub fn from_source(source: &str) -> Self {
        let mut line_starts = Vec::with_capacity(source.len() / 32 + 1);
        line_starts.push(0);
        line_starts.extend(memchr::memchr_iter(b'\n', source.as_bytes()).map(|i| i as u32 + 1));
        Self { line_starts }
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Zero-based line containing `offset`.
    pub fn line_index(&self, offset: TextSize) -> usize {
        match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        }
    }

    pub fn line_start(&self, line: usize) -> TextSize {
        self.line_starts[line]
    }

    /// Convert an offset to a 1-based line and character column.
    pub fn location(&self, offset: TextSize, source: &str) -> SourceLocation {
        let line = self.line_index(offset);
        let start = self.line_starts[line] as usize;
        let end = (offset as usize).min(source.len());
        let column = source
            .get(start..end)
            .map(|prefix| prefix.chars().count())
            .unwrap_or(end - start);

        SourceLocation {
            line: line as u32 + 1,
            column: column as u32 + 1,
        }
    }
}

/// Read access to a source file with its line index.
pub struct Locator<'a> {
    contents: &'a str,
    index: LineIndex,
}

impl<'a> Locator<'a> {
    pub fn new(contents: &'a str) -> Self {
        Self {
            contents,
            index: LineIndex::from_source(contents),
        }
    }

    pub fn contents(&self) -> &'a str {
        self.contents
    }

    pub fn index(&self) -> &LineIndex {
        &self.index
    }

    pub fn slice(&self, range: TextRange) -> &'a str {
        &self.contents[range.as_usize()]
    }

    pub fn location(&self, offset: TextSize) -> SourceLocation {
        self.index.location(offset, self.contents)
    }

    /// Start of the line containing `offset`.
    pub fn line_start(&self, offset: TextSize) -> TextSize {
        self.index.line_start(self.index.line_index(offset))
    }

    /// End of the line containing `offset`, after its newline if any.
    pub fn full_line_end(&self, offset: TextSize) -> TextSize {
        let line = self.index.line_index(offset);
        if line + 1 < self.index.line_count() {
            self.index.line_start(line + 1)
        } else {
            self.contents.len() as TextSize
        }
    }

    /// The lines spanned by `range`, including the final newline.
    pub fn full_lines_range(&self, range: TextRange) -> TextRange {
        let end_anchor = if range.is_empty() {
            range.end
        } else {
            range.end - 1
        };
        TextRange::new(self.line_start(range.start), self.full_line_end(end_anchor))
    }

    /// Text of the line containing `offset`, without its line terminator.
    pub fn line_text(&self, offset: TextSize) -> &'a str {
        let start = self.line_start(offset) as usize;
        let end = self.full_line_end(offset) as usize;
        self.contents[start..end].trim_end_matches(['\n', '\r'])
    }

    /// Leading whitespace of the line containing `offset`.
    pub fn indentation(&self, offset: TextSize) -> &'a str {
        let line = self.line_text(offset);
        &line[..line.len() - line.trim_start().len()]
    }

    /// True if only whitespace precedes `offset` on its line.
    pub fn is_first_on_line(&self, offset: TextSize) -> bool {
        let start = self.line_start(offset) as usize;
        self.contents[start..offset as usize].trim().is_empty()
    }

    /// True if only whitespace and an optional comment follow `offset` on its line.
    pub fn is_last_on_line(&self, offset: TextSize) -> bool {
        let end = self.full_line_end(offset) as usize;
        let rest = self.contents[offset as usize..end].trim();
        rest.is_empty() || rest.starts_with('#')
    }
}

#[cfg(test)]
#[path = "source_tests.rs"]
mod tests;
