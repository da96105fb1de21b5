// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Text output formatter.
//!
//! ```text
//! <file>:<line>:<column>: <code> [*] <message>
//! <file>: error: <reason>
//! Found <n> errors.
//! [*] <k> fixable with the --fix option.
//! ```

use termcolor::{ColorChoice, StandardStream, WriteColor};

use super::{FormatOptions, plural};
use crate::check::{CheckOutput, FileError, Violation};
use crate::color::scheme;

/// Text output formatter with color support.
pub struct TextFormatter<W: WriteColor> {
    out: W,
    options: FormatOptions,
    violations_shown: usize,
    truncated: bool,
}

impl TextFormatter<StandardStream> {
    /// Formatter writing to stdout.
    pub fn stdout(color_choice: ColorChoice, options: FormatOptions) -> Self {
        Self::new(StandardStream::stdout(color_choice), options)
    }
}

impl<W: WriteColor> TextFormatter<W> {
    pub fn new(out: W, options: FormatOptions) -> Self {
        Self {
            out,
            options,
            violations_shown: 0,
            truncated: false,
        }
    }

    /// Write violations, file errors, and the summary.
    pub fn write(&mut self, output: &CheckOutput) -> std::io::Result<()> {
        for violation in &output.violations {
            if self.write_violation(violation)? {
                break;
            }
        }
        for error in &output.errors {
            self.write_error(error)?;
        }
        self.write_summary(output)?;
        if self.truncated {
            self.write_truncation_message(output.total_violations())?;
        }
        self.out.flush()
    }

    /// Write a single violation (streaming).
    /// Returns true once the limit truncates output.
    pub fn write_violation(&mut self, v: &Violation) -> std::io::Result<bool> {
        if let Some(limit) = self.options.limit
            && self.violations_shown >= limit
        {
            self.truncated = true;
            return Ok(true);
        }

        self.out.set_color(&scheme::path())?;
        write!(self.out, "{}", v.file.display())?;
        self.out.reset()?;

        self.out.set_color(&scheme::location())?;
        write!(self.out, ":{}:{}:", v.line, v.column)?;
        self.out.reset()?;
        write!(self.out, " ")?;

        self.out.set_color(&scheme::code())?;
        write!(self.out, "{}", v.code)?;
        self.out.reset()?;
        write!(self.out, " ")?;

        if v.is_fixable() {
            self.out.set_color(&scheme::fixable())?;
            write!(self.out, "[*]")?;
            self.out.reset()?;
            write!(self.out, " ")?;
        }

        writeln!(self.out, "{}", v.message)?;
        self.violations_shown += 1;
        Ok(false)
    }

    /// Write a file that could not be linted.
    pub fn write_error(&mut self, error: &FileError) -> std::io::Result<()> {
        self.out.set_color(&scheme::path())?;
        write!(self.out, "{}", error.file.display())?;
        self.out.reset()?;
        write!(self.out, ": ")?;
        self.out.set_color(&scheme::error())?;
        write!(self.out, "error:")?;
        self.out.reset()?;
        writeln!(self.out, " {}", error.message)
    }

    /// Write the summary lines.
    pub fn write_summary(&mut self, output: &CheckOutput) -> std::io::Result<()> {
        let remaining = output.total_violations();

        if output.fixed > 0 {
            writeln!(self.out, "Fixed {}.", plural(output.fixed, "error"))?;
        }

        if remaining > 0 {
            writeln!(self.out, "Found {}.", plural(remaining, "error"))?;
            let fixable = output.fixable_violations();
            if fixable > 0 {
                self.out.set_color(&scheme::fixable())?;
                write!(self.out, "[*]")?;
                self.out.reset()?;
                writeln!(self.out, " {} fixable with the --fix option.", fixable)?;
            }
        }

        if !output.errors.is_empty() {
            writeln!(
                self.out,
                "Could not lint {}.",
                plural(output.errors.len(), "file")
            )?;
        }

        if output.passed && output.fixed == 0 {
            self.out.set_color(&scheme::pass())?;
            write!(self.out, "All checks passed!")?;
            self.out.reset()?;
            writeln!(self.out)?;
        }
        Ok(())
    }

    /// Write the truncation message when the limit hid violations.
    pub fn write_truncation_message(&mut self, total: usize) -> std::io::Result<()> {
        if let Some(limit) = self.options.limit
            && self.truncated
            && total > limit
        {
            writeln!(
                self.out,
                "Showing {} of {} violations. Use --no-limit to see all.",
                limit, total
            )?;
        }
        Ok(())
    }

    /// Check if output was truncated.
    pub fn was_truncated(&self) -> bool {
        self.truncated
    }

    /// Get the number of violations shown.
    pub fn violations_shown(&self) -> usize {
        self.violations_shown
    }

    /// Consume the formatter, returning the writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;
