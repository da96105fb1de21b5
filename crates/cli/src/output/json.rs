// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! JSON output formatter.
//!
//! JSON is buffered and written at the end (not streamed), and is never
//! truncated by `--limit`.

use std::io::Write;

use chrono::Utc;

use crate::check::{CheckOutput, FileResult};

/// JSON output formatter.
pub struct JsonFormatter<W: Write> {
    writer: W,
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Write the complete JSON output.
    pub fn write(&mut self, output: &CheckOutput) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(output).map_err(std::io::Error::other)?;
        writeln!(self.writer, "{}", json)
    }
}

/// Create CheckOutput with current timestamp.
pub fn create_output(results: Vec<FileResult>) -> CheckOutput {
    CheckOutput::new(
        Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
        results,
    )
}

#[cfg(test)]
#[path = "json_tests.rs"]
mod tests;
