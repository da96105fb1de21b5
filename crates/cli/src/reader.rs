// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Size-gated source reading.
//!
//! Files over 10MB are rejected before any bytes are read. Source must be
//! UTF-8; a leading byte order mark is stripped and remembered so fixed
//! files can be written back with it.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{Error, Result};

/// Size at which to log large files (1MB).
pub const LARGE_FILE_WARN: u64 = 1024 * 1024;

/// Maximum file size to read (10MB).
pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

const UTF8_BOM: &str = "\u{feff}";

/// Decoded source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceText {
    /// Text without the byte order mark.
    pub text: String,

    /// Whether the file started with a UTF-8 byte order mark.
    pub bom: bool,
}

impl SourceText {
    /// Encode `text` the way the original file was encoded.
    pub fn encode(&self, text: &str) -> String {
        if self.bom {
            format!("{UTF8_BOM}{text}")
        } else {
            text.to_string()
        }
    }
}

/// Size-gated file reader.
#[derive(Debug, Clone)]
pub struct FileReader {
    max_size: u64,
}

impl Default for FileReader {
    fn default() -> Self {
        Self {
            max_size: MAX_FILE_SIZE,
        }
    }
}

impl FileReader {
    /// Create a new file reader with the default limit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a reader with custom max size.
    pub fn with_max_size(max_size: u64) -> Self {
        Self { max_size }
    }

    /// Read raw bytes, checking the size limit first.
    ///
    /// Returns `Err(FileTooLarge)` for files exceeding the limit.
    pub fn read(&self, path: &Path) -> Result<Vec<u8>> {
        let io_error = |source| Error::Io {
            path: path.to_path_buf(),
            source,
        };

        let size = std::fs::metadata(path).map_err(io_error)?.len();
        if size > self.max_size {
            return Err(Error::FileTooLarge {
                path: path.to_path_buf(),
                size,
                max_size: self.max_size,
            });
        }

        if size > LARGE_FILE_WARN {
            tracing::info!(
                path = %path.display(),
                size_mb = size as f64 / 1_000_000.0,
                "reading large file"
            );
        }

        let mut file = File::open(path).map_err(io_error)?;
        let mut buffer = Vec::with_capacity(size as usize);
        file.read_to_end(&mut buffer).map_err(io_error)?;
        Ok(buffer)
    }

    /// Read a file as UTF-8 source text.
    ///
    /// Returns `Err(Parse)` when the bytes are not valid UTF-8.
    pub fn read_source(&self, path: &Path) -> Result<SourceText> {
        let bytes = self.read(path)?;
        let text = String::from_utf8(bytes).map_err(|e| Error::Parse {
            path: path.to_path_buf(),
            message: format!(
                "invalid UTF-8 at byte {}",
                e.utf8_error().valid_up_to()
            ),
        })?;

        Ok(match text.strip_prefix(UTF8_BOM) {
            Some(rest) => SourceText {
                text: rest.to_string(),
                bom: true,
            },
            None => SourceText { text, bom: false },
        })
    }
}

#[cfg(test)]
#[path = "reader_tests.rs"]
mod tests;
