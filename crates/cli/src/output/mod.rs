// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Output formatting for check results.

pub mod json;
pub mod text;

/// Output formatting options.
#[derive(Debug, Clone, Default)]
pub struct FormatOptions {
    /// Maximum violations to show (None = unlimited).
    pub limit: Option<usize>,
}

impl FormatOptions {
    /// Create options with no limit.
    pub fn no_limit() -> Self {
        Self { limit: None }
    }

    /// Create options with a specific limit.
    pub fn with_limit(limit: usize) -> Self {
        Self { limit: Some(limit) }
    }
}

/// `1 error`, `2 errors`.
pub(crate) fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}
