// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! CLI argument parsing with clap derive.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// A Python linter that follows imports to find insecure and leftover calls
#[derive(Parser)]
#[command(name = "pyward")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Use specific config file
    #[arg(short = 'C', long = "config", global = true, env = "PYWARD_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Lint Python files
    Check(CheckArgs),
    /// Explain a rule, or list all rules
    Rule(RuleArgs),
}

#[derive(clap::Args)]
pub struct CheckArgs {
    /// Files or directories to check
    #[arg(value_name = "PATH")]
    pub paths: Vec<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub output: OutputFormat,

    /// Rule codes or prefixes to enable, replacing the configured selection
    #[arg(long, value_delimiter = ',', value_name = "CODE")]
    pub select: Vec<String>,

    /// Rule codes or prefixes to disable, on top of the configured ignores
    #[arg(long, value_delimiter = ',', value_name = "CODE")]
    pub ignore: Vec<String>,

    /// Apply fixes in place
    #[arg(long)]
    pub fix: bool,

    /// Force color output
    #[arg(long)]
    pub color: bool,

    /// Disable color output
    #[arg(long)]
    pub no_color: bool,

    /// Maximum violations to display
    #[arg(long, value_name = "N")]
    pub limit: Option<usize>,

    /// Show all violations (no limit)
    #[arg(long)]
    pub no_limit: bool,

    /// Validate config and exit without linting
    #[arg(long = "config-only")]
    pub config_only: bool,

    /// Maximum directory depth to traverse
    #[arg(long, default_value_t = 100)]
    pub max_depth: usize,

    /// Exit with status 0 even when violations remain
    #[arg(long)]
    pub exit_zero: bool,
}

impl CheckArgs {
    /// Effective display limit; `None` shows everything.
    pub fn display_limit(&self) -> Option<usize> {
        if self.no_limit { None } else { self.limit }
    }
}

#[derive(clap::Args)]
pub struct RuleArgs {
    /// Rule code or name (e.g. S507, print)
    #[arg(value_name = "RULE", required_unless_present = "all")]
    pub rule: Option<String>,

    /// List every rule
    #[arg(long, conflicts_with = "rule")]
    pub all: bool,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub output: OutputFormat,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
