// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Check command implementation.

use std::path::{Path, PathBuf};

use pyward::cli::{CheckArgs, Cli, OutputFormat};
use pyward::color::resolve_color;
use pyward::config::{self, Config};
use pyward::discovery;
use pyward::error::ExitCode;
use pyward::output::FormatOptions;
use pyward::output::json::{self, JsonFormatter};
use pyward::output::text::TextFormatter;
use pyward::runner::{LintRunner, RunnerConfig};
use pyward::settings::Settings;
use pyward::walker::FileWalker;

/// Directory config discovery starts from: the first path argument, or cwd.
fn discovery_start(paths: &[PathBuf], cwd: &Path) -> PathBuf {
    match paths.first() {
        Some(path) => {
            let path = cwd.join(path);
            if path.is_dir() {
                path
            } else {
                path.parent().map(Path::to_path_buf).unwrap_or(path)
            }
        }
        None => cwd.to_path_buf(),
    }
}

/// Run the check command.
pub fn run(cli: &Cli, args: &CheckArgs) -> anyhow::Result<ExitCode> {
    let cwd = std::env::current_dir()?;

    let start = discovery_start(&args.paths, &cwd);
    let config_path = discovery::resolve_config(cli.config.as_deref(), &start)?;
    let config = match &config_path {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            config::load_with_warnings(path)?
        }
        None => {
            tracing::debug!("no config found, using defaults");
            Config::default()
        }
    };

    let root = discovery::project_root(config_path.as_deref(), &cwd);
    let settings = Settings::resolve(&config.lint, &args.select, &args.ignore, &root)?;

    if args.config_only {
        return Ok(ExitCode::Success);
    }

    // === Discovery ===
    let paths: Vec<PathBuf> = if args.paths.is_empty() {
        vec![cwd.clone()]
    } else {
        args.paths.iter().map(|p| cwd.join(p)).collect()
    };
    let walker = FileWalker::from_ignore_config(&config.project.ignore, args.max_depth);
    let (files, stats) = walker.collect_paths(&paths);
    tracing::debug!(
        files = files.len(),
        ignored = stats.files_ignored,
        errors = stats.errors,
        symlink_loops = stats.symlink_loops,
        "discovery complete"
    );

    // === Linting ===
    let runner = LintRunner::new(RunnerConfig {
        fix: args.fix,
        display_root: Some(cwd),
    });
    let output = json::create_output(runner.run(&files, &settings));

    // === Output ===
    match args.output {
        OutputFormat::Text => {
            let options = FormatOptions {
                limit: args.display_limit(),
            };
            let color = resolve_color(args.color, args.no_color);
            TextFormatter::stdout(color, options).write(&output)?;
        }
        OutputFormat::Json => {
            JsonFormatter::new(std::io::stdout().lock()).write(&output)?;
        }
    }

    if output.passed || args.exit_zero {
        Ok(ExitCode::Success)
    } else {
        Ok(ExitCode::CheckFailed)
    }
}
