// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Rule command implementation.

use std::io::Write;
use std::sync::Arc;

use serde::Serialize;
use termcolor::{StandardStream, WriteColor};

use pyward::Error;
use pyward::cli::{OutputFormat, RuleArgs};
use pyward::color::{resolve_color_from_env, scheme};
use pyward::config::suggest_rule_selector;
use pyward::error::ExitCode;
use pyward::rules::{Rule, all_rules, get_rule};

/// Rule metadata for JSON output.
#[derive(Serialize)]
struct RuleInfo {
    code: &'static str,
    name: &'static str,
    message: String,
    default_enabled: bool,
    fixable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    fix_title: Option<&'static str>,
    explanation: &'static str,
}

impl From<&dyn Rule> for RuleInfo {
    fn from(rule: &dyn Rule) -> Self {
        Self {
            code: rule.code(),
            name: rule.name(),
            message: rule.message(),
            default_enabled: rule.default_enabled(),
            fixable: rule.fix_title().is_some(),
            fix_title: rule.fix_title(),
            explanation: rule.explanation(),
        }
    }
}

fn lookup(key: &str) -> Result<Arc<dyn Rule>, Error> {
    get_rule(key).ok_or_else(|| {
        let hint = suggest_rule_selector(key)
            .and_then(|suggested| get_rule(&suggested))
            .map(|rule| format!(". Did you mean `{}`?", rule.code()))
            .unwrap_or_default();
        Error::Argument(format!("unknown rule `{key}`{hint}"))
    })
}

fn write_rule(out: &mut impl WriteColor, rule: &dyn Rule) -> std::io::Result<()> {
    out.set_color(&scheme::heading())?;
    write!(out, "{} ({})", rule.name(), rule.code())?;
    out.reset()?;
    writeln!(out)?;
    writeln!(out)?;
    writeln!(out, "Message: {}", rule.message())?;
    writeln!(
        out,
        "Enabled by default: {}",
        if rule.default_enabled() { "yes" } else { "no" }
    )?;
    match rule.fix_title() {
        Some(title) => writeln!(out, "Fix: {title}")?,
        None => writeln!(out, "Fix: not available")?,
    }
    writeln!(out)?;
    writeln!(out, "{}", rule.explanation())
}

/// Run the rule command.
pub fn run(args: &RuleArgs) -> anyhow::Result<ExitCode> {
    let rules = match &args.rule {
        Some(key) if !args.all => vec![lookup(key)?],
        _ => all_rules(),
    };

    match args.output {
        OutputFormat::Text => {
            let mut out = StandardStream::stdout(resolve_color_from_env());
            for (i, rule) in rules.iter().enumerate() {
                if i > 0 {
                    writeln!(out)?;
                }
                write_rule(&mut out, rule.as_ref())?;
            }
        }
        OutputFormat::Json => {
            let infos: Vec<RuleInfo> = rules.iter().map(|r| RuleInfo::from(r.as_ref())).collect();
            let json = if args.all {
                serde_json::to_string_pretty(&infos)?
            } else {
                serde_json::to_string_pretty(&infos.first())?
            };
            println!("{json}");
        }
    }

    Ok(ExitCode::Success)
}
