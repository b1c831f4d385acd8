//! The main entry point for the `recolor` command-line application.

use anyhow::Context;
use recolor::cli;
use recolor::rules::{COLOR_RULES, RuleSet};
use recolor::runner;
use std::io;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let args = cli::parse_args();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    if args.list_rules {
        for (i, rule) in COLOR_RULES.iter().enumerate() {
            println!("{:>2}. {} -> {}", i + 1, rule.pattern, rule.replacement);
        }
        return Ok(());
    }

    let options = args.run_options();
    let rules = RuleSet::colors().context("built-in rule table failed to compile")?;

    runner::run(rules, &options, io::stdout().lock(), io::stderr().lock())
        .with_context(|| format!("recolor run over {} failed", options.root.display()))?;

    Ok(())
}
