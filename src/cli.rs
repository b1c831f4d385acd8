use crate::report::OutputFormat;
use crate::runner::RunOptions;
use clap::Parser;
use std::path::PathBuf;

/// Migrates emerald Tailwind color classes to blue across JSX sources.
///
/// Every file under ROOT whose name ends with the suffix is rewritten in
/// place using a fixed, ordered rule table. Files that do not change are
/// never written.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Bulk-replace emerald color classes with blue ones",
    long_about = "recolor - rewrites Tailwind emerald-* utility classes to their blue-* counterparts.

Running with no arguments processes every .jsx file under ./src.

EXAMPLES:
  recolor                          # Rewrite ./src/**/*.jsx
  recolor web/src --suffix .tsx    # Different tree and file suffix
  recolor --dry-run                # Show what would change
  recolor --format json | jq .     # Machine-readable summary
  recolor --list-rules             # Print the rule table"
)]
pub struct Args {
    /// The directory to walk.
    #[arg(default_value = "src")]
    pub root: PathBuf,

    /// Only files whose name ends with this suffix are processed (case-sensitive).
    #[arg(short, long, default_value = ".jsx")]
    pub suffix: String,

    /// Report what would change without modifying any file.
    #[arg(long)]
    pub dry_run: bool,

    /// Output format for the run report.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Print the replacement rules in the order they are applied, then exit.
    #[arg(long)]
    pub list_rules: bool,
}

impl Args {
    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            root: self.root.clone(),
            suffix: self.suffix.clone(),
            dry_run: self.dry_run,
            format: self.format,
        }
    }
}

/// Parses command-line arguments and returns the populated `Args` struct.
pub fn parse_args() -> Args {
    Args::parse()
}
