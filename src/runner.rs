use crate::discovery::FileDiscoverer;
use crate::errors::Result;
use crate::report::{FailedFile, OutputFormat, Reporter, RunSummary};
use crate::rewriter::{RewriteOptions, Rewriter};
use crate::rules::RuleSet;
use std::io::Write;
use std::path::PathBuf;
use tracing::debug;

/// Everything a run needs to know.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub root: PathBuf,
    pub suffix: String,
    pub dry_run: bool,
    pub format: OutputFormat,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            root: PathBuf::from("src"),
            suffix: ".jsx".to_string(),
            dry_run: false,
            format: OutputFormat::Text,
        }
    }
}

/// One full pass: discover files, rewrite each, report as it goes and
/// print the summary at the end.
///
/// Per-file failures are reported and skipped. The only errors returned
/// are an unreadable root and failures writing to `out`/`err`.
pub fn run<O: Write, E: Write>(
    rules: RuleSet,
    options: &RunOptions,
    out: O,
    err: E,
) -> Result<RunSummary> {
    let discoverer = FileDiscoverer::new(&options.root, options.suffix.as_str());
    let rewriter = Rewriter::new(rules);
    let rewrite_options = RewriteOptions {
        dry_run: options.dry_run,
    };
    let mut reporter = Reporter::new(options.format, options.dry_run, out, err);

    let mut summary = RunSummary {
        dry_run: options.dry_run,
        ..RunSummary::default()
    };

    for path in discoverer.files()? {
        summary.scanned += 1;
        match rewriter.rewrite_file(&path, rewrite_options) {
            Ok(outcome) if outcome.modified => {
                debug!(path = %path.display(), changes = outcome.changes, "file updated");
                reporter.file_updated(&path)?;
                summary.updated.push(path);
            }
            Ok(_) => {}
            Err(e) => {
                let message = e.cause_message();
                reporter.file_failed(&path, &message)?;
                summary.failed.push(FailedFile {
                    path,
                    error: message,
                });
            }
        }
    }

    reporter.finish(&summary)?;
    Ok(summary)
}
