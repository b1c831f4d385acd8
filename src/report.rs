use crate::errors::Result;
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};

/// How the run is reported on the console.
#[derive(clap::ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// A line per updated file followed by a summary.
    #[default]
    Text,
    /// A single JSON document written once the run is done.
    Json,
}

/// A file that could not be processed, with the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedFile {
    pub path: PathBuf,
    pub error: String,
}

/// What one pass over the tree did.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Number of files that matched the suffix and were examined.
    pub scanned: usize,
    /// Files whose content changed, in processing order.
    pub updated: Vec<PathBuf>,
    pub failed: Vec<FailedFile>,
    pub dry_run: bool,
}

/// Streams per-file events and the final summary to two writers.
///
/// In `Text` format, updates go to `out` and failures go to `err` as they
/// happen, so `out` stays a clean list of changed files when piped. In
/// `Json` format nothing is written until `finish`.
pub struct Reporter<O: Write, E: Write> {
    format: OutputFormat,
    dry_run: bool,
    out: O,
    err: E,
}

impl<O: Write, E: Write> Reporter<O, E> {
    pub fn new(format: OutputFormat, dry_run: bool, out: O, err: E) -> Self {
        Self {
            format,
            dry_run,
            out,
            err,
        }
    }

    pub fn file_updated(&mut self, path: &Path) -> Result<()> {
        if self.format == OutputFormat::Text {
            let verb = if self.dry_run { "Would update" } else { "Updated" };
            writeln!(self.out, "{verb}: {}", path.display())?;
        }
        Ok(())
    }

    pub fn file_failed(&mut self, path: &Path, message: &str) -> Result<()> {
        if self.format == OutputFormat::Text {
            writeln!(self.err, "Error updating {}: {message}", path.display())?;
        }
        Ok(())
    }

    /// Writes the summary and flushes both writers.
    pub fn finish(&mut self, summary: &RunSummary) -> Result<()> {
        match self.format {
            OutputFormat::Text => self.write_text_summary(summary)?,
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut self.out, summary)?;
                writeln!(self.out)?;
            }
        }
        self.out.flush()?;
        self.err.flush()?;
        Ok(())
    }

    fn write_text_summary(&mut self, summary: &RunSummary) -> Result<()> {
        let count = summary.updated.len();
        if summary.dry_run {
            writeln!(self.out, "\nCompleted! Would update {count} files.")?;
        } else {
            writeln!(self.out, "\nCompleted! Updated {count} files.")?;
        }

        if !summary.updated.is_empty() {
            writeln!(self.out, "Updated files:")?;
            for path in &summary.updated {
                writeln!(self.out, "  - {}", path.display())?;
            }
        }
        Ok(())
    }

    #[cfg(test)]
    fn into_inner(self) -> (O, E) {
        (self.out, self.err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_summary() -> RunSummary {
        RunSummary {
            scanned: 3,
            updated: vec![
                PathBuf::from("src/App.jsx"),
                PathBuf::from("src/components/Hero.jsx"),
            ],
            failed: vec![FailedFile {
                path: PathBuf::from("src/Broken.jsx"),
                error: "UTF-8 error: invalid utf-8 sequence".to_string(),
            }],
            dry_run: false,
        }
    }

    fn text_reporter(dry_run: bool) -> Reporter<Vec<u8>, Vec<u8>> {
        Reporter::new(OutputFormat::Text, dry_run, Vec::new(), Vec::new())
    }

    #[test]
    fn test_text_stream_and_summary() {
        let summary = create_test_summary();
        let mut reporter = text_reporter(false);

        reporter.file_updated(Path::new("src/App.jsx")).unwrap();
        reporter
            .file_failed(Path::new("src/Broken.jsx"), "UTF-8 error: bad")
            .unwrap();
        reporter.file_updated(Path::new("src/components/Hero.jsx")).unwrap();
        reporter.finish(&summary).unwrap();

        let (out, err) = reporter.into_inner();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Updated: src/App.jsx\n\
             Updated: src/components/Hero.jsx\n\
             \n\
             Completed! Updated 2 files.\n\
             Updated files:\n  \
             - src/App.jsx\n  \
             - src/components/Hero.jsx\n"
        );
        assert_eq!(
            String::from_utf8(err).unwrap(),
            "Error updating src/Broken.jsx: UTF-8 error: bad\n"
        );
    }

    #[test]
    fn test_text_summary_without_updates_has_no_listing() {
        let mut reporter = text_reporter(false);
        reporter.finish(&RunSummary::default()).unwrap();

        let (out, _) = reporter.into_inner();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "\nCompleted! Updated 0 files.\n"
        );
    }

    #[test]
    fn test_dry_run_wording() {
        let mut reporter = text_reporter(true);
        reporter.file_updated(Path::new("a.jsx")).unwrap();
        reporter
            .finish(&RunSummary {
                scanned: 1,
                updated: vec![PathBuf::from("a.jsx")],
                dry_run: true,
                ..RunSummary::default()
            })
            .unwrap();

        let (out, _) = reporter.into_inner();
        let out = String::from_utf8(out).unwrap();
        assert!(out.starts_with("Would update: a.jsx\n"));
        assert!(out.contains("Completed! Would update 1 files."));
    }

    #[test]
    fn test_json_format() {
        let summary = create_test_summary();
        let mut reporter = Reporter::new(OutputFormat::Json, false, Vec::new(), Vec::new());

        reporter.file_updated(Path::new("src/App.jsx")).unwrap();
        reporter.file_failed(Path::new("src/Broken.jsx"), "bad").unwrap();
        reporter.finish(&summary).unwrap();

        let (out, err) = reporter.into_inner();
        assert!(err.is_empty());

        let parsed: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed["scanned"], 3);
        assert_eq!(parsed["updated"][1], "src/components/Hero.jsx");
        assert_eq!(parsed["failed"][0]["path"], "src/Broken.jsx");
        assert_eq!(parsed["dry_run"], false);
    }
}
