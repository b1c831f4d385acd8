use crate::errors::Result;
use crate::rules::RuleSet;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Options for rewriting a file.
#[derive(Debug, Clone, Copy, Default)]
pub struct RewriteOptions {
    /// If `true`, changes are computed but not written to disk.
    pub dry_run: bool,
}

/// The result of rewriting a single file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RewriteOutcome {
    /// Total substitutions made across all rules.
    pub changes: usize,
    /// `true` if the final text differs from what was on disk.
    pub modified: bool,
}

/// Applies a `RuleSet` to files in place.
pub struct Rewriter {
    rules: RuleSet,
}

impl Rewriter {
    pub fn new(rules: RuleSet) -> Self {
        Self { rules }
    }

    /// Reads `path`, applies every rule in order and writes the result back
    /// if the text changed.
    ///
    /// The file is read once and written at most once. Unchanged files are
    /// never opened for writing. Any failure is returned as
    /// `Error::Processing` naming `path`.
    pub fn rewrite_file(&self, path: &Path, options: RewriteOptions) -> Result<RewriteOutcome> {
        self.rewrite(path, options).map_err(|e| e.for_file(path))
    }

    fn rewrite(&self, path: &Path, options: RewriteOptions) -> Result<RewriteOutcome> {
        let content = String::from_utf8(fs::read(path)?)?;
        let transformed = self.rules.apply(&content);

        if transformed.modified && !options.dry_run {
            write_atomic(path, transformed.content.as_bytes())?;
        }

        Ok(RewriteOutcome {
            changes: transformed.changes,
            modified: transformed.modified,
        })
    }
}

/// Replaces the file behind `path` with `contents`, keeping its permissions.
///
/// Symlinks are resolved first so the link stays a link and its target gets
/// the new text. The file must be writable by us; a read-only file fails
/// here instead of being swapped out through its directory. Files with more
/// than one hard link are truncated and rewritten in place so every link
/// sees the change; everything else goes through a temp file and a rename.
fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let target = fs::canonicalize(path)?;
    let mut original = OpenOptions::new().write(true).open(&target)?;
    let metadata = original.metadata()?;

    if link_count(&metadata) > 1 {
        original.set_len(0)?;
        original.write_all(contents)?;
        original.sync_all()?;
        return Ok(());
    }
    drop(original);

    let parent = target.parent().unwrap_or_else(|| Path::new("."));
    let mut temp_file = NamedTempFile::new_in(parent)?;
    temp_file.write_all(contents)?;
    temp_file.as_file().sync_all()?;
    fs::set_permissions(temp_file.path(), metadata.permissions())?;

    temp_file.persist(&target)?;
    Ok(())
}

#[cfg(unix)]
fn link_count(metadata: &fs::Metadata) -> u64 {
    use std::os::unix::fs::MetadataExt;
    metadata.nlink()
}

#[cfg(not(unix))]
fn link_count(_metadata: &fs::Metadata) -> u64 {
    1
}
