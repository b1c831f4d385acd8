use crate::errors::{Error, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::{IntoIter, WalkDir};

/// Finds every file under a root whose name ends with a given suffix.
///
/// Walking is lazy: `files` hands back an iterator that reads directories
/// as it is advanced. Order is whatever the filesystem returns.
pub struct FileDiscoverer {
    root: PathBuf,
    suffix: String,
}

impl FileDiscoverer {
    pub fn new(root: impl Into<PathBuf>, suffix: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            suffix: suffix.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Starts a single pass over the tree.
    ///
    /// A root that does not exist yields nothing. A root that exists but
    /// cannot be read is returned as an error, since no file could ever be
    /// reached. Unreadable entries further down are logged and skipped.
    pub fn files(&self) -> Result<DiscoveredFiles<'_>> {
        let metadata = match self.root.metadata() {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!(root = %self.root.display(), "root directory not found");
                return Ok(DiscoveredFiles {
                    walker: None,
                    suffix: &self.suffix,
                });
            }
            Err(e) => return Err(Error::Io(e)),
        };

        // Surface an unreadable root before any files are handed out.
        if metadata.is_dir() {
            fs::read_dir(&self.root)?;
        }

        Ok(DiscoveredFiles {
            walker: Some(WalkDir::new(&self.root).into_iter()),
            suffix: &self.suffix,
        })
    }
}

/// A finite, non-restartable sequence of matching file paths.
pub struct DiscoveredFiles<'a> {
    walker: Option<IntoIter>,
    suffix: &'a str,
}

impl Iterator for DiscoveredFiles<'_> {
    type Item = PathBuf;

    fn next(&mut self) -> Option<PathBuf> {
        let walker = self.walker.as_mut()?;
        loop {
            match walker.next()? {
                Ok(entry) => {
                    let path = entry.path();
                    if path.is_file() && has_suffix(path, self.suffix) {
                        return Some(entry.into_path());
                    }
                }
                Err(e) => {
                    warn!(error = %Error::Walk(e), "skipping unreadable entry");
                }
            }
        }
    }
}

/// Case-sensitive check of the file name (not just the extension) against `suffix`.
fn has_suffix(path: &Path, suffix: &str) -> bool {
    path.file_name()
        .map(|name| name.as_encoded_bytes().ends_with(suffix.as_bytes()))
        .unwrap_or(false)
}
