use std::path::PathBuf;
use thiserror::Error;

/// The primary error type for all operations in `recolor`.
#[derive(Error, Debug)]
pub enum Error {
    /// An error related to file system I/O.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// File content was not valid UTF-8.
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// A rule pattern failed to compile.
    #[error("Pattern compilation failed: {0}")]
    Regex(#[from] regex::Error),

    /// An entry below the root could not be read during traversal.
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),

    /// Replacing the original file with the rewritten temp file failed.
    #[error("Tempfile error: {0}")]
    Persist(#[from] tempfile::PersistError),

    /// An error related to JSON serialization.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A read, decode, or write failure for one file. Never aborts a run.
    #[error("File processing failed for {path}: {source}")]
    Processing {
        path: PathBuf,
        source: Box<Error>,
    },
}

/// A convenient type alias for `Result<T, recolor::errors::Error>`.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Wraps `self` as a per-file processing failure for `path`.
    pub fn for_file(self, path: impl Into<PathBuf>) -> Self {
        match self {
            Error::Processing { .. } => self,
            other => Error::Processing {
                path: path.into(),
                source: Box::new(other),
            },
        }
    }

    /// The message shown to the user, without the path prefix.
    pub fn cause_message(&self) -> String {
        match self {
            Error::Processing { source, .. } => source.to_string(),
            other => other.to_string(),
        }
    }
}
