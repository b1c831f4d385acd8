//! `recolor` rewrites Tailwind color utility classes across a tree of
//! component sources.
//!
//! A run is a single sequential pass:
//!
//! - `discovery::FileDiscoverer` lazily walks a root directory and yields
//!   files whose name ends with a suffix.
//! - `rewriter::Rewriter` reads each file, applies an ordered
//!   `rules::RuleSet` and writes the file back only if its text changed.
//! - `runner::run` ties the two together and reports through
//!   `report::Reporter`, collecting a `report::RunSummary`.
//!
//! A file that fails to read, decode or write is reported and skipped; it
//! never stops the run.

pub mod cli;
pub mod discovery;
pub mod errors;
pub mod report;
pub mod rewriter;
pub mod rules;
pub mod runner;

// Re-export main types for easier access by library users.
pub use errors::{Error, Result};
pub use report::{OutputFormat, RunSummary};
pub use rewriter::Rewriter;
pub use rules::{Rule, RuleSet};
