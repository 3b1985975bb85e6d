//! Error types for template scanning.

use std::{io, path::PathBuf, result};

/// Errors that can occur while scanning template directories.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The glob pattern built from a template directory is invalid.
    #[error("invalid template pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        source: glob::PatternError,
    },

    /// A directory entry could not be visited during the recursive walk.
    #[error("failed to walk templates: {0}")]
    Walk(#[from] glob::GlobError),

    /// A template file could not be read as UTF-8 text.
    #[error("failed to read template '{path}': {source}")]
    Read { path: PathBuf, source: io::Error },
}

pub type Result<T> = result::Result<T, Error>;
