//! Error types for asset filtering.

use std::{io, path::PathBuf, result};

/// What went wrong while parsing an embedded icon literal.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum LiteralErrorKind {
    #[error("unexpected end of literal")]
    UnexpectedEof,

    #[error("unexpected character {0:?}")]
    UnexpectedChar(char),

    #[error("expected {expected}, found {found:?}")]
    Expected { expected: &'static str, found: char },

    #[error("invalid number '{0}'")]
    InvalidNumber(String),

    #[error("invalid escape sequence")]
    InvalidEscape,

    #[error("control character in string")]
    ControlChar,

    #[error("trailing content after literal")]
    TrailingContent,

    #[error("literal is nested too deeply")]
    RecursionLimit,
}

/// Errors that can occur while filtering an asset file.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The embedded icon literal could not be parsed.
    #[error("malformed icon literal at byte {offset}: {kind}")]
    MalformedLiteral { offset: usize, kind: LiteralErrorKind },

    #[error("failed to read asset '{path}': {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to write asset '{path}': {source}")]
    Write { path: PathBuf, source: io::Error },

    /// The asset path does not end with `.js`.
    #[error("asset '{0}' does not have a .js extension")]
    UnexpectedExtension(PathBuf),
}

impl Error {
    /// Moves a literal error offset from literal-relative to asset-relative.
    pub(crate) fn shifted(self, by: usize) -> Self {
        match self {
            Self::MalformedLiteral { offset, kind } => Self::MalformedLiteral {
                offset: offset + by,
                kind,
            },
            other => other,
        }
    }
}

pub type Result<T> = result::Result<T, Error>;
