use std::path::PathBuf;

use thiserror::Error;

/// Failure reading or writing the highscore file.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("highscore file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("highscore line {line}: {reason}")]
    Malformed {
        line: usize,
        #[source]
        reason: RecordError,
    },
}

/// Why a single `name:score` record was rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    #[error("expected exactly one separator, found {found}")]
    Separator { found: usize },
    #[error("name must be 3-10 characters, got {len}")]
    NameLength { len: usize },
    #[error("name contains {glyph:?}, which cannot be stored")]
    NameChar { glyph: char },
    #[error("score must be a plain non-negative integer, got {found:?}")]
    Score { found: String },
}

/// A name-entry submission that cannot be accepted yet.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NameError {
    #[error("name must be at least 3 characters, got {len}")]
    TooShort { len: usize },
}
