//! Ranking-store error types.
//!
//! The persistence path is the one fallible surface in the game: reading a
//! missing or corrupt ranking file degrades silently to an empty leaderboard,
//! while write failures are reported through [`StoreError`] and logged by the
//! caller rather than panicking.

use std::fmt;

/// Errors produced while persisting the ranking list.
#[derive(Debug)]
pub enum StoreError {
    /// Filesystem-level failure (create dir, write, rename).
    Io(std::io::Error),

    /// The ranking list could not be encoded as JSON.
    Encode(serde_json::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io(err) => write!(f, "ranking store I/O failure: {err}"),
            StoreError::Encode(err) => write!(f, "ranking store encode failure: {err}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io(err) => Some(err),
            StoreError::Encode(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Io(err)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Encode(err)
    }
}

/// Convenience alias: a `Result` using `StoreError` as the error type.
pub type StoreResult<T> = Result<T, StoreError>;
