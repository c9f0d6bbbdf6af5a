//! Error types shared by every module of the crate.

use thiserror::Error;

/// Errors raised by suffix array construction, search seeding, persistence,
/// factorisation and fingerprinting.
#[derive(Debug, Error)]
pub enum Error {
    /// Empty or malformed input to a construction or seeding call.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Operation invoked on state that does not support it yet.
    #[error("precondition failed: {0}")]
    Precondition(String),

    /// A fixed-size block had the wrong length.
    #[error("block is {actual} bytes long instead of {expected}")]
    SizeMismatch { expected: usize, actual: usize },

    /// A persisted file is truncated, has a bad header or inconsistent contents.
    #[error("invalid {file}: {reason}")]
    Format { file: &'static str, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub(crate) fn format(file: &'static str, reason: impl Into<String>) -> Self {
        Self::Format {
            file,
            reason: reason.into(),
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
