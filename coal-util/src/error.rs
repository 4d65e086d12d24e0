//! Internal error types for `coal-util` itself.
//!
//! These are distinct from [`crate::Diagnostic`]: a `Diagnostic` is a
//! user-facing compiler error, while `UtilError` describes a misuse of this
//! crate's own APIs (an out-of-range span, an unknown file id).

use thiserror::Error;

/// Error type for `coal-util` operations.
#[derive(Debug, Error)]
pub enum UtilError {
    /// A span's byte range falls outside the file it claims to belong to.
    #[error("span {start}..{end} out of bounds for file of length {file_len}")]
    SpanOutOfBounds {
        start: usize,
        end: usize,
        file_len: usize,
    },

    /// A `FileId` was used that the `SourceMap` never issued.
    #[error("unknown file id {0:?}")]
    UnknownFile(super::FileId),
}

/// Result type alias for `coal-util` operations.
pub type UtilResult<T> = std::result::Result<T, UtilError>;
