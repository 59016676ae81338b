//! Truncation Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};

/// A truncation error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for truncation operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// Offsets are positions in the input counted in Unicode scalar values
/// (`char`s), not bytes.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// A closing tag did not match any tag still open in the output.
    #[display("unexpected closing tag '{tag}' on offset {offset}")]
    UnmatchedClosingTag {
        /// Name of the offending closing tag, as written.
        tag: String,
        /// Offset of the `<` that started the closing tag.
        offset: usize,
    },
    /// An `&` was never followed by a `;`. Only raised with
    /// [`EntityPolicy::Strict`](crate::EntityPolicy::Strict).
    #[display("expected matching ';' to '&' at offset {offset}")]
    UnterminatedEntity {
        /// Offset of the `&`.
        offset: usize,
    },
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        // The same markup always fails the same way.
        false
    }

    /// Position in the input (in `char`s) where the problem was detected.
    pub fn offset(&self) -> usize {
        match self {
            ErrorKind::UnmatchedClosingTag { offset, .. } | ErrorKind::UnterminatedEntity { offset } => *offset,
        }
    }
}
