//! CLI Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, exn::Exn<ErrorKind>>;

#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    #[display("could not load configuration")]
    Config,
    #[display("I/O error")]
    Io,
    /// Neither `--length` nor the `length` configuration value was given.
    #[display("no length given: pass --length or set `length` in the configuration")]
    MissingLength,
    #[display("could not truncate input")]
    Truncate,
}
