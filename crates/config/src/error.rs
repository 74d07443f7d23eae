//! Configuration Error Types

use derive_more::{Display, Error};
use std::path::PathBuf;

/// A configuration error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for configuration operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The layered configuration could not be merged or deserialized.
    #[display("failed to load configuration")]
    Load,
    /// A config file was asked for explicitly but isn't there.
    #[display("config file not found: {}", _0.display())]
    MissingFile(#[error(not(source))] PathBuf),
    /// A value deserialized fine but makes no sense.
    #[display("invalid value for '{field}': {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

impl ErrorKind {
    pub fn is_retryable(&self) -> bool {
        false
    }
}
