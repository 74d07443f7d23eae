//! Extraction Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.
//!
//! Only structural failures end up here. A missing translation is not an
//! error, it's just `None`.

use derive_more::{Display, Error};

/// An extraction error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The response body is not JSON at all.
    #[display("malformed JSON")]
    MalformedJson(#[error(not(source))] String),
    /// A required field could not be found in the response.
    #[display("missing required field: {_0}")]
    MissingField(#[error(not(source))] &'static str),
    /// A field was found but could not be parsed.
    #[display("failed to parse field '{field}', found value: {value}")]
    ParseError {
        /// The field that failed to parse.
        field: &'static str,
        /// Details about the parsing failure.
        value: String,
    },
    /// A single verse failed to decode, which fails the whole document.
    #[display("invalid verse at position {_0}")]
    InvalidVerse(#[error(not(source))] usize),
    /// A document could not be encoded back into the wire format.
    #[display("failed to encode document")]
    Encode,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        // Decoding the same bytes twice gives the same answer. A fresh
        // response might decode, but that's the caller's business.
        false
    }
}
