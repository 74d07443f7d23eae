//! Library Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.
//!
//! None of these are fatal to the orchestrator itself: a failed fetch is
//! reported as an [`Event`](crate::Event) and the previous state is kept.

use banis_extract::models::DocumentType;
use derive_more::{Display, Error};

/// A library error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bundled, or the API has no identifier for it.
    #[display("{_0} cannot be fetched from the API")]
    NotFetchable(#[error(not(source))] DocumentType),
    /// The request never got a response (DNS, TLS, connection reset...).
    #[display("network request failed")]
    Network,
    /// The API answered with a non-success status.
    #[display("API responded with status {_0}")]
    Status(#[error(not(source))] u16),
    /// The response arrived but isn't a usable document.
    #[display("response could not be decoded")]
    Decode,
    /// The fetch task stopped without producing a result.
    #[display("fetch was interrupted")]
    Interrupted,
    #[display("cache operation failed")]
    Cache,
    #[display("preload marker could not be updated")]
    Marker,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network | Self::Interrupted | Self::Cache | Self::Marker => true,
            Self::Status(code) => *code == 429 || *code >= 500,
            Self::NotFetchable(_) | Self::Decode => false,
        }
    }
}
