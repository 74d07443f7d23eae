//! Application Error Types

use banis_extract::models::DocumentType;
use derive_more::{Display, Error};

pub type Error = exn::Exn<ErrorKind>;
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    #[display("invalid configuration")]
    Config,
    #[display("cache could not be updated")]
    Cache,
    #[display("failed to set up runtime services")]
    Runtime,
    /// Not cached, and fetching it didn't work out.
    #[display("{_0} is not available; check your connection and try again")]
    Unavailable(#[error(not(source))] DocumentType),
    #[display("failed to write output")]
    Output,
}

impl ErrorKind {
    /// Returns `true` if running the same command again might succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Cache | Self::Unavailable(_) => true,
            Self::Config | Self::Runtime | Self::Output => false,
        }
    }
}
