//! Descriptor fetch error type.

use thiserror::Error;

/// Failure to retrieve a descriptor. "Not found" is not an error; see `FetchOutcome::Absent`.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The descriptor location could not be built from the source config.
    #[error("invalid descriptor location: {0}")]
    Location(String),
    /// Curl reported an error (DNS, connection, TLS, timeout, ...).
    #[error("transport: {0}")]
    Curl(#[from] curl::Error),
    /// The server answered with a non-2xx status other than 404.
    #[error("HTTP {0}")]
    Http(u32),
}
