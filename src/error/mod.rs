//! Error types for the client.
//!
//! Every fallible operation returns [`Error`], categorized by [`ErrorKind`]
//! into local-validation, remote (HTTP-status-bearing), and response-mapping
//! failures. Errors always propagate unchanged to the caller; nothing in
//! this crate retries or swallows a failure.

#[allow(clippy::module_inception)]
mod error;
mod kind;

pub use error::Error;
pub use kind::ErrorKind;

/// Convenience alias for results carrying this crate's [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
