//! Main error type for the client.

use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt;

use super::ErrorKind;

/// The primary error type for all client operations.
///
/// `Error` provides context for debugging and error handling:
/// - [`kind()`](Error::kind): categorization for `match` statements
/// - [`status()`](Error::status): HTTP status for remote failures
/// - [`field()`](Error::field) / [`endpoint()`](Error::endpoint): the
///   offending key and originating endpoint for mapping failures
///
/// ## Example
///
/// ```rust
/// use cyberpas::{Error, ErrorKind};
///
/// fn handle_error(err: Error) {
///     match err.kind() {
///         ErrorKind::InvalidArgument => println!("fix the input: {}", err),
///         ErrorKind::NotFound => println!("no such resource"),
///         kind if kind.is_mapping() => {
///             println!(
///                 "unexpected response shape at {:?}, field {:?}",
///                 err.endpoint(),
///                 err.field()
///             );
///         }
///         _ => println!("request failed: {}", err),
///     }
/// }
/// ```
#[derive(Debug)]
pub struct Error {
    /// The error category.
    kind: ErrorKind,

    /// Human-readable error message.
    message: Cow<'static, str>,

    /// HTTP status code, for errors reported by the vault.
    status: Option<u16>,

    /// The offending response key, for mapping errors.
    field: Option<String>,

    /// The endpoint that produced the response, for mapping errors.
    endpoint: Option<String>,

    /// The underlying error, if any.
    source: Option<Box<dyn StdError + Send + Sync + 'static>>,
}

impl Error {
    /// Creates a new error with the given kind and message.
    ///
    /// ```rust
    /// use cyberpas::{Error, ErrorKind};
    ///
    /// let err = Error::new(ErrorKind::InvalidArgument, "safe name cannot be empty");
    /// assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    /// ```
    pub fn new(kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
            field: None,
            endpoint: None,
            source: None,
        }
    }

    /// Returns the error kind for categorization.
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the HTTP status code the vault answered with, if any.
    #[inline]
    pub fn status(&self) -> Option<u16> {
        self.status
    }

    /// Returns the response key a mapping error is about, if any.
    #[inline]
    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    /// Returns the endpoint the failing response came from, if any.
    #[inline]
    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }

    /// Sets the HTTP status code for this error.
    #[must_use]
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets the offending field for this error.
    #[must_use]
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Sets the originating endpoint for this error.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Sets the source error for this error.
    #[must_use]
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    // Convenience constructors for common error types

    /// Creates an invalid-argument error (local validation failure).
    pub fn invalid_argument(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::InvalidArgument, message)
    }

    /// Creates a configuration error.
    pub fn configuration(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Creates a connection error.
    pub fn connection(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Connection, message)
    }

    /// Creates a timeout error.
    pub fn timeout(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Timeout, message)
    }

    /// Creates an invalid-response error.
    pub fn invalid_response(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::InvalidResponse, message)
    }

    /// Creates a missing-field mapping error naming the key and endpoint.
    pub fn missing_field(field: impl Into<String>, endpoint: impl Into<String>) -> Self {
        let field = field.into();
        let endpoint = endpoint.into();
        Self::new(
            ErrorKind::MissingField,
            format!("response from {} is missing key '{}'", endpoint, field),
        )
        .with_field(field)
        .with_endpoint(endpoint)
    }

    /// Creates a type-mismatch mapping error naming the key and endpoint.
    pub fn type_mismatch(
        field: impl Into<String>,
        expected: &'static str,
        endpoint: impl Into<String>,
    ) -> Self {
        let field = field.into();
        let endpoint = endpoint.into();
        Self::new(
            ErrorKind::TypeMismatch,
            format!(
                "key '{}' in response from {} is not {}",
                field, endpoint, expected
            ),
        )
        .with_field(field)
        .with_endpoint(endpoint)
    }

    /// Creates an unknown-enum-value mapping error naming the key, the
    /// rejected value, and the endpoint.
    pub fn unknown_enum_value(
        field: impl Into<String>,
        value: impl fmt::Display,
        endpoint: impl Into<String>,
    ) -> Self {
        let field = field.into();
        let endpoint = endpoint.into();
        Self::new(
            ErrorKind::UnknownEnumValue,
            format!(
                "key '{}' in response from {} has unrecognized value '{}'",
                field, endpoint, value
            ),
        )
        .with_field(field)
        .with_endpoint(endpoint)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)?;

        if let Some(status) = self.status {
            write!(f, " (status: {})", status)?;
        }

        Ok(())
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        let message = kind.to_string();
        Self::new(kind, message)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound | std::io::ErrorKind::PermissionDenied => {
                ErrorKind::Configuration
            }
            std::io::ErrorKind::ConnectionRefused
            | std::io::ErrorKind::ConnectionReset
            | std::io::ErrorKind::ConnectionAborted
            | std::io::ErrorKind::NotConnected => ErrorKind::Connection,
            std::io::ErrorKind::TimedOut => ErrorKind::Timeout,
            _ => ErrorKind::Transport,
        };
        Error::new(kind, err.to_string()).with_source(err)
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::configuration(format!("invalid URL: {}", err)).with_source(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::invalid_response(format!("JSON error: {}", err)).with_source(err)
    }
}
