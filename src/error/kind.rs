//! Error kind enumeration for categorizing client errors.

/// Categorization of client errors.
///
/// Three families of failure exist:
///
/// - **Local validation** (`InvalidArgument`, `Configuration`): raised
///   before any network call. Fix the input.
/// - **Remote** (`Unauthorized` through `Remote`): the vault reported a
///   non-success HTTP status. The status code is carried on the
///   [`Error`](crate::Error) itself.
/// - **Mapping** (`MissingField`, `TypeMismatch`, `UnknownEnumValue`): the
///   response body did not match the documented shape. The offending field
///   and originating endpoint are carried on the error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum ErrorKind {
    /// A request argument failed client-side validation.
    ///
    /// Raised before any network call, e.g. for the safe-retention
    /// mutual-exclusion rule. Also used for HTTP 400 responses.
    #[error("invalid argument")]
    InvalidArgument,

    /// Authentication failed (invalid or expired session token).
    ///
    /// HTTP: 401 Unauthorized
    #[error("unauthorized")]
    Unauthorized,

    /// The session is valid but lacks permission for the operation.
    ///
    /// HTTP: 403 Forbidden
    #[error("forbidden")]
    Forbidden,

    /// The requested safe, member, or user does not exist.
    ///
    /// HTTP: 404 Not Found
    #[error("not found")]
    NotFound,

    /// The request conflicts with existing vault state.
    ///
    /// HTTP: 409 Conflict
    #[error("conflict")]
    Conflict,

    /// Rate limit exceeded.
    ///
    /// HTTP: 429 Too Many Requests
    #[error("rate limited")]
    RateLimited,

    /// The vault reported a server-side failure.
    ///
    /// HTTP: any 5xx
    #[error("service unavailable")]
    Unavailable,

    /// The vault rejected the request with some other non-success status.
    #[error("remote request failed")]
    Remote,

    /// A required key was absent from a response body.
    #[error("missing field")]
    MissingField,

    /// A response value had the wrong JSON type.
    #[error("type mismatch")]
    TypeMismatch,

    /// An enum-valued field carried a value outside the declared variants.
    ///
    /// Unknown codes are rejected, never silently defaulted.
    #[error("unknown enum value")]
    UnknownEnumValue,

    /// Connection error (DNS, TLS handshake, network unreachable).
    #[error("connection error")]
    Connection,

    /// The request timed out client-side.
    #[error("timeout")]
    Timeout,

    /// Generic transport failure that fits no more specific category.
    #[error("transport error")]
    Transport,

    /// The response body could not be decoded as JSON at all.
    #[error("invalid response")]
    InvalidResponse,

    /// Configuration error (invalid base URL, unreadable certificate file).
    #[error("configuration error")]
    Configuration,
}

impl ErrorKind {
    /// Returns `true` for the mapping family of errors.
    #[inline]
    pub fn is_mapping(&self) -> bool {
        matches!(
            self,
            ErrorKind::MissingField | ErrorKind::TypeMismatch | ErrorKind::UnknownEnumValue
        )
    }

    /// Returns `true` for errors reported by the vault as an HTTP status.
    #[inline]
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            ErrorKind::Unauthorized
                | ErrorKind::Forbidden
                | ErrorKind::NotFound
                | ErrorKind::Conflict
                | ErrorKind::RateLimited
                | ErrorKind::Unavailable
                | ErrorKind::Remote
        )
    }

    /// Creates an `ErrorKind` from an HTTP status code.
    pub fn from_http_status(status: u16) -> Self {
        match status {
            400 => ErrorKind::InvalidArgument,
            401 => ErrorKind::Unauthorized,
            403 => ErrorKind::Forbidden,
            404 => ErrorKind::NotFound,
            409 => ErrorKind::Conflict,
            429 => ErrorKind::RateLimited,
            500..=599 => ErrorKind::Unavailable,
            _ => ErrorKind::Remote,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_from_http_status() {
        assert_eq!(ErrorKind::from_http_status(400), ErrorKind::InvalidArgument);
        assert_eq!(ErrorKind::from_http_status(401), ErrorKind::Unauthorized);
        assert_eq!(ErrorKind::from_http_status(403), ErrorKind::Forbidden);
        assert_eq!(ErrorKind::from_http_status(404), ErrorKind::NotFound);
        assert_eq!(ErrorKind::from_http_status(409), ErrorKind::Conflict);
        assert_eq!(ErrorKind::from_http_status(429), ErrorKind::RateLimited);
        for status in [500u16, 502, 503, 504] {
            assert_eq!(ErrorKind::from_http_status(status), ErrorKind::Unavailable);
        }
        assert_eq!(ErrorKind::from_http_status(418), ErrorKind::Remote);
    }

    #[test]
    fn test_is_mapping() {
        assert!(ErrorKind::MissingField.is_mapping());
        assert!(ErrorKind::TypeMismatch.is_mapping());
        assert!(ErrorKind::UnknownEnumValue.is_mapping());
        assert!(!ErrorKind::InvalidArgument.is_mapping());
        assert!(!ErrorKind::NotFound.is_mapping());
    }

    #[test]
    fn test_is_remote() {
        assert!(ErrorKind::Unauthorized.is_remote());
        assert!(ErrorKind::NotFound.is_remote());
        assert!(ErrorKind::Unavailable.is_remote());
        assert!(ErrorKind::Remote.is_remote());
        assert!(!ErrorKind::InvalidArgument.is_remote());
        assert!(!ErrorKind::MissingField.is_remote());
        assert!(!ErrorKind::Configuration.is_remote());
    }

    #[test]
    fn test_display() {
        assert_eq!(
            format!("{}", ErrorKind::InvalidArgument),
            "invalid argument"
        );
        assert_eq!(format!("{}", ErrorKind::MissingField), "missing field");
        assert_eq!(
            format!("{}", ErrorKind::UnknownEnumValue),
            "unknown enum value"
        );
        assert_eq!(format!("{}", ErrorKind::Unavailable), "service unavailable");
    }

    #[test]
    fn test_error_kind_hash_and_eq() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(ErrorKind::Timeout);
        set.insert(ErrorKind::NotFound);
        set.insert(ErrorKind::Timeout);
        assert_eq!(set.len(), 2);
    }
}
