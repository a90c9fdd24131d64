//! Vault logon.

use std::sync::Arc;

use serde_json::{json, Value};

use crate::transport::RestTransport;
use crate::util::strip_null_values;
use crate::Error;

/// The authentication scheme a logon goes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMethod {
    /// The vault's own user store.
    #[default]
    CyberArk,
    /// Windows domain authentication.
    Windows,
    /// LDAP directory authentication.
    Ldap,
    /// RADIUS authentication.
    Radius,
}

impl AuthMethod {
    /// The path segment the vault routes this scheme under.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CyberArk => "CyberArk",
            Self::Windows => "Windows",
            Self::Ldap => "LDAP",
            Self::Radius => "RADIUS",
        }
    }
}

impl std::fmt::Display for AuthMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Client for vault logon.
///
/// Access via `vault.authentication()`.
///
/// ## Example
///
/// ```rust,ignore
/// let response = vault
///     .authentication()
///     .logon(LogonRequest::new("Administrator", "s3cr3t"))
///     .await?;
///
/// // The vault answers with the session token as a bare JSON string.
/// if let Some(token) = response.as_str() {
///     vault.set_session_token(token.to_owned());
/// }
/// ```
#[derive(Clone)]
pub struct Authentication {
    transport: Arc<RestTransport>,
}

impl Authentication {
    pub(crate) fn new(transport: Arc<RestTransport>) -> Self {
        Self { transport }
    }

    /// Logs on to the vault.
    ///
    /// Returns the raw response payload. The session token it carries is
    /// not installed automatically; pass it to
    /// [`Vault::set_session_token`](crate::Vault::set_session_token) to
    /// authenticate subsequent calls.
    pub async fn logon(&self, request: LogonRequest) -> Result<Value, Error> {
        let path = format!(
            "PasswordVault/api/auth/{}/Logon/",
            request.auth_method.as_str()
        );

        let body = json!({
            "username": request.username,
            "password": request.password,
            "newPassword": request.new_password,
            "concurrentSession": request.concurrent_session,
        });
        let body = match body {
            Value::Object(map) => Value::Object(strip_null_values(map)),
            other => other,
        };

        self.transport.post(&path, Some(&body)).await
    }
}

impl std::fmt::Debug for Authentication {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authentication").finish_non_exhaustive()
    }
}

/// Request to log on to the vault.
#[derive(Clone)]
pub struct LogonRequest {
    username: String,
    password: String,
    new_password: Option<String>,
    auth_method: AuthMethod,
    concurrent_session: bool,
}

impl LogonRequest {
    /// Creates a logon request against the vault's own user store, with
    /// concurrent sessions allowed.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            new_password: None,
            auth_method: AuthMethod::CyberArk,
            concurrent_session: true,
        }
    }

    /// Changes the password during logon.
    #[must_use]
    pub fn new_password(mut self, new_password: impl Into<String>) -> Self {
        self.new_password = Some(new_password.into());
        self
    }

    /// Selects the authentication scheme.
    #[must_use]
    pub fn auth_method(mut self, auth_method: AuthMethod) -> Self {
        self.auth_method = auth_method;
        self
    }

    /// Allows or forbids other concurrent sessions for this user.
    #[must_use]
    pub fn concurrent_session(mut self, concurrent: bool) -> Self {
        self.concurrent_session = concurrent;
        self
    }
}

impl std::fmt::Debug for LogonRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Credentials stay out of logs.
        f.debug_struct("LogonRequest")
            .field("username", &self.username)
            .field("auth_method", &self.auth_method)
            .field("concurrent_session", &self.concurrent_session)
            .finish_non_exhaustive()
    }
}
