//! The `Vault` facade and its builder.

use std::sync::Arc;

use url::Url;

use crate::api::{Authentication, SafeMembers, Safes, Users};
use crate::transport::RestTransport;
use crate::Error;

/// Entry point for the vault REST API.
///
/// A `Vault` holds the shared transport; the endpoint services returned by
/// its accessors are cheap handles over it and can be created freely.
///
/// ## Example
///
/// ```rust,ignore
/// let vault = Vault::builder()
///     .url("https://vault.example.com")
///     .build()?;
///
/// let token = vault
///     .authentication()
///     .logon(LogonRequest::new("Administrator", "s3cr3t"))
///     .await?;
/// if let Some(token) = token.as_str() {
///     vault.set_session_token(token.to_owned());
/// }
///
/// let safes = vault.safes().list().search("prod").await?;
/// ```
#[derive(Clone, Debug)]
pub struct Vault {
    transport: Arc<RestTransport>,
}

impl Vault {
    /// Returns a builder for configuring the vault client.
    pub fn builder() -> VaultBuilder {
        VaultBuilder::default()
    }

    /// Returns the safes service.
    pub fn safes(&self) -> Safes {
        Safes::new(self.transport.clone())
    }

    /// Returns the safe members service.
    pub fn safe_members(&self) -> SafeMembers {
        SafeMembers::new(self.transport.clone())
    }

    /// Returns the users service.
    pub fn users(&self) -> Users {
        Users::new(self.transport.clone())
    }

    /// Returns the authentication service.
    pub fn authentication(&self) -> Authentication {
        Authentication::new(self.transport.clone())
    }

    /// Installs the session token sent as the `Authorization` header on
    /// every subsequent request from this vault and its services.
    ///
    /// The token is what [`logon`](crate::api::Authentication::logon)
    /// returned; its lifecycle (refresh, expiry) is the caller's concern.
    pub fn set_session_token(&self, token: String) {
        self.transport.set_session_token(token);
    }

    /// Clears the session token.
    pub fn clear_session_token(&self) {
        self.transport.clear_session_token();
    }

    /// Returns the base URL this client targets.
    pub fn base_url(&self) -> &Url {
        self.transport.base_url()
    }
}

/// Builder for [`Vault`].
#[derive(Debug, Clone, Default)]
pub struct VaultBuilder {
    url: Option<String>,
    verify_tls: Option<bool>,
}

impl VaultBuilder {
    /// Sets the vault base URL.
    #[must_use]
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Disables TLS certificate verification, for vaults running with
    /// self-signed certificates in lab environments.
    #[must_use]
    pub fn insecure(mut self) -> Self {
        self.verify_tls = Some(false);
        self
    }

    /// Builds the vault client.
    pub fn build(self) -> Result<Vault, Error> {
        let url = self
            .url
            .ok_or_else(|| Error::configuration("vault base URL is required"))?;
        // A trailing slash keeps Url::join from replacing the last path
        // segment of the base.
        let url = if url.ends_with('/') { url } else { url + "/" };
        let base_url = Url::parse(&url)?;

        Ok(Vault {
            transport: Arc::new(RestTransport::new(
                base_url,
                self.verify_tls.unwrap_or(true),
            )?),
        })
    }
}
