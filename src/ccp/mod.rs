//! Central Credential Provider (CCP) client.
//!
//! The CCP is a separate web service in front of the vault that hands out
//! account credentials to applications over a query-parameterized GET. It
//! has its own base URL and an IIS site segment, and authenticates callers
//! by application id and optionally a client certificate.

mod credentials;

use std::sync::Arc;

use url::Url;

pub use credentials::{ClientCertificate, Credentials, GetCredentialRequest};

use crate::transport::RestTransport;
use crate::Error;

/// Entry point for credential retrieval through the CCP.
///
/// ## Example
///
/// ```rust,ignore
/// let ccp = CentralCredentialProvider::builder()
///     .url("https://ccp.example.com")
///     .build()?;
///
/// let credentials = ccp
///     .credentials()
///     .get_credential(GetCredentialRequest::new("BillingApp", "DevOps"))
///     .await?;
/// ```
#[derive(Clone, Debug)]
pub struct CentralCredentialProvider {
    transport: Arc<RestTransport>,
    iis_site: String,
    verify_tls: bool,
}

impl CentralCredentialProvider {
    /// Returns a builder for configuring the provider.
    pub fn builder() -> CentralCredentialProviderBuilder {
        CentralCredentialProviderBuilder::default()
    }

    /// Returns the credentials service.
    pub fn credentials(&self) -> Credentials {
        Credentials::new(
            self.transport.clone(),
            self.iis_site.clone(),
            self.verify_tls,
        )
    }

    /// Returns the IIS site segment requests are routed under.
    pub fn iis_site(&self) -> &str {
        &self.iis_site
    }
}

/// Builder for [`CentralCredentialProvider`].
#[derive(Debug, Clone)]
pub struct CentralCredentialProviderBuilder {
    url: Option<String>,
    iis_site: String,
    verify_tls: bool,
}

impl Default for CentralCredentialProviderBuilder {
    fn default() -> Self {
        Self {
            url: None,
            iis_site: String::from("AIMWebService"),
            verify_tls: true,
        }
    }
}

impl CentralCredentialProviderBuilder {
    /// Sets the CCP base URL.
    #[must_use]
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Overrides the IIS site segment (default `AIMWebService`).
    #[must_use]
    pub fn iis_site(mut self, iis_site: impl Into<String>) -> Self {
        self.iis_site = iis_site.into();
        self
    }

    /// Disables TLS certificate verification.
    #[must_use]
    pub fn insecure(mut self) -> Self {
        self.verify_tls = false;
        self
    }

    /// Builds the provider.
    pub fn build(self) -> Result<CentralCredentialProvider, Error> {
        let url = self
            .url
            .ok_or_else(|| Error::configuration("CCP base URL is required"))?;
        // A trailing slash keeps Url::join from replacing the last path
        // segment of the base.
        let url = if url.ends_with('/') { url } else { url + "/" };
        let base_url = Url::parse(&url)?;

        Ok(CentralCredentialProvider {
            transport: Arc::new(RestTransport::new(base_url, self.verify_tls)?),
            iis_site: self.iis_site,
            verify_tls: self.verify_tls,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn test_builder_defaults() {
        let ccp = CentralCredentialProvider::builder()
            .url("https://ccp.example.com")
            .build()
            .unwrap();
        assert_eq!(ccp.iis_site(), "AIMWebService");
    }

    #[test]
    fn test_builder_custom_site() {
        let ccp = CentralCredentialProvider::builder()
            .url("https://ccp.example.com/")
            .iis_site("CustomAIM")
            .build()
            .unwrap();
        assert_eq!(ccp.iis_site(), "CustomAIM");
    }

    #[test]
    fn test_builder_requires_url() {
        let err = CentralCredentialProvider::builder().build().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn test_builder_rejects_bad_url() {
        let err = CentralCredentialProvider::builder()
            .url("not a url")
            .build()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }
}
