//! Credential retrieval from the CCP.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;

use crate::transport::{self, RestTransport};
use crate::types::decode;
use crate::types::Credential;
use crate::Error;

/// The client certificate material presented to the CCP.
///
/// Mirrors the three accepted file layouts: a single bundle file, a
/// separate certificate and key, or a separate pair with a passphrase on
/// the key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientCertificate {
    /// One PEM file carrying both certificate and key.
    Cert {
        /// Path to the bundle file.
        path: PathBuf,
    },
    /// Separate certificate and unencrypted key files.
    CertAndKey {
        /// Path to the certificate file.
        cert: PathBuf,
        /// Path to the key file.
        key: PathBuf,
    },
    /// Separate certificate and passphrase-protected key files.
    CertKeyAndPassword {
        /// Path to the certificate file.
        cert: PathBuf,
        /// Path to the encrypted key file.
        key: PathBuf,
        /// Passphrase for the key.
        password: String,
    },
}

impl ClientCertificate {
    /// Selects the certificate form from optionally-present pieces.
    ///
    /// Priority: certificate, key and password when all three are given;
    /// certificate and key when both are given; the certificate alone
    /// otherwise (a password without a key is ignored). No certificate
    /// path means no certificate.
    pub fn resolve(
        path: Option<PathBuf>,
        key: Option<PathBuf>,
        password: Option<String>,
    ) -> Option<Self> {
        let cert = path?;
        match (key, password) {
            (Some(key), Some(password)) => Some(Self::CertKeyAndPassword {
                cert,
                key,
                password,
            }),
            (Some(key), None) => Some(Self::CertAndKey { cert, key }),
            (None, _) => Some(Self::Cert { path: cert }),
        }
    }

    /// Reads the files and builds the TLS identity.
    ///
    /// A passphrase-protected key is decrypted and re-encoded as plain
    /// PKCS#8 before the identity is assembled.
    pub(crate) fn load_identity(&self) -> Result<reqwest::Identity, Error> {
        let pem = match self {
            Self::Cert { path } => std::fs::read(path)?,
            Self::CertAndKey { cert, key } => {
                let mut pem = std::fs::read(key)?;
                pem.extend_from_slice(&std::fs::read(cert)?);
                pem
            }
            Self::CertKeyAndPassword {
                cert,
                key,
                password,
            } => {
                let encrypted = std::fs::read(key)?;
                let pkey = openssl::pkey::PKey::private_key_from_pem_passphrase(
                    &encrypted,
                    password.as_bytes(),
                )
                .map_err(|e| {
                    Error::configuration(format!("failed to decrypt client key: {}", e))
                        .with_source(e)
                })?;
                let mut pem = pkey.private_key_to_pem_pkcs8().map_err(|e| {
                    Error::configuration(format!("failed to re-encode client key: {}", e))
                        .with_source(e)
                })?;
                pem.extend_from_slice(&std::fs::read(cert)?);
                pem
            }
        };

        reqwest::Identity::from_pem(&pem).map_err(|e| {
            Error::configuration(format!("invalid client certificate: {}", e)).with_source(e)
        })
    }
}

/// Client for credential retrieval.
///
/// Access via `ccp.credentials()`.
#[derive(Clone)]
pub struct Credentials {
    transport: Arc<RestTransport>,
    iis_site: String,
    verify_tls: bool,
}

impl Credentials {
    pub(crate) fn new(transport: Arc<RestTransport>, iis_site: String, verify_tls: bool) -> Self {
        Self {
            transport,
            iis_site,
            verify_tls,
        }
    }

    /// Retrieves the credentials matching the request's account query.
    ///
    /// The CCP answers with every matching account; the `data` array maps
    /// element-wise to the returned vector.
    pub async fn get_credential(
        &self,
        request: GetCredentialRequest,
    ) -> Result<Vec<Credential>, Error> {
        let path = format!("{}/api/Accounts", self.iis_site);
        let query = request.to_query();
        let timeout = request.connection_timeout;

        let value = match &request.certificate {
            None => self.transport.get_with(&path, &query, timeout).await?,
            Some(certificate) => {
                self.get_with_certificate(&path, &query, timeout, certificate)
                    .await?
            }
        };

        let obj = decode::as_object(&value, "Credentials.get")?;
        decode::req_list(obj, "data", "Credentials.get", |v| {
            Credential::from_wire(v, "Credentials.get")
        })
    }

    /// Performs the GET through a one-off client carrying the certificate
    /// identity. The connection is dropped with the client afterwards.
    async fn get_with_certificate(
        &self,
        path: &str,
        query: &[(&str, String)],
        timeout: Option<Duration>,
        certificate: &ClientCertificate,
    ) -> Result<Value, Error> {
        let identity = certificate.load_identity()?;

        let mut builder = reqwest::Client::builder()
            .use_rustls_tls()
            .identity(identity);
        if !self.verify_tls {
            builder = builder.danger_accept_invalid_certs(true);
        }
        let client = builder.build().map_err(|e| {
            Error::configuration(format!("failed to create HTTP client: {}", e)).with_source(e)
        })?;

        let url = self.transport.base_url().join(path)?;
        let mut req = client.get(url).query(query);
        if let Some(timeout) = timeout {
            req = req.timeout(timeout);
        }

        let response = req.send().await.map_err(transport::map_reqwest_error)?;
        let status = response.status();
        transport::decode_body(status, response.text().await.ok(), path)
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("iis_site", &self.iis_site)
            .finish_non_exhaustive()
    }
}

/// Request to retrieve credentials for an account query.
#[derive(Debug, Clone)]
pub struct GetCredentialRequest {
    app_id: String,
    safe: String,
    folder: Option<String>,
    object: Option<String>,
    user_name: Option<String>,
    address: Option<String>,
    database: Option<String>,
    policy_id: Option<String>,
    reason: Option<String>,
    connection_timeout: Option<Duration>,
    fail_on_password_change: Option<bool>,
    certificate: Option<ClientCertificate>,
}

impl GetCredentialRequest {
    /// Creates a new request for the given application id and safe.
    pub fn new(app_id: impl Into<String>, safe: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            safe: safe.into(),
            folder: None,
            object: None,
            user_name: None,
            address: None,
            database: None,
            policy_id: None,
            reason: None,
            connection_timeout: None,
            fail_on_password_change: None,
            certificate: None,
        }
    }

    /// Narrows the query to a folder within the safe.
    #[must_use]
    pub fn folder(mut self, folder: impl Into<String>) -> Self {
        self.folder = Some(folder.into());
        self
    }

    /// Narrows the query to an object name.
    #[must_use]
    pub fn object(mut self, object: impl Into<String>) -> Self {
        self.object = Some(object.into());
        self
    }

    /// Narrows the query to an account user name.
    #[must_use]
    pub fn user_name(mut self, user_name: impl Into<String>) -> Self {
        self.user_name = Some(user_name.into());
        self
    }

    /// Narrows the query to an account address.
    #[must_use]
    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// Narrows the query to an account database.
    #[must_use]
    pub fn database(mut self, database: impl Into<String>) -> Self {
        self.database = Some(database.into());
        self
    }

    /// Narrows the query to accounts under a platform policy.
    #[must_use]
    pub fn policy_id(mut self, policy_id: impl Into<String>) -> Self {
        self.policy_id = Some(policy_id.into());
        self
    }

    /// Attaches an audit reason to the retrieval.
    #[must_use]
    pub fn reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Bounds how long the provider may spend on this retrieval. Also
    /// applied as the request timeout on the client side.
    #[must_use]
    pub fn connection_timeout(mut self, timeout: Duration) -> Self {
        self.connection_timeout = Some(timeout);
        self
    }

    /// Fails the retrieval when the CPM is mid-change on the password.
    #[must_use]
    pub fn fail_on_password_change(mut self, fail: bool) -> Self {
        self.fail_on_password_change = Some(fail);
        self
    }

    /// Presents a client certificate with the request.
    #[must_use]
    pub fn certificate(mut self, certificate: ClientCertificate) -> Self {
        self.certificate = Some(certificate);
        self
    }

    /// Builds the query pairs, omitting unset parameters.
    fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query: Vec<(&'static str, String)> = vec![
            ("AppID", self.app_id.clone()),
            ("Safe", self.safe.clone()),
        ];
        if let Some(folder) = &self.folder {
            query.push(("Folder", folder.clone()));
        }
        if let Some(object) = &self.object {
            query.push(("Object", object.clone()));
        }
        if let Some(user_name) = &self.user_name {
            query.push(("UserName", user_name.clone()));
        }
        if let Some(address) = &self.address {
            query.push(("Address", address.clone()));
        }
        if let Some(database) = &self.database {
            query.push(("Database", database.clone()));
        }
        if let Some(policy_id) = &self.policy_id {
            query.push(("PolicyID", policy_id.clone()));
        }
        if let Some(reason) = &self.reason {
            query.push(("Reason", reason.clone()));
        }
        if let Some(timeout) = self.connection_timeout {
            query.push(("ConnectionTimeout", timeout.as_secs().to_string()));
        }
        if let Some(fail) = self.fail_on_password_change {
            query.push(("FailOnPasswordChange", fail.to_string()));
        }
        query
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn p(s: &str) -> PathBuf {
        PathBuf::from(s)
    }

    #[test]
    fn test_certificate_resolve_priority() {
        assert_eq!(
            ClientCertificate::resolve(
                Some(p("client.crt")),
                Some(p("client.key")),
                Some("pass".into())
            ),
            Some(ClientCertificate::CertKeyAndPassword {
                cert: p("client.crt"),
                key: p("client.key"),
                password: "pass".into()
            })
        );
        assert_eq!(
            ClientCertificate::resolve(Some(p("client.crt")), Some(p("client.key")), None),
            Some(ClientCertificate::CertAndKey {
                cert: p("client.crt"),
                key: p("client.key")
            })
        );
        assert_eq!(
            ClientCertificate::resolve(Some(p("bundle.pem")), None, None),
            Some(ClientCertificate::Cert {
                path: p("bundle.pem")
            })
        );
    }

    #[test]
    fn test_certificate_resolve_password_without_key_ignored() {
        assert_eq!(
            ClientCertificate::resolve(Some(p("bundle.pem")), None, Some("pass".into())),
            Some(ClientCertificate::Cert {
                path: p("bundle.pem")
            })
        );
    }

    #[test]
    fn test_certificate_resolve_no_cert() {
        assert_eq!(
            ClientCertificate::resolve(None, Some(p("client.key")), Some("pass".into())),
            None
        );
    }

    #[test]
    fn test_query_includes_only_set_params() {
        let query = GetCredentialRequest::new("BillingApp", "DevOps")
            .user_name("svc-deploy")
            .fail_on_password_change(true)
            .to_query();
        assert_eq!(
            query,
            vec![
                ("AppID", String::from("BillingApp")),
                ("Safe", String::from("DevOps")),
                ("UserName", String::from("svc-deploy")),
                ("FailOnPasswordChange", String::from("true")),
            ]
        );
    }

    #[test]
    fn test_query_connection_timeout_in_seconds() {
        let query = GetCredentialRequest::new("BillingApp", "DevOps")
            .connection_timeout(Duration::from_secs(45))
            .to_query();
        assert!(query.contains(&("ConnectionTimeout", String::from("45"))));
    }
}
