//! REST transport implementation using reqwest.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::error::ErrorKind;
use crate::Error;

/// Default per-request timeout when none is supplied.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// REST transport shared by the endpoint services of one facade.
///
/// Holds the immutable base URL and TLS-verification choice, plus the
/// session-token slot that [`logon`](crate::api::Authentication::logon)
/// callers can fill. Everything else is per-request.
#[derive(Clone)]
pub struct RestTransport {
    client: reqwest::Client,
    base_url: Url,
    session_token: Arc<RwLock<Option<String>>>,
}

impl std::fmt::Debug for RestTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestTransport")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl RestTransport {
    /// Creates a new transport for the given base URL.
    ///
    /// `verify_tls: false` disables certificate verification, for vaults
    /// running with self-signed certificates in lab environments.
    pub fn new(base_url: Url, verify_tls: bool) -> Result<Self, Error> {
        let mut client_builder = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .connect_timeout(Duration::from_secs(10))
            .use_rustls_tls();

        if !verify_tls {
            client_builder = client_builder.danger_accept_invalid_certs(true);
        }

        let client = client_builder.build().map_err(|e| {
            Error::configuration(format!("failed to create HTTP client: {}", e)).with_source(e)
        })?;

        Ok(Self {
            client,
            base_url,
            session_token: Arc::new(RwLock::new(None)),
        })
    }

    /// Returns the base URL this transport targets.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Installs a session token sent as the `Authorization` header on every
    /// subsequent request.
    pub fn set_session_token(&self, token: String) {
        *self.session_token.write() = Some(token);
    }

    /// Clears the session token.
    pub fn clear_session_token(&self) {
        *self.session_token.write() = None;
    }

    /// Builds default headers for requests.
    fn build_headers(&self) -> Result<HeaderMap, Error> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        if let Some(ref token) = *self.session_token.read() {
            headers.insert(
                AUTHORIZATION,
                HeaderValue::from_str(token).map_err(|_| {
                    Error::new(ErrorKind::Unauthorized, "invalid session token format")
                })?,
            );
        }

        Ok(headers)
    }

    /// Makes a GET request with query parameters.
    pub(crate) async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Value, Error> {
        self.get_with(path, query, None).await
    }

    /// Makes a GET request with query parameters and an optional
    /// per-request timeout override.
    pub(crate) async fn get_with(
        &self,
        path: &str,
        query: &[(&str, String)],
        timeout: Option<Duration>,
    ) -> Result<Value, Error> {
        let url = self.join(path)?;
        let mut request = self.client.get(url).headers(self.build_headers()?);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }
        self.dispatch(Method::GET, path, request).await
    }

    /// Makes a POST request with an optional JSON body.
    pub(crate) async fn post(&self, path: &str, body: Option<&Value>) -> Result<Value, Error> {
        let url = self.join(path)?;
        let mut request = self.client.post(url).headers(self.build_headers()?);
        if let Some(body) = body {
            request = request.json(body);
        }
        self.dispatch(Method::POST, path, request).await
    }

    /// Makes a PUT request with a JSON body.
    pub(crate) async fn put(&self, path: &str, body: &Value) -> Result<Value, Error> {
        let url = self.join(path)?;
        let request = self.client.put(url).headers(self.build_headers()?).json(body);
        self.dispatch(Method::PUT, path, request).await
    }

    /// Makes a DELETE request. Success carries no body.
    pub(crate) async fn delete(&self, path: &str) -> Result<(), Error> {
        let url = self.join(path)?;
        let request = self.client.delete(url).headers(self.build_headers()?);
        self.dispatch(Method::DELETE, path, request).await?;
        Ok(())
    }

    fn join(&self, path: &str) -> Result<Url, Error> {
        self.base_url.join(path).map_err(|e| {
            Error::configuration(format!("invalid URL path '{}': {}", path, e)).with_source(e)
        })
    }

    /// Sends the request and decodes the response body.
    async fn dispatch(
        &self,
        method: Method,
        path: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<Value, Error> {
        debug!(%method, path, "dispatching vault request");

        let response = request.send().await.map_err(map_reqwest_error)?;
        let status = response.status();
        debug!(%method, path, status = status.as_u16(), "vault responded");

        decode_body(status, response.text().await.ok(), path)
    }
}

/// Turns a status + body into a decoded JSON value or a remote error.
///
/// An empty success body decodes to `Value::Null` (the vault answers some
/// mutations with 204/empty bodies).
pub(crate) fn decode_body(
    status: StatusCode,
    body: Option<String>,
    path: &str,
) -> Result<Value, Error> {
    let body = body.unwrap_or_default();

    if !status.is_success() {
        return Err(map_status_error(status.as_u16(), &body).with_endpoint(path));
    }

    if body.trim().is_empty() {
        return Ok(Value::Null);
    }

    serde_json::from_str(&body).map_err(|e| {
        Error::invalid_response(format!("failed to parse response from {}: {}", path, e))
            .with_source(e)
    })
}

/// Maps reqwest errors to client errors.
pub(crate) fn map_reqwest_error(e: reqwest::Error) -> Error {
    if e.is_timeout() {
        Error::timeout(format!("request timed out: {}", e)).with_source(e)
    } else if e.is_connect() {
        Error::connection(format!("connection failed: {}", e)).with_source(e)
    } else {
        Error::new(ErrorKind::Transport, format!("HTTP error: {}", e)).with_source(e)
    }
}

/// Maps a non-success HTTP status to a client error carrying the status.
pub(crate) fn map_status_error(status: u16, body: &str) -> Error {
    let message = if body.is_empty() {
        format!("HTTP {}", status)
    } else {
        // The vault reports errors as {"ErrorCode": ..., "ErrorMessage": ...}
        match serde_json::from_str::<Value>(body) {
            Ok(error) => error
                .get("ErrorMessage")
                .and_then(|e| e.as_str())
                .unwrap_or(body)
                .to_string(),
            Err(_) => body.to_string(),
        }
    };

    Error::new(ErrorKind::from_http_status(status), message).with_status(status)
}
