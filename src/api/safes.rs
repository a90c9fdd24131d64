//! Safe management operations.

use std::sync::Arc;

use serde::Serialize;

use crate::transport::RestTransport;
use crate::types::decode;
use crate::types::Safe;
use crate::util::to_clean_body;
use crate::Error;

/// Client for safe management operations.
///
/// Access via `vault.safes()`.
///
/// ## Example
///
/// ```rust,ignore
/// let safes = vault.safes();
///
/// // List safes matching a search term
/// let list = safes.list().search("prod").limit(25).await?;
///
/// // Create a new safe
/// let safe = safes
///     .create(CreateSafeRequest::new("DevOps").days_retention(30))
///     .await?;
///
/// // Get a specific safe
/// let safe = safes.get("DevOps").await?;
/// ```
#[derive(Clone)]
pub struct Safes {
    transport: Arc<RestTransport>,
}

impl Safes {
    pub(crate) fn new(transport: Arc<RestTransport>) -> Self {
        Self { transport }
    }

    /// Lists safes the authenticated user can see.
    pub fn list(&self) -> ListSafesRequest {
        ListSafesRequest {
            transport: self.transport.clone(),
            limit: None,
            offset: None,
            search: None,
            use_cache: false,
            sort_descending: false,
            include_accounts: false,
            extended_details: true,
        }
    }

    /// Gets a single safe by its name or URL id.
    pub async fn get(&self, identifier: &str) -> Result<Safe, Error> {
        let value = self.transport.get(&safe_path(identifier), &[]).await?;
        Safe::from_wire(&value, "Safes.get")
    }

    /// Creates a new safe.
    ///
    /// Exactly one retention form must be chosen on the request; supplying
    /// both or neither fails with `InvalidArgument` before any request is
    /// sent.
    pub async fn create(&self, request: CreateSafeRequest) -> Result<Safe, Error> {
        let retention = resolve_retention(
            request.number_of_versions_retention,
            request.number_of_days_retention,
            true,
        )?;
        let (versions, days) = match retention {
            RetentionUpdate::Versions(n) => (Some(n), None),
            RetentionUpdate::Days(n) => (None, Some(n)),
            // Unreachable when a choice is required.
            RetentionUpdate::Unchanged => (None, None),
        };

        let body = to_clean_body(&SafeWriteBody {
            safe_name: request.safe_name,
            description: request.description,
            location: request.location,
            number_of_versions_retention: versions,
            number_of_days_retention: days,
            managing_cpm: request.managing_cpm,
            olac_enabled: request.olac_enabled,
        })?;

        let value = self
            .transport
            .post("PasswordVault/API/Safes", Some(&body))
            .await?;
        Safe::from_wire(&value, "Safes.create")
    }

    /// Updates an existing safe.
    ///
    /// Fields not set on the request keep their current values: the current
    /// safe is fetched first and omitted fields are merged from it. A new
    /// retention value replaces the other retention form; when neither is
    /// supplied the current retention stays as-is. Supplying both forms
    /// fails with `InvalidArgument` before any request is sent.
    pub async fn update(
        &self,
        identifier: &str,
        request: UpdateSafeRequest,
    ) -> Result<Safe, Error> {
        let retention = resolve_retention(
            request.number_of_versions_retention,
            request.number_of_days_retention,
            false,
        )?;

        let current = self.get(identifier).await?;

        let (versions, days) = match retention {
            RetentionUpdate::Versions(n) => (Some(n), None),
            RetentionUpdate::Days(n) => (None, Some(n)),
            RetentionUpdate::Unchanged => (
                current.number_of_versions_retention,
                current.number_of_days_retention,
            ),
        };

        let body = to_clean_body(&SafeWriteBody {
            safe_name: request.safe_name.unwrap_or(current.safe_name),
            description: Some(request.description.unwrap_or(current.description)),
            location: Some(request.location.unwrap_or(current.location)),
            number_of_versions_retention: versions,
            number_of_days_retention: days,
            managing_cpm: Some(request.managing_cpm.unwrap_or(current.managing_cpm)),
            olac_enabled: Some(request.olac_enabled.unwrap_or(current.olac_enabled)),
        })?;

        let value = self.transport.put(&safe_path(identifier), &body).await?;
        Safe::from_wire(&value, "Safes.update")
    }

    /// Deletes a safe.
    pub async fn delete(&self, identifier: &str) -> Result<(), Error> {
        self.transport.delete(&safe_path(identifier)).await
    }
}

impl std::fmt::Debug for Safes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Safes").finish_non_exhaustive()
    }
}

/// Per-safe paths end with a trailing slash; the vault's router requires it
/// on this endpoint family.
fn safe_path(identifier: &str) -> String {
    format!(
        "PasswordVault/API/Safes/{}/",
        urlencoding::encode(identifier)
    )
}

/// The body shape shared by safe create and update.
#[derive(Serialize)]
struct SafeWriteBody {
    #[serde(rename = "SafeName")]
    safe_name: String,
    #[serde(rename = "Description")]
    description: Option<String>,
    #[serde(rename = "Location")]
    location: Option<String>,
    #[serde(rename = "NumberOfVersionsRetention")]
    number_of_versions_retention: Option<u32>,
    #[serde(rename = "NumberOfDaysRetention")]
    number_of_days_retention: Option<u32>,
    #[serde(rename = "ManagingCPM")]
    managing_cpm: Option<String>,
    #[serde(rename = "OLACEnabled")]
    olac_enabled: Option<bool>,
}

/// The retention change a create or update request asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RetentionUpdate {
    /// Keep the given number of password versions.
    Versions(u32),
    /// Keep the given number of days of history.
    Days(u32),
    /// Leave the current retention policy in place.
    Unchanged,
}

/// Validates the mutually-exclusive retention pair.
///
/// Both forms set is always an error. Neither set is an error when a choice
/// is required (create) and `Unchanged` otherwise (update).
fn resolve_retention(
    versions: Option<u32>,
    days: Option<u32>,
    require_choice: bool,
) -> Result<RetentionUpdate, Error> {
    match (versions, days) {
        (Some(_), Some(_)) => Err(Error::invalid_argument(
            "number_of_versions_retention and number_of_days_retention are mutually exclusive",
        )),
        (Some(n), None) => Ok(RetentionUpdate::Versions(n)),
        (None, Some(n)) => Ok(RetentionUpdate::Days(n)),
        (None, None) if require_choice => Err(Error::invalid_argument(
            "either number_of_versions_retention or number_of_days_retention must be set",
        )),
        (None, None) => Ok(RetentionUpdate::Unchanged),
    }
}

/// Request to create a new safe.
#[derive(Debug, Clone)]
pub struct CreateSafeRequest {
    safe_name: String,
    description: Option<String>,
    location: Option<String>,
    number_of_versions_retention: Option<u32>,
    number_of_days_retention: Option<u32>,
    managing_cpm: Option<String>,
    olac_enabled: Option<bool>,
}

impl CreateSafeRequest {
    /// Creates a new request with the given safe name.
    pub fn new(safe_name: impl Into<String>) -> Self {
        Self {
            safe_name: safe_name.into(),
            description: None,
            location: None,
            number_of_versions_retention: None,
            number_of_days_retention: None,
            managing_cpm: None,
            olac_enabled: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the vault location path.
    #[must_use]
    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Retains the given number of password versions.
    #[must_use]
    pub fn versions_retention(mut self, versions: u32) -> Self {
        self.number_of_versions_retention = Some(versions);
        self
    }

    /// Retains the given number of days of history.
    #[must_use]
    pub fn days_retention(mut self, days: u32) -> Self {
        self.number_of_days_retention = Some(days);
        self
    }

    /// Assigns the managing CPM user.
    #[must_use]
    pub fn managing_cpm(mut self, cpm: impl Into<String>) -> Self {
        self.managing_cpm = Some(cpm.into());
        self
    }

    /// Enables or disables Object Level Access Control.
    #[must_use]
    pub fn olac_enabled(mut self, enabled: bool) -> Self {
        self.olac_enabled = Some(enabled);
        self
    }
}

/// Request to update a safe. Unset fields keep their current values.
#[derive(Debug, Clone, Default)]
pub struct UpdateSafeRequest {
    safe_name: Option<String>,
    description: Option<String>,
    location: Option<String>,
    number_of_versions_retention: Option<u32>,
    number_of_days_retention: Option<u32>,
    managing_cpm: Option<String>,
    olac_enabled: Option<bool>,
}

impl UpdateSafeRequest {
    /// Creates a new empty update request.
    pub fn new() -> Self {
        Self::default()
    }

    /// Renames the safe.
    #[must_use]
    pub fn safe_name(mut self, safe_name: impl Into<String>) -> Self {
        self.safe_name = Some(safe_name.into());
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the vault location path.
    #[must_use]
    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Switches retention to the given number of password versions.
    #[must_use]
    pub fn versions_retention(mut self, versions: u32) -> Self {
        self.number_of_versions_retention = Some(versions);
        self
    }

    /// Switches retention to the given number of days of history.
    #[must_use]
    pub fn days_retention(mut self, days: u32) -> Self {
        self.number_of_days_retention = Some(days);
        self
    }

    /// Assigns the managing CPM user.
    #[must_use]
    pub fn managing_cpm(mut self, cpm: impl Into<String>) -> Self {
        self.managing_cpm = Some(cpm.into());
        self
    }

    /// Enables or disables Object Level Access Control.
    #[must_use]
    pub fn olac_enabled(mut self, enabled: bool) -> Self {
        self.olac_enabled = Some(enabled);
        self
    }
}

/// Request to list safes.
pub struct ListSafesRequest {
    transport: Arc<RestTransport>,
    limit: Option<u32>,
    offset: Option<u32>,
    search: Option<String>,
    use_cache: bool,
    sort_descending: bool,
    include_accounts: bool,
    extended_details: bool,
}

impl ListSafesRequest {
    /// Sets the maximum number of results to return.
    #[must_use]
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Skips the given number of results.
    #[must_use]
    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Filters safes by a search term.
    #[must_use]
    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Serves the response from the session cache when possible.
    #[must_use]
    pub fn use_cache(mut self, use_cache: bool) -> Self {
        self.use_cache = use_cache;
        self
    }

    /// Sorts results by safe name, descending.
    #[must_use]
    pub fn sort_descending(mut self, descending: bool) -> Self {
        self.sort_descending = descending;
        self
    }

    /// Includes each safe's accounts in the response.
    #[must_use]
    pub fn include_accounts(mut self, include: bool) -> Self {
        self.include_accounts = include;
        self
    }

    /// Returns full safe details rather than the abbreviated listing.
    #[must_use]
    pub fn extended_details(mut self, extended: bool) -> Self {
        self.extended_details = extended;
        self
    }

    async fn execute(self) -> Result<Vec<Safe>, Error> {
        let mut query: Vec<(&str, String)> = vec![
            ("useCache", self.use_cache.to_string()),
            ("sort", self.sort_descending.to_string()),
            ("includeAccounts", self.include_accounts.to_string()),
            ("extendedDetails", self.extended_details.to_string()),
        ];
        if let Some(limit) = self.limit {
            query.push(("limit", limit.to_string()));
        }
        if let Some(offset) = self.offset {
            query.push(("offset", offset.to_string()));
        }
        if let Some(search) = &self.search {
            query.push(("search", search.clone()));
        }

        let value = self.transport.get("PasswordVault/API/Safes", &query).await?;
        let obj = decode::as_object(&value, "Safes.list")?;
        Safe::list_from_wire(obj, "Safes.list")
    }
}

impl std::future::IntoFuture for ListSafesRequest {
    type Output = Result<Vec<Safe>, Error>;
    type IntoFuture = std::pin::Pin<Box<dyn std::future::Future<Output = Self::Output> + Send>>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(self.execute())
    }
}


#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod wiremock_tests {
    use super::*;
    use serde_json::json;
    use url::Url;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn create_test_service(server: &MockServer) -> Safes {
        let base = Url::parse(&format!("{}/", server.uri())).unwrap();
        Safes::new(Arc::new(RestTransport::new(base, true).unwrap()))
    }

    fn safe_body(name: &str) -> serde_json::Value {
        json!({
            "safeUrlId": name,
            "safeName": name,
            "safeNumber": 42,
            "description": "Deployment credentials",
            "location": "\\",
            "creator": {"id": "17", "name": "Administrator"},
            "olacEnabled": false,
            "managingCPM": "PasswordManager",
            "numberOfVersionsRetention": 5,
            "autoPurgeEnabled": false,
            "creationTime": 1606136749,
            "lastModificationTime": 1656136749,
            "isExpiredMember": false
        })
    }

    #[tokio::test]
    async fn test_list_safes() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/PasswordVault/API/Safes"))
            .and(query_param("useCache", "false"))
            .and(query_param("sort", "false"))
            .and(query_param("includeAccounts", "false"))
            .and(query_param("extendedDetails", "true"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"safes": [safe_body("DevOps")], "count": 1})),
            )
            .mount(&server)
            .await;

        let safes = create_test_service(&server).list().await.unwrap();
        assert_eq!(safes.len(), 1);
        assert_eq!(safes[0].safe_name, "DevOps");
    }

    #[tokio::test]
    async fn test_list_safes_with_filters() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/PasswordVault/API/Safes"))
            .and(query_param("limit", "25"))
            .and(query_param("offset", "50"))
            .and(query_param("search", "prod"))
            .and(query_param("includeAccounts", "true"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"safes": []})))
            .mount(&server)
            .await;

        let safes = create_test_service(&server)
            .list()
            .limit(25)
            .offset(50)
            .search("prod")
            .include_accounts(true)
            .await
            .unwrap();
        assert!(safes.is_empty());
    }

    #[tokio::test]
    async fn test_get_safe() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/PasswordVault/API/Safes/DevOps/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(safe_body("DevOps")))
            .mount(&server)
            .await;

        let safe = create_test_service(&server).get("DevOps").await.unwrap();
        assert_eq!(safe.safe_url_id, "DevOps");
    }

    #[tokio::test]
    async fn test_create_safe_sends_clean_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/PasswordVault/API/Safes"))
            .and(body_json(json!({
                "SafeName": "DevOps",
                "Description": "Deployment credentials",
                "NumberOfDaysRetention": 30
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(safe_body("DevOps")))
            .mount(&server)
            .await;

        let safe = create_test_service(&server)
            .create(
                CreateSafeRequest::new("DevOps")
                    .description("Deployment credentials")
                    .days_retention(30),
            )
            .await
            .unwrap();
        assert_eq!(safe.safe_name, "DevOps");
    }

    #[tokio::test]
    async fn test_create_safe_validates_before_sending() {
        // No mock is mounted: the validation error must fire before any
        // request leaves the client.
        let server = MockServer::start().await;
        let err = create_test_service(&server)
            .create(
                CreateSafeRequest::new("DevOps")
                    .versions_retention(5)
                    .days_retention(30),
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::InvalidArgument);
    }

    #[tokio::test]
    async fn test_update_safe_merges_current_values() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/PasswordVault/API/Safes/DevOps/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(safe_body("DevOps")))
            .mount(&server)
            .await;

        // The current safe retains 5 versions; switching to days retention
        // must clear the versions value, and unset fields must carry over.
        Mock::given(method("PUT"))
            .and(path("/PasswordVault/API/Safes/DevOps/"))
            .and(body_json(json!({
                "SafeName": "DevOps",
                "Description": "Updated description",
                "Location": "\\",
                "NumberOfDaysRetention": 30,
                "ManagingCPM": "PasswordManager",
                "OLACEnabled": false
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(safe_body("DevOps")))
            .mount(&server)
            .await;

        let safe = create_test_service(&server)
            .update(
                "DevOps",
                UpdateSafeRequest::new()
                    .description("Updated description")
                    .days_retention(30),
            )
            .await
            .unwrap();
        assert_eq!(safe.safe_name, "DevOps");
    }

    #[tokio::test]
    async fn test_update_safe_keeps_retention_when_unset() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/PasswordVault/API/Safes/DevOps/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(safe_body("DevOps")))
            .mount(&server)
            .await;

        Mock::given(method("PUT"))
            .and(path("/PasswordVault/API/Safes/DevOps/"))
            .and(body_json(json!({
                "SafeName": "DevOps",
                "Description": "Deployment credentials",
                "Location": "\\",
                "NumberOfVersionsRetention": 5,
                "ManagingCPM": "PasswordManager",
                "OLACEnabled": true
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(safe_body("DevOps")))
            .mount(&server)
            .await;

        let result = create_test_service(&server)
            .update("DevOps", UpdateSafeRequest::new().olac_enabled(true))
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_delete_safe() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/PasswordVault/API/Safes/DevOps/"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let result = create_test_service(&server).delete("DevOps").await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_get_safe_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/PasswordVault/API/Safes/missing/"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "ErrorCode": "SFWS0007",
                "ErrorMessage": "Safe does not exist"
            })))
            .mount(&server)
            .await;

        let err = create_test_service(&server).get("missing").await.unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::NotFound);
    }
}
