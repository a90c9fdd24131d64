//! Safe membership operations.

use std::sync::Arc;

use serde_json::json;

use crate::transport::RestTransport;
use crate::types::decode;
use crate::types::{SafeMember, SafeMemberPermissions, SafeMemberType};
use crate::util::strip_null_values;
use crate::Error;

/// Client for safe membership operations.
///
/// Access via `vault.safe_members()`.
///
/// ## Example
///
/// ```rust,ignore
/// let members = vault.safe_members();
///
/// // List a safe's members
/// let list = members.list("DevOps").await?;
///
/// // Grant a user read access
/// let member = members
///     .add(
///         "DevOps",
///         AddSafeMemberRequest::new("deploy-bot", SafeMemberType::User, permissions),
///     )
///     .await?;
/// ```
#[derive(Clone)]
pub struct SafeMembers {
    transport: Arc<RestTransport>,
}

impl SafeMembers {
    pub(crate) fn new(transport: Arc<RestTransport>) -> Self {
        Self { transport }
    }

    /// Lists the members of a safe.
    pub async fn list(&self, safe_identifier: &str) -> Result<Vec<SafeMember>, Error> {
        let value = self
            .transport
            .get(&members_path(safe_identifier), &[])
            .await?;
        let obj = decode::as_object(&value, "SafeMembers.list")?;
        SafeMember::list_from_wire(obj, "SafeMembers.list")
    }

    /// Gets a single member of a safe.
    ///
    /// `use_cache: true` lets the vault serve the membership from the
    /// session cache.
    pub async fn get(
        &self,
        safe_identifier: &str,
        member_name: &str,
        use_cache: bool,
    ) -> Result<SafeMember, Error> {
        let path = member_path(safe_identifier, member_name);
        let mut query: Vec<(&str, String)> = Vec::new();
        if use_cache {
            query.push(("useCache", String::from("true")));
        }
        let value = self.transport.get(&path, &query).await?;
        SafeMember::from_wire(&value, "SafeMembers.get")
    }

    /// Adds an existing user or group as a safe member.
    pub async fn add(
        &self,
        safe_identifier: &str,
        request: AddSafeMemberRequest,
    ) -> Result<SafeMember, Error> {
        // The member type goes out as its integer code; the vault's add
        // endpoint does not accept the string tag.
        let mut map = serde_json::Map::new();
        map.insert("memberName".into(), json!(request.member_name));
        map.insert("searchIn".into(), json!(request.search_in));
        map.insert(
            "membershipExpirationDate".into(),
            json!(request.membership_expiration_date),
        );
        map.insert("memberType".into(), json!(request.member_type.code()));
        map.insert(
            "permissions".into(),
            serde_json::to_value(request.permissions)?,
        );
        map.insert("isReadOnly".into(), json!(request.is_read_only));
        let body = serde_json::Value::Object(strip_null_values(map));

        let value = self
            .transport
            .post(&members_path(safe_identifier), Some(&body))
            .await?;
        SafeMember::from_wire(&value, "SafeMembers.add")
    }

    /// Replaces a member's permission set.
    ///
    /// Unlike safe updates there is no merge: the permission flags sent
    /// here become the member's full permission set.
    pub async fn update(
        &self,
        safe_identifier: &str,
        member_name: &str,
        permissions: SafeMemberPermissions,
        membership_expiration_date: Option<i64>,
    ) -> Result<SafeMember, Error> {
        // This endpoint spells the expiration key with a capital M, unlike
        // the add body.
        let mut map = serde_json::Map::new();
        map.insert(
            "MembershipExpirationDate".into(),
            json!(membership_expiration_date),
        );
        map.insert("permissions".into(), serde_json::to_value(permissions)?);
        let body = serde_json::Value::Object(strip_null_values(map));

        let value = self
            .transport
            .put(&member_path(safe_identifier, member_name), &body)
            .await?;
        SafeMember::from_wire(&value, "SafeMembers.update")
    }

    /// Removes a member from a safe.
    pub async fn delete(&self, safe_identifier: &str, member_name: &str) -> Result<(), Error> {
        self.transport
            .delete(&member_path(safe_identifier, member_name))
            .await
    }
}

impl std::fmt::Debug for SafeMembers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SafeMembers").finish_non_exhaustive()
    }
}

// Member paths use the lower-case `api` segment, unlike the Safes family.

fn members_path(safe_identifier: &str) -> String {
    format!(
        "PasswordVault/api/Safes/{}/Members",
        urlencoding::encode(safe_identifier)
    )
}

fn member_path(safe_identifier: &str, member_name: &str) -> String {
    format!(
        "PasswordVault/api/Safes/{}/Members/{}",
        urlencoding::encode(safe_identifier),
        urlencoding::encode(member_name)
    )
}

/// Request to add a user or group to a safe.
#[derive(Debug, Clone)]
pub struct AddSafeMemberRequest {
    member_name: String,
    member_type: SafeMemberType,
    permissions: SafeMemberPermissions,
    search_in: String,
    membership_expiration_date: Option<i64>,
    is_read_only: bool,
}

impl AddSafeMemberRequest {
    /// Creates a new request for the given member and permission set.
    ///
    /// The member is searched for in the vault by default; use
    /// [`search_in`](Self::search_in) for domain members.
    pub fn new(
        member_name: impl Into<String>,
        member_type: SafeMemberType,
        permissions: SafeMemberPermissions,
    ) -> Self {
        Self {
            member_name: member_name.into(),
            member_type,
            permissions,
            search_in: String::from("Vault"),
            membership_expiration_date: None,
            is_read_only: false,
        }
    }

    /// Sets where the user or group is looked up (the vault or a domain).
    #[must_use]
    pub fn search_in(mut self, search_in: impl Into<String>) -> Self {
        self.search_in = search_in.into();
        self
    }

    /// Sets when the membership expires, seconds since the Unix epoch.
    #[must_use]
    pub fn membership_expiration_date(mut self, expiration: i64) -> Self {
        self.membership_expiration_date = Some(expiration);
        self
    }

    /// Marks the membership as not updatable by the current user.
    #[must_use]
    pub fn read_only(mut self, read_only: bool) -> Self {
        self.is_read_only = read_only;
        self
    }
}


#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod wiremock_tests {
    use super::*;
    use url::Url;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn create_test_service(server: &MockServer) -> SafeMembers {
        let base = Url::parse(&format!("{}/", server.uri())).unwrap();
        SafeMembers::new(Arc::new(RestTransport::new(base, true).unwrap()))
    }

    fn member_body(name: &str) -> serde_json::Value {
        json!({
            "safeUrlId": "DevOps",
            "safeName": "DevOps",
            "safeNumber": 42,
            "memberId": 118,
            "memberName": name,
            "memberType": "User",
            "membershipExpirationDate": null,
            "isExpiredMembershipEnable": false,
            "isPredefinedUser": false,
            "isReadOnly": false,
            "permissions": {"useAccounts": true}
        })
    }

    #[tokio::test]
    async fn test_list_members() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/PasswordVault/api/Safes/DevOps/Members"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "members": [member_body("deploy-bot"), member_body("audit-svc")]
            })))
            .mount(&server)
            .await;

        let members = create_test_service(&server).list("DevOps").await.unwrap();
        assert_eq!(members.len(), 2);
        assert_eq!(members[0].member_name, "deploy-bot");
    }

    #[tokio::test]
    async fn test_get_member_without_cache() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/PasswordVault/api/Safes/DevOps/Members/deploy-bot"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(member_body("deploy-bot")),
            )
            .mount(&server)
            .await;

        let member = create_test_service(&server)
            .get("DevOps", "deploy-bot", false)
            .await
            .unwrap();
        assert_eq!(member.member_name, "deploy-bot");
    }

    #[tokio::test]
    async fn test_get_member_with_cache_flag() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/PasswordVault/api/Safes/DevOps/Members/deploy-bot"))
            .and(query_param("useCache", "true"))
            .respond_with(ResponseTemplate::new(200).set_body_json(member_body("deploy-bot")))
            .mount(&server)
            .await;

        let result = create_test_service(&server)
            .get("DevOps", "deploy-bot", true)
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_add_member_sends_integer_member_type() {
        let server = MockServer::start().await;
        let permissions = SafeMemberPermissions {
            use_accounts: true,
            list_accounts: true,
            ..SafeMemberPermissions::default()
        };
        let expected_permissions = serde_json::to_value(permissions).unwrap();
        // All flags go out explicitly, granted or not.
        assert_eq!(expected_permissions["addAccounts"], json!(false));
        assert_eq!(expected_permissions["useAccounts"], json!(true));

        Mock::given(method("POST"))
            .and(path("/PasswordVault/api/Safes/DevOps/Members"))
            .and(body_json(json!({
                "memberName": "deploy-bot",
                "searchIn": "Vault",
                "memberType": 1,
                "permissions": expected_permissions,
                "isReadOnly": false
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(member_body("deploy-bot")))
            .mount(&server)
            .await;

        let member = create_test_service(&server)
            .add(
                "DevOps",
                AddSafeMemberRequest::new("deploy-bot", SafeMemberType::User, permissions),
            )
            .await
            .unwrap();
        assert_eq!(member.member_name, "deploy-bot");
    }

    #[tokio::test]
    async fn test_update_member_body_shape() {
        let server = MockServer::start().await;
        let permissions = SafeMemberPermissions::default();

        Mock::given(method("PUT"))
            .and(path("/PasswordVault/api/Safes/DevOps/Members/deploy-bot"))
            .and(body_json(json!({
                "MembershipExpirationDate": 1735689600,
                "permissions": serde_json::to_value(permissions).unwrap()
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(member_body("deploy-bot")))
            .mount(&server)
            .await;

        let result = create_test_service(&server)
            .update("DevOps", "deploy-bot", permissions, Some(1735689600))
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_update_member_without_expiration_omits_key() {
        let server = MockServer::start().await;
        let permissions = SafeMemberPermissions::default();

        Mock::given(method("PUT"))
            .and(path("/PasswordVault/api/Safes/DevOps/Members/deploy-bot"))
            .and(body_json(json!({
                "permissions": serde_json::to_value(permissions).unwrap()
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(member_body("deploy-bot")))
            .mount(&server)
            .await;

        let result = create_test_service(&server)
            .update("DevOps", "deploy-bot", permissions, None)
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_delete_member() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/PasswordVault/api/Safes/DevOps/Members/deploy-bot"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let result = create_test_service(&server)
            .delete("DevOps", "deploy-bot")
            .await;
        assert!(result.is_ok());
    }
}
