//! Safe records and their wire mappers.

use serde::Serialize;
use serde_json::Value;

use crate::types::decode::{
    self, opt_u32, req_bool, req_i64, req_str, WireObject,
};
use crate::Error;

/// The user that created a safe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SafeCreator {
    /// The creator's vault user id.
    pub id: String,
    /// The creator's user name.
    pub name: String,
}

impl SafeCreator {
    pub(crate) fn from_wire(value: &Value, endpoint: &str) -> Result<Self, Error> {
        let obj = decode::as_object(value, endpoint)?;
        Ok(Self {
            id: req_str(obj, "id", endpoint)?,
            name: req_str(obj, "name", endpoint)?,
        })
    }
}

/// An account stored in a safe, as returned by `includeAccounts` listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SafeAccount {
    /// The account id.
    pub id: String,
    /// The account name.
    pub name: String,
}

impl SafeAccount {
    pub(crate) fn from_wire(value: &Value, endpoint: &str) -> Result<Self, Error> {
        let obj = decode::as_object(value, endpoint)?;
        Ok(Self {
            id: req_str(obj, "id", endpoint)?,
            name: req_str(obj, "name", endpoint)?,
        })
    }
}

/// A safe with its properties and accounts.
///
/// Exactly one of `number_of_versions_retention` /
/// `number_of_days_retention` is populated; the vault enforces the
/// retention choice and the create/update services validate it locally
/// before any request is sent.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Safe {
    /// URL-safe identifier, usable wherever a safe identifier is accepted.
    pub safe_url_id: String,
    /// The safe's display name.
    pub safe_name: String,
    /// Internal safe number.
    pub safe_number: i64,
    /// Free-text description.
    pub description: String,
    /// Vault location path of the safe.
    pub location: String,
    /// The user that created the safe.
    pub creator: SafeCreator,
    /// Whether Object Level Access Control is enabled.
    pub olac_enabled: bool,
    /// The CPM user assigned to manage the safe's accounts.
    #[serde(rename = "managingCPM")]
    pub managing_cpm: String,
    /// Number of password versions kept, when version-based retention is
    /// active.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_versions_retention: Option<u32>,
    /// Number of days of history kept, when day-based retention is active.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_days_retention: Option<u32>,
    /// Whether objects are purged automatically per the retention policy.
    pub auto_purge_enabled: bool,
    /// Creation time, seconds since the Unix epoch.
    pub creation_time: i64,
    /// Last modification time, seconds since the Unix epoch.
    pub last_modification_time: i64,
    /// Accounts in the safe, in server order. Empty unless the listing
    /// requested accounts.
    pub accounts: Vec<SafeAccount>,
    /// Whether the requesting user's membership of this safe has expired.
    pub is_expired_member: bool,
}

impl Safe {
    /// Maps one vault-shaped JSON object to a `Safe`.
    pub fn from_wire(value: &Value, endpoint: &str) -> Result<Self, Error> {
        let obj = decode::as_object(value, endpoint)?;
        Ok(Self {
            safe_url_id: req_str(obj, "safeUrlId", endpoint)?,
            safe_name: req_str(obj, "safeName", endpoint)?,
            safe_number: req_i64(obj, "safeNumber", endpoint)?,
            description: req_str(obj, "description", endpoint)?,
            location: req_str(obj, "location", endpoint)?,
            creator: SafeCreator::from_wire(
                decode::required(obj, "creator", endpoint)?,
                endpoint,
            )?,
            olac_enabled: req_bool(obj, "olacEnabled", endpoint)?,
            managing_cpm: req_str(obj, "managingCPM", endpoint)?,
            number_of_versions_retention: opt_u32(obj, "numberOfVersionsRetention", endpoint)?,
            number_of_days_retention: opt_u32(obj, "numberOfDaysRetention", endpoint)?,
            auto_purge_enabled: req_bool(obj, "autoPurgeEnabled", endpoint)?,
            creation_time: req_i64(obj, "creationTime", endpoint)?,
            last_modification_time: req_i64(obj, "lastModificationTime", endpoint)?,
            accounts: decode::list_or_empty(obj, "accounts", endpoint, |v| {
                SafeAccount::from_wire(v, endpoint)
            })?,
            is_expired_member: req_bool(obj, "isExpiredMember", endpoint)?,
        })
    }

    pub(crate) fn list_from_wire(obj: &WireObject, endpoint: &str) -> Result<Vec<Self>, Error> {
        decode::req_list(obj, "safes", endpoint, |v| Self::from_wire(v, endpoint))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use serde_json::json;

    fn sample_safe_json() -> Value {
        json!({
            "safeUrlId": "DevOps",
            "safeName": "DevOps",
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
            "accounts": [
                {"id": "12_3", "name": "deploy-key"},
                {"id": "12_4", "name": "registry-token"}
            ],
            "isExpiredMember": false
        })
    }

    #[test]
    fn test_safe_from_wire() {
        let safe = Safe::from_wire(&sample_safe_json(), "Safes.get").unwrap();
        assert_eq!(safe.safe_url_id, "DevOps");
        assert_eq!(safe.safe_number, 42);
        assert_eq!(safe.creator.name, "Administrator");
        assert_eq!(safe.number_of_versions_retention, Some(5));
        assert_eq!(safe.number_of_days_retention, None);
        assert_eq!(safe.accounts.len(), 2);
        assert_eq!(safe.accounts[0].name, "deploy-key");
        assert_eq!(safe.accounts[1].name, "registry-token");
    }

    #[test]
    fn test_safe_round_trip() {
        let original = sample_safe_json();
        let safe = Safe::from_wire(&original, "Safes.get").unwrap();
        let reserialized = serde_json::to_value(&safe).unwrap();
        assert_eq!(reserialized, original);
    }

    #[test]
    fn test_safe_missing_field_names_key() {
        let mut value = sample_safe_json();
        value.as_object_mut().unwrap().remove("safeName");
        let err = Safe::from_wire(&value, "Safes.get").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingField);
        assert_eq!(err.field(), Some("safeName"));
        assert_eq!(err.endpoint(), Some("Safes.get"));
    }

    #[test]
    fn test_safe_type_mismatch() {
        let mut value = sample_safe_json();
        value["safeNumber"] = json!("forty-two");
        let err = Safe::from_wire(&value, "Safes.list").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
        assert_eq!(err.field(), Some("safeNumber"));
    }

    #[test]
    fn test_safe_nested_creator_error_propagates() {
        let mut value = sample_safe_json();
        value["creator"] = json!({"id": "17"});
        let err = Safe::from_wire(&value, "Safes.get").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingField);
        assert_eq!(err.field(), Some("name"));
    }

    #[test]
    fn test_safe_days_retention() {
        let mut value = sample_safe_json();
        value.as_object_mut().unwrap().remove("numberOfVersionsRetention");
        value["numberOfDaysRetention"] = json!(30);
        let safe = Safe::from_wire(&value, "Safes.get").unwrap();
        assert_eq!(safe.number_of_versions_retention, None);
        assert_eq!(safe.number_of_days_retention, Some(30));
    }

    #[test]
    fn test_safe_accounts_absent_defaults_empty() {
        let mut value = sample_safe_json();
        value.as_object_mut().unwrap().remove("accounts");
        let safe = Safe::from_wire(&value, "Safes.get").unwrap();
        assert!(safe.accounts.is_empty());
    }
}
