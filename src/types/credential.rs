//! Credential records returned by the Central Credential Provider.

use serde::Serialize;
use serde_json::Value;

use crate::types::decode::{self, opt_bool, opt_str, req_str};
use crate::Error;

/// A credential retrieved from the Central Credential Provider.
///
/// Only the password content is guaranteed; the remaining properties
/// depend on the account's platform and may be absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Credential {
    /// The password or key content.
    #[serde(rename = "Content")]
    pub content: String,
    /// The account's user name.
    #[serde(rename = "UserName", skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    /// The account's target address.
    #[serde(rename = "Address", skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// The account's target database.
    #[serde(rename = "Database", skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
    /// Whether the CPM is currently changing this password.
    #[serde(rename = "PasswordChangeInProcess", skip_serializing_if = "Option::is_none")]
    pub password_change_in_process: Option<bool>,
}

impl Credential {
    /// Maps one provider-shaped JSON object to a `Credential`.
    pub fn from_wire(value: &Value, endpoint: &str) -> Result<Self, Error> {
        let obj = decode::as_object(value, endpoint)?;
        Ok(Self {
            content: req_str(obj, "Content", endpoint)?,
            user_name: opt_str(obj, "UserName", endpoint)?,
            address: opt_str(obj, "Address", endpoint)?,
            database: opt_str(obj, "Database", endpoint)?,
            password_change_in_process: opt_bool(obj, "PasswordChangeInProcess", endpoint)?,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use serde_json::json;

    #[test]
    fn test_credential_from_wire() {
        let value = json!({
            "Content": "s3cr3t",
            "UserName": "svc-deploy",
            "Address": "db01.example.com",
            "Database": "orders",
            "PasswordChangeInProcess": false
        });
        let credential = Credential::from_wire(&value, "Credentials.get").unwrap();
        assert_eq!(credential.content, "s3cr3t");
        assert_eq!(credential.user_name.as_deref(), Some("svc-deploy"));
        assert_eq!(credential.password_change_in_process, Some(false));
        assert_eq!(serde_json::to_value(&credential).unwrap(), value);
    }

    #[test]
    fn test_content_only() {
        let value = json!({"Content": "hunter2"});
        let credential = Credential::from_wire(&value, "Credentials.get").unwrap();
        assert_eq!(credential.user_name, None);
        assert_eq!(credential.address, None);
        assert_eq!(serde_json::to_value(&credential).unwrap(), value);
    }

    #[test]
    fn test_missing_content_rejected() {
        let value = json!({"UserName": "svc-deploy"});
        let err = Credential::from_wire(&value, "Credentials.get").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingField);
        assert_eq!(err.field(), Some("Content"));
    }
}
