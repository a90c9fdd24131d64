//! Safe member records and their wire mappers.

use serde::Serialize;
use serde_json::Value;

use crate::types::decode::{self, bool_or_false, opt_i64, req_bool, req_i64, req_str, WireObject};
use crate::types::wire_enum;
use crate::Error;

wire_enum! {
    /// The type of a safe member.
    SafeMemberType {
        /// A vault or directory user.
        User = 1 => "User",
        /// A vault or directory group.
        Group = 2 => "Group",
    }
}

/// The permissions a member holds on a safe.
///
/// Each flag is independent; the vault omits flags that are not granted on
/// some versions, so absent flags decode to `false`. The default value
/// grants nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SafeMemberPermissions {
    /// Use accounts but not view passwords.
    pub use_accounts: bool,
    /// Retrieve and view accounts in the safe.
    pub retrieve_accounts: bool,
    /// View the accounts list.
    pub list_accounts: bool,
    /// Add accounts in the safe.
    pub add_accounts: bool,
    /// Update existing account content.
    pub update_account_content: bool,
    /// Update existing account properties.
    pub update_account_properties: bool,
    /// Initiate password management operations through the CPM.
    #[serde(rename = "initiateCPMAccountManagementOperations")]
    pub initiate_cpm_account_management_operations: bool,
    /// Specify the password used when the CPM changes the password value.
    pub specify_next_account_content: bool,
    /// Rename existing accounts in the safe.
    pub rename_accounts: bool,
    /// Delete existing passwords in the safe.
    pub delete_accounts: bool,
    /// Unlock accounts locked by other users.
    pub unlock_accounts: bool,
    /// Perform administrative tasks in the safe.
    pub manage_safe: bool,
    /// Add and remove safe members and update their authorizations.
    pub manage_safe_members: bool,
    /// Create a backup of the safe and its contents.
    pub backup_safe: bool,
    /// View account and user activity in the safe.
    pub view_audit_log: bool,
    /// View safe members' permissions.
    pub view_safe_members: bool,
    /// Access the safe without confirmation from authorized users.
    pub access_without_confirmation: bool,
    /// Create folders in the safe.
    pub create_folders: bool,
    /// Delete folders from the safe.
    pub delete_folders: bool,
    /// Move accounts and folders between folders in the safe.
    pub move_accounts_and_folders: bool,
    /// Request authorization level 1.
    pub requests_authorization_level1: bool,
    /// Request authorization level 2.
    pub requests_authorization_level2: bool,
}

impl SafeMemberPermissions {
    pub(crate) fn from_wire(value: &Value, endpoint: &str) -> Result<Self, Error> {
        let obj = decode::as_object(value, endpoint)?;
        Ok(Self {
            use_accounts: bool_or_false(obj, "useAccounts", endpoint)?,
            retrieve_accounts: bool_or_false(obj, "retrieveAccounts", endpoint)?,
            list_accounts: bool_or_false(obj, "listAccounts", endpoint)?,
            add_accounts: bool_or_false(obj, "addAccounts", endpoint)?,
            update_account_content: bool_or_false(obj, "updateAccountContent", endpoint)?,
            update_account_properties: bool_or_false(obj, "updateAccountProperties", endpoint)?,
            initiate_cpm_account_management_operations: bool_or_false(
                obj,
                "initiateCPMAccountManagementOperations",
                endpoint,
            )?,
            specify_next_account_content: bool_or_false(
                obj,
                "specifyNextAccountContent",
                endpoint,
            )?,
            rename_accounts: bool_or_false(obj, "renameAccounts", endpoint)?,
            delete_accounts: bool_or_false(obj, "deleteAccounts", endpoint)?,
            unlock_accounts: bool_or_false(obj, "unlockAccounts", endpoint)?,
            manage_safe: bool_or_false(obj, "manageSafe", endpoint)?,
            manage_safe_members: bool_or_false(obj, "manageSafeMembers", endpoint)?,
            backup_safe: bool_or_false(obj, "backupSafe", endpoint)?,
            view_audit_log: bool_or_false(obj, "viewAuditLog", endpoint)?,
            view_safe_members: bool_or_false(obj, "viewSafeMembers", endpoint)?,
            access_without_confirmation: bool_or_false(
                obj,
                "accessWithoutConfirmation",
                endpoint,
            )?,
            create_folders: bool_or_false(obj, "createFolders", endpoint)?,
            delete_folders: bool_or_false(obj, "deleteFolders", endpoint)?,
            move_accounts_and_folders: bool_or_false(obj, "moveAccountsAndFolders", endpoint)?,
            requests_authorization_level1: bool_or_false(
                obj,
                "requestsAuthorizationLevel1",
                endpoint,
            )?,
            requests_authorization_level2: bool_or_false(
                obj,
                "requestsAuthorizationLevel2",
                endpoint,
            )?,
        })
    }
}

/// A user or group granted a permission set on a safe.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SafeMember {
    /// URL-safe identifier of the safe.
    pub safe_url_id: String,
    /// The safe's display name.
    pub safe_name: String,
    /// Internal safe number.
    pub safe_number: i64,
    /// Internal member id.
    pub member_id: i64,
    /// The member's user or group name.
    pub member_name: String,
    /// Whether the member is a user or a group.
    pub member_type: SafeMemberType,
    /// When the membership expires, seconds since the Unix epoch. `None`
    /// for memberships without an expiration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub membership_expiration_date: Option<i64>,
    /// Whether membership expiration is enabled for this member.
    pub is_expired_membership_enable: bool,
    /// Whether this is one of the vault's predefined users.
    pub is_predefined_user: bool,
    /// Whether the current user can update this member's permissions.
    pub is_read_only: bool,
    /// The member's permissions on the safe.
    pub permissions: SafeMemberPermissions,
}

impl SafeMember {
    /// Maps one vault-shaped JSON object to a `SafeMember`.
    pub fn from_wire(value: &Value, endpoint: &str) -> Result<Self, Error> {
        let obj = decode::as_object(value, endpoint)?;
        Ok(Self {
            safe_url_id: req_str(obj, "safeUrlId", endpoint)?,
            safe_name: req_str(obj, "safeName", endpoint)?,
            safe_number: req_i64(obj, "safeNumber", endpoint)?,
            member_id: req_i64(obj, "memberId", endpoint)?,
            member_name: req_str(obj, "memberName", endpoint)?,
            member_type: SafeMemberType::from_wire(
                decode::required(obj, "memberType", endpoint)?,
                "memberType",
                endpoint,
            )?,
            membership_expiration_date: opt_i64(obj, "membershipExpirationDate", endpoint)?,
            is_expired_membership_enable: req_bool(obj, "isExpiredMembershipEnable", endpoint)?,
            is_predefined_user: req_bool(obj, "isPredefinedUser", endpoint)?,
            is_read_only: req_bool(obj, "isReadOnly", endpoint)?,
            permissions: SafeMemberPermissions::from_wire(
                decode::required(obj, "permissions", endpoint)?,
                endpoint,
            )?,
        })
    }

    pub(crate) fn list_from_wire(obj: &WireObject, endpoint: &str) -> Result<Vec<Self>, Error> {
        decode::req_list(obj, "members", endpoint, |v| Self::from_wire(v, endpoint))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use serde_json::json;

    fn sample_member_json() -> Value {
        json!({
            "safeUrlId": "DevOps",
            "safeName": "DevOps",
            "safeNumber": 42,
            "memberId": 118,
            "memberName": "deploy-bot",
            "memberType": "User",
            "membershipExpirationDate": 1735689600,
            "isExpiredMembershipEnable": true,
            "isPredefinedUser": false,
            "isReadOnly": false,
            "permissions": {
                "useAccounts": true,
                "retrieveAccounts": true,
                "listAccounts": true,
                "addAccounts": false,
                "updateAccountContent": false,
                "updateAccountProperties": false,
                "initiateCPMAccountManagementOperations": false,
                "specifyNextAccountContent": false,
                "renameAccounts": false,
                "deleteAccounts": false,
                "unlockAccounts": false,
                "manageSafe": false,
                "manageSafeMembers": false,
                "backupSafe": false,
                "viewAuditLog": true,
                "viewSafeMembers": false,
                "accessWithoutConfirmation": false,
                "createFolders": false,
                "deleteFolders": false,
                "moveAccountsAndFolders": false,
                "requestsAuthorizationLevel1": false,
                "requestsAuthorizationLevel2": false
            }
        })
    }

    #[test]
    fn test_member_from_wire() {
        let member = SafeMember::from_wire(&sample_member_json(), "SafeMembers.get").unwrap();
        assert_eq!(member.member_name, "deploy-bot");
        assert_eq!(member.member_type, SafeMemberType::User);
        assert_eq!(member.membership_expiration_date, Some(1735689600));
        assert!(member.permissions.use_accounts);
        assert!(member.permissions.view_audit_log);
        assert!(!member.permissions.manage_safe);
    }

    #[test]
    fn test_member_round_trip() {
        let original = sample_member_json();
        let member = SafeMember::from_wire(&original, "SafeMembers.get").unwrap();
        let reserialized = serde_json::to_value(&member).unwrap();
        assert_eq!(reserialized, original);
    }

    #[test]
    fn test_member_type_integer_code() {
        let mut value = sample_member_json();
        value["memberType"] = json!(2);
        let member = SafeMember::from_wire(&value, "SafeMembers.get").unwrap();
        assert_eq!(member.member_type, SafeMemberType::Group);
    }

    #[test]
    fn test_member_type_unknown_value_rejected() {
        let mut value = sample_member_json();
        value["memberType"] = json!("Robot");
        let err = SafeMember::from_wire(&value, "SafeMembers.get").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownEnumValue);
        assert_eq!(err.field(), Some("memberType"));
        assert!(err.to_string().contains("Robot"));
    }

    #[test]
    fn test_member_type_unknown_code_rejected() {
        let mut value = sample_member_json();
        value["memberType"] = json!(7);
        let err = SafeMember::from_wire(&value, "SafeMembers.list").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownEnumValue);
    }

    #[test]
    fn test_absent_permission_flags_default_false() {
        let mut value = sample_member_json();
        value["permissions"] = json!({"useAccounts": true});
        let member = SafeMember::from_wire(&value, "SafeMembers.get").unwrap();
        assert!(member.permissions.use_accounts);
        assert!(!member.permissions.retrieve_accounts);
        assert!(!member.permissions.requests_authorization_level2);
    }

    #[test]
    fn test_null_expiration_is_none() {
        let mut value = sample_member_json();
        value["membershipExpirationDate"] = json!(null);
        let member = SafeMember::from_wire(&value, "SafeMembers.get").unwrap();
        assert_eq!(member.membership_expiration_date, None);
    }

    #[test]
    fn test_member_type_codes() {
        assert_eq!(SafeMemberType::User.code(), 1);
        assert_eq!(SafeMemberType::Group.code(), 2);
        assert_eq!(SafeMemberType::User.to_string(), "User");
    }

    #[test]
    fn test_permissions_default_grants_nothing() {
        let permissions = SafeMemberPermissions::default();
        let value = serde_json::to_value(permissions).unwrap();
        for (key, flag) in value.as_object().unwrap() {
            assert_eq!(flag, &json!(false), "flag {} should default false", key);
        }
    }
}
