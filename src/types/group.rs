//! Group records and their wire mappers.

use serde::Serialize;
use serde_json::Value;

use crate::types::decode::{self, req_i64, req_str};
use crate::types::wire_enum;
use crate::Error;

wire_enum! {
    /// Where a group is defined.
    GroupType {
        /// A group defined inside the vault itself.
        Vault = 1 => "Vault",
        /// A group mapped from an external directory.
        Directory = 2 => "Directory",
    }
}

/// A user belonging to a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupMember {
    /// The member's vault user id.
    pub id: i64,
    /// The member's user name.
    #[serde(rename = "UserName")]
    pub user_name: String,
}

impl GroupMember {
    pub(crate) fn from_wire(value: &Value, endpoint: &str) -> Result<Self, Error> {
        let obj = decode::as_object(value, endpoint)?;
        Ok(Self {
            id: req_i64(obj, "id", endpoint)?,
            user_name: req_str(obj, "UserName", endpoint)?,
        })
    }
}

/// A vault or directory group.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    /// The group's vault id.
    pub id: i64,
    /// Whether the group lives in the vault or a directory.
    pub group_type: GroupType,
    /// The group's name.
    #[serde(rename = "groupName")]
    pub group_name: String,
    /// Free-text description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Vault location path of the group.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// The source directory, for directory groups.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directory: Option<String>,
    /// The distinguished name, for directory groups.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dn: Option<String>,
    /// Users belonging to the group, in server order.
    pub members: Vec<GroupMember>,
}

impl Group {
    /// Maps one vault-shaped JSON object to a `Group`.
    pub fn from_wire(value: &Value, endpoint: &str) -> Result<Self, Error> {
        let obj = decode::as_object(value, endpoint)?;
        Ok(Self {
            id: req_i64(obj, "id", endpoint)?,
            group_type: GroupType::from_wire(
                decode::required(obj, "groupType", endpoint)?,
                "groupType",
                endpoint,
            )?,
            group_name: req_str(obj, "groupName", endpoint)?,
            description: decode::opt_str(obj, "description", endpoint)?,
            location: decode::opt_str(obj, "location", endpoint)?,
            directory: decode::opt_str(obj, "directory", endpoint)?,
            dn: decode::opt_str(obj, "dn", endpoint)?,
            members: decode::list_or_empty(obj, "members", endpoint, |v| {
                GroupMember::from_wire(v, endpoint)
            })?,
        })
    }
}
