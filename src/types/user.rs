//! User records and their wire mappers.

use serde::Serialize;
use serde_json::Value;

use crate::types::decode::{self, opt_bool, opt_i64, opt_str, req_bool, req_i64, req_str};
use crate::types::group::GroupType;
use crate::types::wire_enum;
use crate::Error;

wire_enum! {
    /// Where a user account is defined.
    UserSource {
        /// A user defined inside the vault itself.
        CyberArk = 1 => "CyberArk",
        /// A user mapped from an LDAP directory.
        Ldap = 2 => "LDAP",
    }
}

wire_enum! {
    /// An authentication method available to a user.
    UserAuthenticationMethod {
        /// Vault password authentication.
        Password = 1 => "AuthTypePass",
        /// RADIUS authentication.
        Radius = 2 => "AuthTypeRadius",
        /// LDAP authentication.
        Ldap = 3 => "AuthTypeLDAP",
    }
}

wire_enum! {
    /// An interface a user is authorized to connect through.
    ///
    /// The tag set mirrors the vault's interface identifiers verbatim,
    /// including the distinct `PIMSU` and `PIMSu` entries.
    #[allow(missing_docs, clippy::upper_case_acronyms)]
    UserInterface {
        AIMApp = 1 => "AIMApp",
        AppPrv = 2 => "AppPrv",
        CPM = 3 => "CPM",
        EVD = 4 => "EVD",
        GUI = 5 => "GUI",
        HTTPGW = 6 => "HTTPGW",
        NAPI = 7 => "NAPI",
        PACLI = 8 => "PACLI",
        PAPI = 9 => "PAPI",
        PIMSU = 10 => "PIMSU",
        PIMSu = 11 => "PIMSu",
        PSM = 12 => "PSM",
        PSMP = 13 => "PSMP",
        PSMApp = 14 => "PSMApp",
        PSMPApp = 15 => "PSMPApp",
        PTA = 16 => "PTA",
        PVWA = 17 => "PVWA",
        PVWAApp = 18 => "PVWAApp",
        XAPI = 19 => "XAPI",
        WINCLIENT = 20 => "WINCLIENT",
    }
}

wire_enum! {
    /// A vault-level permission held by a user.
    #[allow(missing_docs)]
    UserVaultAuthorization {
        AddSafes = 1 => "AddSafes",
        AuditUsers = 2 => "AuditUsers",
        AddUpdateUsers = 3 => "AddUpdateUsers",
        ResetUsersPasswords = 4 => "ResetUsersPasswords",
        ActivateUsers = 5 => "ActivateUsers",
        AddNetworkAreas = 6 => "AddNetworkAreas",
        ManageDirectoryMapping = 7 => "ManageDirectoryMapping",
        ManageServerFileCategories = 8 => "ManageServerFileCategories",
        BackupAllSafes = 9 => "BackupAllSafes",
        RestoreAllSafes = 10 => "RestoreAllSafes",
    }
}

/// A user's personal details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPersonalDetails {
    /// First name.
    pub first_name: String,
    /// Middle name.
    pub middle_name: String,
    /// Last name.
    pub last_name: String,
    /// Street address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    /// City.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// State.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// Zip code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
    /// Country.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// Job title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Organization.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    /// Department.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    /// Profession.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profession: Option<String>,
}

impl UserPersonalDetails {
    pub(crate) fn from_wire(value: &Value, endpoint: &str) -> Result<Self, Error> {
        let obj = decode::as_object(value, endpoint)?;
        Ok(Self {
            first_name: req_str(obj, "firstName", endpoint)?,
            middle_name: req_str(obj, "middleName", endpoint)?,
            last_name: req_str(obj, "lastName", endpoint)?,
            street: opt_str(obj, "street", endpoint)?,
            city: opt_str(obj, "city", endpoint)?,
            state: opt_str(obj, "state", endpoint)?,
            zip: opt_str(obj, "zip", endpoint)?,
            country: opt_str(obj, "country", endpoint)?,
            title: opt_str(obj, "title", endpoint)?,
            organization: opt_str(obj, "organization", endpoint)?,
            department: opt_str(obj, "department", endpoint)?,
            profession: opt_str(obj, "profession", endpoint)?,
        })
    }
}

/// A user's business address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserBusinessAddress {
    /// Work street address.
    pub work_street: String,
    /// Work city.
    pub work_city: String,
    /// Work state.
    pub work_state: String,
    /// Work zip code.
    pub work_zip: String,
    /// Work country.
    pub work_country: String,
}

impl UserBusinessAddress {
    pub(crate) fn from_wire(value: &Value, endpoint: &str) -> Result<Self, Error> {
        let obj = decode::as_object(value, endpoint)?;
        Ok(Self {
            work_street: req_str(obj, "workStreet", endpoint)?,
            work_city: req_str(obj, "workCity", endpoint)?,
            work_state: req_str(obj, "workState", endpoint)?,
            work_zip: req_str(obj, "workZip", endpoint)?,
            work_country: req_str(obj, "workCountry", endpoint)?,
        })
    }
}

/// A user's internet presence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInternet {
    /// Home page URL.
    pub home_page: String,
    /// Home email address.
    pub home_email: String,
    /// Business email address.
    pub business_email: String,
    /// Other email address.
    pub other_email: String,
}

impl UserInternet {
    pub(crate) fn from_wire(value: &Value, endpoint: &str) -> Result<Self, Error> {
        let obj = decode::as_object(value, endpoint)?;
        Ok(Self {
            home_page: req_str(obj, "homePage", endpoint)?,
            home_email: req_str(obj, "homeEmail", endpoint)?,
            business_email: req_str(obj, "businessEmail", endpoint)?,
            other_email: req_str(obj, "otherEmail", endpoint)?,
        })
    }
}

/// A user's phone numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPhones {
    /// Home number.
    pub home_number: String,
    /// Business number.
    pub business_number: String,
    /// Cellular number.
    pub cellular_number: String,
    /// Fax number.
    pub fax_number: String,
    /// Pager number.
    pub pager_number: String,
}

impl UserPhones {
    pub(crate) fn from_wire(value: &Value, endpoint: &str) -> Result<Self, Error> {
        let obj = decode::as_object(value, endpoint)?;
        Ok(Self {
            home_number: req_str(obj, "homeNumber", endpoint)?,
            business_number: req_str(obj, "businessNumber", endpoint)?,
            cellular_number: req_str(obj, "cellularNumber", endpoint)?,
            fax_number: req_str(obj, "faxNumber", endpoint)?,
            pager_number: req_str(obj, "pagerNumber", endpoint)?,
        })
    }
}

/// A group a user belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserGroupsMembership {
    /// The group's vault id.
    #[serde(rename = "groupID")]
    pub group_id: i64,
    /// The group's name.
    #[serde(rename = "groupName")]
    pub group_name: String,
    /// Whether the group lives in the vault or a directory.
    #[serde(rename = "groupType")]
    pub group_type: GroupType,
}

impl UserGroupsMembership {
    pub(crate) fn from_wire(value: &Value, endpoint: &str) -> Result<Self, Error> {
        let obj = decode::as_object(value, endpoint)?;
        Ok(Self {
            group_id: req_i64(obj, "groupID", endpoint)?,
            group_name: req_str(obj, "groupName", endpoint)?,
            group_type: GroupType::from_wire(
                decode::required(obj, "groupType", endpoint)?,
                "groupType",
                endpoint,
            )?,
        })
    }
}

/// A vault user with their properties.
///
/// The vault returns the optional detail blocks (`personal_details`,
/// `business_address`, `internet`, `phones`) only on single-user reads
/// requested with extended details; list responses omit them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// The user's vault id.
    pub id: i64,
    /// The user name.
    pub username: String,
    /// Where the user account is defined.
    pub source: UserSource,
    /// The user type, as configured in the vault license.
    pub user_type: String,
    /// Whether this is a component user rather than a person.
    pub component_user: bool,
    /// Vault-level permissions held by the user. Empty when the response
    /// carries none.
    pub vault_authorization: Vec<UserVaultAuthorization>,
    /// Vault location path of the user.
    pub location: String,
    /// Whether the user account is enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_user: Option<bool>,
    /// Whether the user must change their password at next logon.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change_pass_on_next_logon: Option<bool>,
    /// Account expiry, seconds since the Unix epoch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<i64>,
    /// Whether the account is suspended after failed logons.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suspended: Option<bool>,
    /// Last successful logon, seconds since the Unix epoch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_successful_login_date: Option<i64>,
    /// Interfaces the user is authorized to connect through.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authorized_interfaces: Option<Vec<UserInterface>>,
    /// Authentication methods available to the user.
    #[serde(rename = "authenticationMethod", skip_serializing_if = "Option::is_none")]
    pub authentication_methods: Option<Vec<UserAuthenticationMethod>>,
    /// Whether the password is exempt from expiry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_never_expires: Option<bool>,
    /// The distinguished name, for directory users.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distinguished_name: Option<String>,
    /// Free-text description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Business address details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_address: Option<UserBusinessAddress>,
    /// Internet presence details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub internet: Option<UserInternet>,
    /// Phone numbers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phones: Option<UserPhones>,
    /// Personal details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub personal_details: Option<UserPersonalDetails>,
    /// Groups the user is a member of. Empty when the response carries
    /// none.
    pub groups_membership: Vec<UserGroupsMembership>,
    /// The user's distinguished name in the vault's own directory view.
    #[serde(rename = "userDN", skip_serializing_if = "Option::is_none")]
    pub user_dn: Option<String>,
}

impl User {
    /// Maps one vault-shaped JSON object to a `User`.
    pub fn from_wire(value: &Value, endpoint: &str) -> Result<Self, Error> {
        let obj = decode::as_object(value, endpoint)?;
        Ok(Self {
            id: req_i64(obj, "id", endpoint)?,
            username: req_str(obj, "username", endpoint)?,
            source: UserSource::from_wire(
                decode::required(obj, "source", endpoint)?,
                "source",
                endpoint,
            )?,
            user_type: req_str(obj, "userType", endpoint)?,
            component_user: req_bool(obj, "componentUser", endpoint)?,
            vault_authorization: decode::list_or_empty(obj, "vaultAuthorization", endpoint, |v| {
                UserVaultAuthorization::from_wire(v, "vaultAuthorization", endpoint)
            })?,
            location: req_str(obj, "location", endpoint)?,
            enable_user: opt_bool(obj, "enableUser", endpoint)?,
            change_pass_on_next_logon: opt_bool(obj, "changePassOnNextLogon", endpoint)?,
            expiry_date: opt_i64(obj, "expiryDate", endpoint)?,
            suspended: opt_bool(obj, "suspended", endpoint)?,
            last_successful_login_date: opt_i64(obj, "lastSuccessfulLoginDate", endpoint)?,
            authorized_interfaces: decode::opt_list(obj, "authorizedInterfaces", endpoint, |v| {
                UserInterface::from_wire(v, "authorizedInterfaces", endpoint)
            })?,
            authentication_methods: decode::opt_list(obj, "authenticationMethod", endpoint, |v| {
                UserAuthenticationMethod::from_wire(v, "authenticationMethod", endpoint)
            })?,
            password_never_expires: opt_bool(obj, "passwordNeverExpires", endpoint)?,
            distinguished_name: opt_str(obj, "distinguishedName", endpoint)?,
            description: opt_str(obj, "description", endpoint)?,
            business_address: match obj.get("businessAddress") {
                None | Some(Value::Null) => None,
                Some(v) => Some(UserBusinessAddress::from_wire(v, endpoint)?),
            },
            internet: match obj.get("internet") {
                None | Some(Value::Null) => None,
                Some(v) => Some(UserInternet::from_wire(v, endpoint)?),
            },
            phones: match obj.get("phones") {
                None | Some(Value::Null) => None,
                Some(v) => Some(UserPhones::from_wire(v, endpoint)?),
            },
            personal_details: match obj.get("personalDetails") {
                None | Some(Value::Null) => None,
                Some(v) => Some(UserPersonalDetails::from_wire(v, endpoint)?),
            },
            groups_membership: decode::list_or_empty(obj, "groupsMembership", endpoint, |v| {
                UserGroupsMembership::from_wire(v, endpoint)
            })?,
            user_dn: opt_str(obj, "userDN", endpoint)?,
        })
    }

    pub(crate) fn list_from_wire(
        obj: &decode::WireObject,
        endpoint: &str,
    ) -> Result<Vec<Self>, Error> {
        decode::req_list(obj, "users", endpoint, |v| Self::from_wire(v, endpoint))
    }
}
