//! Application records and their authentication methods.

use serde::Serialize;
use serde_json::Value;

use crate::types::decode::{self, opt_str, req_bool, req_i64, req_str};
use crate::types::wire_enum;
use crate::Error;

/// An application identity registered with the vault.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Application {
    /// The unique application id.
    #[serde(rename = "AppID")]
    pub app_id: String,
    /// Whether the application is disabled.
    #[serde(rename = "Disabled")]
    pub disabled: bool,
    /// Daily window start from which access is permitted.
    #[serde(rename = "AccessPermittedFrom", skip_serializing_if = "Option::is_none")]
    pub access_permitted_from: Option<String>,
    /// Daily window end until which access is permitted.
    #[serde(rename = "AccessPermittedTo", skip_serializing_if = "Option::is_none")]
    pub access_permitted_to: Option<String>,
    /// Whether extended authentication restrictions are allowed.
    #[serde(rename = "AllowExtendedAuthenticationRestrictions")]
    pub allow_extended_authentication_restrictions: bool,
    /// Business owner email.
    #[serde(rename = "BusinessOwnerEmail", skip_serializing_if = "Option::is_none")]
    pub business_owner_email: Option<String>,
    /// Business owner first name.
    #[serde(rename = "BusinessOwnerFName", skip_serializing_if = "Option::is_none")]
    pub business_owner_first_name: Option<String>,
    /// Business owner last name.
    #[serde(rename = "BusinessOwnerLName", skip_serializing_if = "Option::is_none")]
    pub business_owner_last_name: Option<String>,
    /// Business owner phone.
    #[serde(rename = "BusinessOwnerPhone", skip_serializing_if = "Option::is_none")]
    pub business_owner_phone: Option<String>,
    /// Free-text description.
    #[serde(rename = "Description", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// When the application expires.
    #[serde(rename = "ExpirationDate", skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<String>,
    /// Vault location path of the application.
    #[serde(rename = "Location", skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl Application {
    /// Maps one vault-shaped JSON object to an `Application`.
    pub fn from_wire(value: &Value, endpoint: &str) -> Result<Self, Error> {
        let obj = decode::as_object(value, endpoint)?;
        Ok(Self {
            app_id: req_str(obj, "AppID", endpoint)?,
            disabled: req_bool(obj, "Disabled", endpoint)?,
            access_permitted_from: opt_str(obj, "AccessPermittedFrom", endpoint)?,
            access_permitted_to: opt_str(obj, "AccessPermittedTo", endpoint)?,
            allow_extended_authentication_restrictions: req_bool(
                obj,
                "AllowExtendedAuthenticationRestrictions",
                endpoint,
            )?,
            business_owner_email: opt_str(obj, "BusinessOwnerEmail", endpoint)?,
            business_owner_first_name: opt_str(obj, "BusinessOwnerFName", endpoint)?,
            business_owner_last_name: opt_str(obj, "BusinessOwnerLName", endpoint)?,
            business_owner_phone: opt_str(obj, "BusinessOwnerPhone", endpoint)?,
            description: opt_str(obj, "Description", endpoint)?,
            expiration_date: opt_str(obj, "ExpirationDate", endpoint)?,
            location: opt_str(obj, "Location", endpoint)?,
        })
    }
}

wire_enum! {
    /// The kind of authentication an application method checks.
    ///
    /// Tags keep the vault's lowercase spelling.
    ApplicationAuthenticationMethodType {
        /// The calling machine's address.
        MachineAddress = 1 => "machineAddress",
        /// The calling OS user.
        OsUser = 2 => "osUser",
        /// The calling executable's path.
        Path = 3 => "path",
        /// The calling executable's hash.
        HashValue = 4 => "hashValue",
        /// A client certificate attribute.
        CertificateAttr = 5 => "certificateattr",
    }
}

/// One authentication method configured for an application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplicationAuthenticationMethod {
    /// The owning application id.
    #[serde(rename = "AppID")]
    pub app_id: String,
    /// The kind of check this method performs.
    #[serde(rename = "AuthType")]
    pub auth_type: ApplicationAuthenticationMethodType,
    /// The value checked, for value-based methods.
    #[serde(rename = "AuthValue", skip_serializing_if = "Option::is_none")]
    pub auth_value: Option<String>,
    /// Free-text comment.
    #[serde(rename = "Comment", skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Whether a path value names a folder rather than a file.
    #[serde(rename = "IsFolder")]
    pub is_folder: bool,
    /// The method's id within the application.
    #[serde(rename = "authId")]
    pub auth_id: i64,
    /// Whether internal scripts may authenticate through a path method.
    #[serde(rename = "AllowInternalScripts")]
    pub allow_internal_scripts: bool,
    /// Certificate subject, for certificate methods.
    #[serde(rename = "Subject", skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    /// Certificate issuer, for certificate methods.
    #[serde(rename = "Issuer", skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,
    /// Certificate subject alternative name, for certificate methods.
    #[serde(rename = "SubjectAlternativeName", skip_serializing_if = "Option::is_none")]
    pub subject_alternative_name: Option<String>,
}

impl ApplicationAuthenticationMethod {
    /// Maps one vault-shaped JSON object to an authentication method.
    pub fn from_wire(value: &Value, endpoint: &str) -> Result<Self, Error> {
        let obj = decode::as_object(value, endpoint)?;
        Ok(Self {
            app_id: req_str(obj, "AppID", endpoint)?,
            auth_type: ApplicationAuthenticationMethodType::from_wire(
                decode::required(obj, "AuthType", endpoint)?,
                "AuthType",
                endpoint,
            )?,
            auth_value: opt_str(obj, "AuthValue", endpoint)?,
            comment: opt_str(obj, "Comment", endpoint)?,
            is_folder: decode::bool_or_false(obj, "IsFolder", endpoint)?,
            auth_id: req_i64(obj, "authId", endpoint)?,
            allow_internal_scripts: decode::bool_or_false(obj, "AllowInternalScripts", endpoint)?,
            subject: opt_str(obj, "Subject", endpoint)?,
            issuer: opt_str(obj, "Issuer", endpoint)?,
            subject_alternative_name: opt_str(obj, "SubjectAlternativeName", endpoint)?,
        })
    }
}
