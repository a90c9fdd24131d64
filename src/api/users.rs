//! User management operations.

use std::sync::Arc;

use serde_json::json;

use crate::transport::RestTransport;
use crate::types::decode;
use crate::types::User;
use crate::Error;

/// Client for user management operations.
///
/// Access via `vault.users()`.
///
/// ## Example
///
/// ```rust,ignore
/// let users = vault.users();
///
/// // List users matching a directory filter
/// let list = users.list(Some("userType eq EPVUser")).await?;
///
/// // Unsuspend and re-enable an account
/// users.activate("118").await?;
/// users.enable("118").await?;
/// ```
#[derive(Clone)]
pub struct Users {
    transport: Arc<RestTransport>,
}

impl Users {
    pub(crate) fn new(transport: Arc<RestTransport>) -> Self {
        Self { transport }
    }

    /// Lists vault users, optionally narrowed by a filter expression.
    pub async fn list(&self, filter: Option<&str>) -> Result<Vec<User>, Error> {
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(filter) = filter {
            query.push(("filter", filter.to_owned()));
        }
        let value = self.transport.get("PasswordVault/api/Users", &query).await?;
        let obj = decode::as_object(&value, "Users.list")?;
        User::list_from_wire(obj, "Users.list")
    }

    /// Gets a single user by id.
    pub async fn get(&self, user_id: &str) -> Result<User, Error> {
        let value = self.transport.get(&user_path(user_id, None), &[]).await?;
        User::from_wire(&value, "Users.get")
    }

    /// Activates a user suspended after failed logon attempts.
    pub async fn activate(&self, user_id: &str) -> Result<(), Error> {
        self.transport
            .post(&user_path(user_id, Some("Activate")), None)
            .await?;
        Ok(())
    }

    /// Enables a disabled user account.
    pub async fn enable(&self, user_id: &str) -> Result<(), Error> {
        self.transport
            .post(&user_path(user_id, Some("enable")), None)
            .await?;
        Ok(())
    }

    /// Disables a user account.
    pub async fn disable(&self, user_id: &str) -> Result<(), Error> {
        self.transport
            .post(&user_path(user_id, Some("disable")), None)
            .await?;
        Ok(())
    }

    /// Resets a user's password.
    pub async fn reset_password(&self, user_id: &str, new_password: &str) -> Result<(), Error> {
        let body = json!({
            "id": user_id,
            "newPassword": new_password,
        });
        self.transport
            .post(&user_path(user_id, Some("ResetPassword")), Some(&body))
            .await?;
        Ok(())
    }
}

impl std::fmt::Debug for Users {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Users").finish_non_exhaustive()
    }
}

/// Builds a per-user path, optionally with a sub-resource segment.
///
/// Ids containing a dot get a trailing slash; without it the vault's
/// routing swallows everything after the dot as a file extension.
fn user_path(user_id: &str, suffix: Option<&str>) -> String {
    let mut path = format!(
        "PasswordVault/api/Users/{}",
        urlencoding::encode(user_id)
    );
    if let Some(suffix) = suffix {
        path.push('/');
        path.push_str(suffix);
    }
    if user_id.contains('.') {
        path.push('/');
    }
    path
}
