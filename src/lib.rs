//! # cyberpas
//!
//! Typed Rust client for a CyberArk-style PAS vault REST API: safes, safe
//! members, users, authentication, and the separate Central Credential
//! Provider (CCP) retrieval endpoint.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use cyberpas::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), cyberpas::Error> {
//!     // Create the client
//!     let vault = Vault::builder()
//!         .url("https://vault.example.com")
//!         .build()?;
//!
//!     // Log on and install the session token
//!     let response = vault
//!         .authentication()
//!         .logon(LogonRequest::new("Administrator", "s3cr3t"))
//!         .await?;
//!     if let Some(token) = response.as_str() {
//!         vault.set_session_token(token.to_owned());
//!     }
//!
//!     // Work with safes
//!     let safes = vault.safes().list().search("prod").limit(25).await?;
//!     for safe in safes {
//!         println!("{}: {}", safe.safe_url_id, safe.description);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Key Concepts
//!
//! - **Facade hierarchy**: [`Vault`] → endpoint services
//!   ([`Safes`](api::Safes), [`SafeMembers`](api::SafeMembers),
//!   [`Users`](api::Users), [`Authentication`](api::Authentication));
//!   [`CentralCredentialProvider`] → [`Credentials`](ccp::Credentials).
//! - **Strict mapping**: responses decode into fully-populated records or
//!   fail with an error naming the offending key and endpoint; unknown
//!   enum values are rejected, never defaulted.
//! - **One call, one round trip**: no retries, no caching, no token
//!   lifecycle management. The session token is a slot the caller fills.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

// Core modules
pub mod api;
pub mod ccp;
pub mod client;
pub mod error;
pub mod types;
pub mod util;

// Transport layer
pub mod transport;

// Prelude for convenient imports
pub mod prelude;

// Re-export main types at crate root for convenience
pub use ccp::{CentralCredentialProvider, CentralCredentialProviderBuilder};
pub use client::{Vault, VaultBuilder};
pub use error::{Error, ErrorKind, Result};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crate_compiles() {
        // Basic smoke test
        let _ = ErrorKind::Unauthorized;
    }
}
