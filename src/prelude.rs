//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types for easy importing:
//!
//! ```rust
//! use cyberpas::prelude::*;
//! ```

pub use crate::{
    api::{
        AddSafeMemberRequest, AuthMethod, Authentication, CreateSafeRequest, LogonRequest,
        SafeMembers, Safes, UpdateSafeRequest, Users,
    },
    ccp::{
        CentralCredentialProvider, ClientCertificate, Credentials, GetCredentialRequest,
    },
    client::{Vault, VaultBuilder},
    error::{Error, ErrorKind, Result},
    types::{
        Credential, Safe, SafeMember, SafeMemberPermissions, SafeMemberType, User, UserSource,
    },
};
