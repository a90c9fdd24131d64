//! Endpoint services of the vault REST API.
//!
//! Each service is a thin handle over the shared transport, obtained from
//! the [`Vault`](crate::Vault) facade. Operations build the request URL and
//! body, perform one round trip, and map the response through the record
//! mappers in [`types`](crate::types).

mod authentication;
mod safe_members;
mod safes;
mod users;

pub use authentication::{AuthMethod, Authentication, LogonRequest};
pub use safe_members::{AddSafeMemberRequest, SafeMembers};
pub use safes::{CreateSafeRequest, ListSafesRequest, Safes, UpdateSafeRequest};
pub use users::Users;
