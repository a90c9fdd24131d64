//! HTTP transport for the vault and CCP endpoints.
//!
//! One request, one round trip: the transport performs no retries, no
//! caching, and no batching. Errors from the wire surface unchanged as
//! [`Error`](crate::Error) values.

mod rest;

pub use rest::RestTransport;
pub(crate) use rest::{decode_body, map_reqwest_error};
