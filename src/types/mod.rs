//! Record types returned by the vault, and their wire mappers.
//!
//! Every record is a plain owned value object, constructed fully populated
//! by its `from_wire` mapper from one decoded JSON object. Records carry a
//! `Serialize` implementation emitting the vault's wire casing, so a record
//! mapped from a valid response re-serializes to the same key set.
//!
//! Mapping is strict: a missing required key, a wrong JSON type, or an
//! enum value outside the declared variants fails with an error naming the
//! offending key and the originating endpoint. Optional keys that are
//! absent stay `None`, never an empty default record.

mod application;
mod credential;
pub(crate) mod decode;
mod group;
mod safe;
mod safe_member;
mod user;

pub use application::{
    Application, ApplicationAuthenticationMethod, ApplicationAuthenticationMethodType,
};
pub use credential::Credential;
pub use group::{Group, GroupMember, GroupType};
pub use safe::{Safe, SafeAccount, SafeCreator};
pub use safe_member::{SafeMember, SafeMemberPermissions, SafeMemberType};
pub use user::{
    User, UserAuthenticationMethod, UserBusinessAddress, UserGroupsMembership, UserInterface,
    UserInternet, UserPersonalDetails, UserPhones, UserSource, UserVaultAuthorization,
};

/// Defines a closed wire enum: each variant carries the integer code the
/// original wire format used and the string tag the live service emits.
/// Decoding accepts either form and rejects everything else; serialization
/// emits the string tag.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $code:literal => $tag:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
        }

        impl $name {
            /// The integer code the wire format uses for this variant.
            pub fn code(&self) -> u8 {
                match self { $( Self::$variant => $code, )+ }
            }

            /// The string tag the wire format uses for this variant.
            pub fn as_str(&self) -> &'static str {
                match self { $( Self::$variant => $tag, )+ }
            }

            /// Decodes the wire form (integer code or string tag).
            ///
            /// Unknown codes fail with an unknown-enum-value error naming
            /// `key` and `endpoint`; they are never defaulted.
            pub(crate) fn from_wire(
                value: &serde_json::Value,
                key: &str,
                endpoint: &str,
            ) -> Result<Self, $crate::Error> {
                match value {
                    serde_json::Value::Number(n) => match n.as_i64() {
                        $( Some($code) => Ok(Self::$variant), )+
                        _ => Err($crate::Error::unknown_enum_value(key, n, endpoint)),
                    },
                    serde_json::Value::String(s) => match s.as_str() {
                        $( $tag => Ok(Self::$variant), )+
                        _ => Err($crate::Error::unknown_enum_value(key, s, endpoint)),
                    },
                    _ => Err($crate::Error::type_mismatch(
                        key,
                        "a string or integer code",
                        endpoint,
                    )),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(
                &self,
                serializer: S,
            ) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }
    };
}
pub(crate) use wire_enum;
