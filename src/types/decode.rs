//! Field-extraction helpers shared by the wire mappers.
//!
//! Every helper takes the response key and the originating endpoint so the
//! error produced for a bad response names both. `null` counts as absent
//! for optional fields and as a type mismatch for required ones.

use serde_json::{Map, Value};

use crate::Error;

pub(crate) type WireObject = Map<String, Value>;

/// Requires the value to be a JSON object.
pub(crate) fn as_object<'a>(value: &'a Value, endpoint: &str) -> Result<&'a WireObject, Error> {
    value
        .as_object()
        .ok_or_else(|| Error::type_mismatch("<root>", "an object", endpoint))
}

/// Requires `key` to be present (and non-null) in the object.
pub(crate) fn required<'a>(
    obj: &'a WireObject,
    key: &str,
    endpoint: &str,
) -> Result<&'a Value, Error> {
    match obj.get(key) {
        Some(Value::Null) | None => Err(Error::missing_field(key, endpoint)),
        Some(value) => Ok(value),
    }
}

pub(crate) fn req_str(obj: &WireObject, key: &str, endpoint: &str) -> Result<String, Error> {
    required(obj, key, endpoint)?
        .as_str()
        .map(str::to_owned)
        .ok_or_else(|| Error::type_mismatch(key, "a string", endpoint))
}

pub(crate) fn req_i64(obj: &WireObject, key: &str, endpoint: &str) -> Result<i64, Error> {
    required(obj, key, endpoint)?
        .as_i64()
        .ok_or_else(|| Error::type_mismatch(key, "an integer", endpoint))
}

pub(crate) fn req_bool(obj: &WireObject, key: &str, endpoint: &str) -> Result<bool, Error> {
    required(obj, key, endpoint)?
        .as_bool()
        .ok_or_else(|| Error::type_mismatch(key, "a boolean", endpoint))
}

pub(crate) fn opt_str(
    obj: &WireObject,
    key: &str,
    endpoint: &str,
) -> Result<Option<String>, Error> {
    match obj.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value
            .as_str()
            .map(|s| Some(s.to_owned()))
            .ok_or_else(|| Error::type_mismatch(key, "a string", endpoint)),
    }
}

pub(crate) fn opt_i64(obj: &WireObject, key: &str, endpoint: &str) -> Result<Option<i64>, Error> {
    match obj.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value
            .as_i64()
            .map(Some)
            .ok_or_else(|| Error::type_mismatch(key, "an integer", endpoint)),
    }
}

pub(crate) fn opt_u32(obj: &WireObject, key: &str, endpoint: &str) -> Result<Option<u32>, Error> {
    match opt_i64(obj, key, endpoint)? {
        None => Ok(None),
        Some(n) => u32::try_from(n)
            .map(Some)
            .map_err(|_| Error::type_mismatch(key, "an unsigned integer", endpoint)),
    }
}

pub(crate) fn opt_bool(obj: &WireObject, key: &str, endpoint: &str) -> Result<Option<bool>, Error> {
    match obj.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value
            .as_bool()
            .map(Some)
            .ok_or_else(|| Error::type_mismatch(key, "a boolean", endpoint)),
    }
}

/// Decodes a boolean flag that defaults to `false` when absent.
///
/// Permission objects come back with only the granted flags set on some
/// vault versions; an absent flag means "not granted".
pub(crate) fn bool_or_false(obj: &WireObject, key: &str, endpoint: &str) -> Result<bool, Error> {
    Ok(opt_bool(obj, key, endpoint)?.unwrap_or(false))
}

/// Decodes a required array element-wise in source order.
pub(crate) fn req_list<T>(
    obj: &WireObject,
    key: &str,
    endpoint: &str,
    decode: impl Fn(&Value) -> Result<T, Error>,
) -> Result<Vec<T>, Error> {
    required(obj, key, endpoint)?
        .as_array()
        .ok_or_else(|| Error::type_mismatch(key, "an array", endpoint))?
        .iter()
        .map(decode)
        .collect()
}

/// Decodes an optional array; an absent key yields an empty vector.
pub(crate) fn list_or_empty<T>(
    obj: &WireObject,
    key: &str,
    endpoint: &str,
    decode: impl Fn(&Value) -> Result<T, Error>,
) -> Result<Vec<T>, Error> {
    match obj.get(key) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(value) => value
            .as_array()
            .ok_or_else(|| Error::type_mismatch(key, "an array", endpoint))?
            .iter()
            .map(decode)
            .collect(),
    }
}

/// Decodes an optional array, preserving absence as `None`.
pub(crate) fn opt_list<T>(
    obj: &WireObject,
    key: &str,
    endpoint: &str,
    decode: impl Fn(&Value) -> Result<T, Error>,
) -> Result<Option<Vec<T>>, Error> {
    match obj.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value
            .as_array()
            .ok_or_else(|| Error::type_mismatch(key, "an array", endpoint))?
            .iter()
            .map(decode)
            .collect::<Result<Vec<_>, _>>()
            .map(Some),
    }
}
