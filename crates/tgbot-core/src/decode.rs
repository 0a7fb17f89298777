//! Lenient field decoding shared by every entity.
//!
//! Telegram omits most fields depending on the message kind, and sometimes
//! sends an explicit `null`. Both collapse to the field's default; only a value
//! of the wrong JSON type is an error.

use serde::{de::DeserializeOwned, Deserialize, Deserializer};
use serde_json::Value;

use crate::Result;

/// `null` or absent (with `#[serde(default)]`) becomes `T::default()`.
pub(crate) fn null_default<'de, D, T>(de: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(de)?.unwrap_or_default())
}

/// Chat ids may exceed 2^53, so they are kept as their decimal string.
pub(crate) fn id_as_string<'de, D>(de: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error as _;

    match Option::<Value>::deserialize(de)? {
        None => Ok(None),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(other) => Err(D::Error::custom(format!(
            "expected integer or string id, got {other}"
        ))),
    }
}

/// Decode an entity from an already-parsed JSON value.
pub(crate) fn from_value<T: DeserializeOwned>(value: &Value) -> Result<T> {
    Ok(T::deserialize(value)?)
}
