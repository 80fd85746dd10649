//! Lenient field deserializers.
//!
//! CMS responses vary with population depth and schema drift: relations may
//! be ids or documents, optional fields may be `null`, select fields may hold
//! values this crate does not know. These helpers degrade a bad field to its
//! default instead of failing the whole page.

use serde::Deserialize;
use serde::de::{DeserializeOwned, Deserializer};
use serde_json::Value;

/// Document id given as a string or a number.
pub(crate) fn id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(id) => id,
        Value::Number(id) => id.to_string(),
        _ => String::new(),
    })
}

/// `None` for `null` and for values that do not fit `T`.
pub(crate) fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(convert(value))
}

/// `T::default()` for `null` and for values that do not fit `T`.
pub(crate) fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    lenient(deserializer).map(Option::unwrap_or_default)
}

/// Array items that fit `T`; anything else is dropped.
pub(crate) fn items<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    optional_items(deserializer).map(Option::unwrap_or_default)
}

/// Like [`items`], but keeps the difference between a missing list and an
/// empty one.
pub(crate) fn optional_items<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let Value::Array(values) = Value::deserialize(deserializer)? else {
        return Ok(None);
    };
    Ok(Some(values.into_iter().filter_map(convert).collect()))
}

fn convert<T: DeserializeOwned>(value: Value) -> Option<T> {
    if value.is_null() {
        return None;
    }
    match serde_json::from_value(value) {
        Ok(converted) => Some(converted),
        Err(e) => {
            tracing::debug!(error = %e, "Ignoring malformed CMS field");
            None
        }
    }
}
