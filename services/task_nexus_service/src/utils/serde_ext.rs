//! Deserializers distinguishing "field absent" from "field set to null" in
//! sparse patch payloads.

use serde::{Deserialize, Deserializer};
use time::OffsetDateTime;

/// Wraps the deserialized value in an extra `Some`, so that an absent field
/// (handled by `#[serde(default)]`) stays `None` while an explicit `null`
/// becomes `Some(None)`.
pub(crate) fn double_option<'de, T, D>(
    deserializer: D,
) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Same as [`double_option`], for RFC3339 timestamps.
pub(crate) fn double_option_rfc3339<'de, D>(
    deserializer: D,
) -> Result<Option<Option<OffsetDateTime>>, D::Error>
where
    D: Deserializer<'de>,
{
    time::serde::rfc3339::option::deserialize(deserializer).map(Some)
}
