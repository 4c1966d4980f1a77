//! Request bodies, query options and response types, one module per API family.
//!
//! Response types reject fields they do not declare so that API changes
//! surface as decode errors instead of silently dropped data. Every field is
//! optional on the wire.

use serde::{Deserialize, Deserializer};

pub mod access;
pub mod alarms;
pub mod camera;
pub mod guest;
pub mod helix;
pub mod platform;
pub mod sensor;
pub mod vx;

/// Response of endpoints that answer with an empty object
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EmptyResponse {}

/// Decode `null` the same way as a missing field
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

pub(crate) fn is_false(value: &bool) -> bool {
    !*value
}
