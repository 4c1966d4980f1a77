//! Helix video tagging: custom events attached to camera footage, and the
//! event types describing their attributes.

use super::{is_false, nullable};
use crate::error::{Result, VerkadaError};
use crate::validation::{check_one_of, HELIX_DATA_TYPES};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Attribute values of a Helix event, keyed by schema field
pub type Attributes = serde_json::Map<String, serde_json::Value>;

/// Schema of an event type: field name to data type
/// (`string`, `integer`, `float` or `boolean`)
pub type EventSchema = BTreeMap<String, String>;

pub(crate) fn check_schema(schema: &EventSchema) -> Result<()> {
    for (key, data_type) in schema {
        check_one_of(&format!("type of field {}", key), data_type, HELIX_DATA_TYPES)?;
    }
    Ok(())
}

crate::query_params! {
    /// Filter for event type listings: by UID or by name, not both
    #[derive(Debug, Clone, Default)]
    pub struct EventTypesOptions {
        pub event_type_uid: String => "event_type_uid",
        pub name: String => "name",
    }
}

impl EventTypesOptions {
    pub fn validate(&self) -> Result<()> {
        if !self.event_type_uid.is_empty() && !self.name.is_empty() {
            return Err(VerkadaError::validation(format!(
                "should not filter by both uid and name - received uid {} and name {}",
                self.event_type_uid, self.name
            )));
        }
        Ok(())
    }
}

/// Attributes and flag of an event to create or update
#[derive(Debug, Clone, Default, Serialize)]
pub struct HelixEventBody {
    #[serde(skip_serializing_if = "serde_json::Map::is_empty")]
    pub attributes: Attributes,
    #[serde(skip_serializing_if = "is_false")]
    pub flagged: bool,
}

impl HelixEventBody {
    /// Set one attribute
    pub fn attribute(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct AttributeFilter {
    pub attribute_key: String,
    pub attribute_value: String,
    pub op: String,
}

/// Search criteria. Unset criteria are left out.
#[derive(Debug, Clone, Default, Serialize)]
pub struct HelixSearch {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attribute_filters: Vec<AttributeFilter>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub camera_ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time_ms: Option<i64>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub event_type_uid: String,
    #[serde(skip_serializing_if = "is_false")]
    pub flagged: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time_ms: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct HelixEvent {
    pub attributes: Option<serde_json::Value>,
    pub camera_id: Option<String>,
    pub event_type_uid: Option<String>,
    pub flagged: Option<bool>,
    pub org_id: Option<String>,
    pub time_ms: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct HelixEventTypes {
    #[serde(deserialize_with = "nullable")]
    pub event_types: Vec<HelixEventType>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct HelixEventType {
    pub event_schema: Option<serde_json::Value>,
    pub event_type_uid: Option<String>,
    pub name: Option<String>,
    pub org_id: Option<String>,
}
