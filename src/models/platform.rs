//! Organization-wide resources: audit logs and users.

use super::nullable;
use crate::error::Result;
use crate::validation::exactly_one;
use serde::{Deserialize, Serialize};

crate::query_params! {
    #[derive(Debug, Clone, Default)]
    pub struct AuditLogOptions {
        pub start_time: Option<i64> => "start_time",
        pub end_time: Option<i64> => "end_time",
        pub use_processed_timestamp: Option<bool> => "use_processed_timestamp",
        pub page_token: String => "page_token",
        pub page_size: Option<i64> => "page_size",
    }
}

crate::query_params! {
    /// Identifies a user by Verkada ID or by external ID, never both
    #[derive(Debug, Clone, Default)]
    pub struct UserRef {
        pub user_id: String => "user_id",
        pub external_id: String => "external_id",
    }
}

impl UserRef {
    pub fn by_user_id(user_id: impl Into<String>) -> Self {
        UserRef {
            user_id: user_id.into(),
            ..Default::default()
        }
    }

    pub fn by_external_id(external_id: impl Into<String>) -> Self {
        UserRef {
            external_id: external_id.into(),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        exactly_one(&[
            ("user_id", self.user_id.as_str()),
            ("external_id", self.external_id.as_str()),
        ])
    }
}

/// Fields of a user to create or update. Empty fields are left out.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UserBody {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub company_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub department: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub department_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub email: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub employee_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub employee_title: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub employee_type: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub external_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub first_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub last_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub middle_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub phone: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct AuditLogs {
    #[serde(deserialize_with = "nullable")]
    pub audit_logs: Vec<AuditLog>,
    pub next_page_token: Option<String>,
}

crate::impl_paginated!(AuditLogs, Option<String>, next_page_token, [audit_logs]);

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct AuditLog {
    pub details: Option<serde_json::Value>,
    #[serde(deserialize_with = "nullable")]
    pub devices: Vec<AuditLogDevice>,
    pub event_description: Option<String>,
    pub event_name: Option<String>,
    pub ip_address: Option<String>,
    pub organization_id: Option<String>,
    pub processed_timestamp: Option<String>,
    pub timestamp: Option<String>,
    pub user_email: Option<String>,
    pub user_id: Option<String>,
    pub user_name: Option<String>,
    pub verkada_support_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct AuditLogDevice {
    pub details: Option<serde_json::Value>,
    pub device_id: Option<String>,
    pub device_name: Option<String>,
    pub device_site_name: Option<String>,
    pub device_type: Option<String>,
}

/// A user as returned by the get, create and update endpoints
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct User {
    pub active: Option<bool>,
    pub company_name: Option<String>,
    pub department: Option<String>,
    pub department_id: Option<String>,
    pub email: Option<String>,
    pub employee_id: Option<String>,
    pub employee_title: Option<String>,
    pub employee_type: Option<String>,
    pub external_id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub middle_name: Option<String>,
    pub phone: Option<String>,
    pub user_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::QueryParams;

    #[test]
    fn test_user_ref_rules() {
        assert!(UserRef::by_user_id("u1").validate().is_ok());
        assert!(UserRef::default().validate().is_err());
        let both = UserRef {
            user_id: "u1".to_string(),
            external_id: "e1".to_string(),
        };
        assert!(both.validate().unwrap_err().is_validation());
        assert_eq!(UserRef::by_external_id("e 1").to_query(), "external_id=e+1");
    }

    #[test]
    fn test_user_body_skips_empty_fields() {
        let body = UserBody {
            first_name: "Ada".to_string(),
            ..Default::default()
        };
        assert_eq!(serde_json::to_string(&body).unwrap(), r#"{"first_name":"Ada"}"#);
    }
}
