//! Access control: groups, users, credentials, doors, levels, exception
//! calendars, events and scenarios.

use super::{is_false, nullable};
use crate::error::{Result, VerkadaError};
use crate::validation::{check_one_of, exactly_one, DOOR_STATUSES};
use serde::{Deserialize, Serialize};

crate::query_params! {
    /// Identifies an access user by exactly one of four identifiers
    #[derive(Debug, Clone, Default)]
    pub struct AccessUserRef {
        pub user_id: String => "user_id",
        pub external_id: String => "external_id",
        pub email: String => "email",
        pub employee_id: String => "employee_id",
    }
}

impl AccessUserRef {
    pub fn by_user_id(user_id: impl Into<String>) -> Self {
        AccessUserRef {
            user_id: user_id.into(),
            ..Default::default()
        }
    }

    pub fn by_external_id(external_id: impl Into<String>) -> Self {
        AccessUserRef {
            external_id: external_id.into(),
            ..Default::default()
        }
    }

    pub fn by_email(email: impl Into<String>) -> Self {
        AccessUserRef {
            email: email.into(),
            ..Default::default()
        }
    }

    pub fn by_employee_id(employee_id: impl Into<String>) -> Self {
        AccessUserRef {
            employee_id: employee_id.into(),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        exactly_one(&[
            ("user_id", self.user_id.as_str()),
            ("external_id", self.external_id.as_str()),
            ("email", self.email.as_str()),
            ("employee_id", self.employee_id.as_str()),
        ])
    }
}

crate::query_params! {
    /// Restricts door listings to some doors or some sites, not both
    #[derive(Debug, Clone, Default)]
    pub struct DoorsOptions {
        pub door_ids: Vec<String> => "door_ids",
        pub site_ids: Vec<String> => "site_ids",
    }
}

impl DoorsOptions {
    pub fn validate(&self) -> Result<()> {
        if !self.door_ids.is_empty() && !self.site_ids.is_empty() {
            return Err(VerkadaError::validation(format!(
                "should not use both door_ids and site_ids - received door_ids: {:?} and site_ids: {:?}",
                self.door_ids, self.site_ids
            )));
        }
        Ok(())
    }
}

crate::query_params! {
    #[derive(Debug, Clone, Default)]
    pub struct ExceptionCalendarsOptions {
        pub last_updated_after: Option<i64> => "last_updated_after",
    }
}

crate::query_params! {
    #[derive(Debug, Clone, Default)]
    pub struct AccessEventsOptions {
        pub start_time: Option<i64> => "start_time",
        pub end_time: Option<i64> => "end_time",
        pub page_token: String => "page_token",
        pub page_size: Option<i64> => "page_size",
        pub event_type: Vec<String> => "event_type",
        pub site_id: String => "site_id",
        pub device_id: String => "device_id",
        pub user_id: String => "user_id",
    }
}

crate::query_params! {
    #[derive(Debug, Clone, Default)]
    pub struct ScenariosOptions {
        pub scenario_ids: Vec<String> => "scenario_ids",
        pub site_ids: Vec<String> => "site_ids",
        pub types: Vec<String> => "types",
    }
}

/// Optional fields of a new access card. The card format is passed apart.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CardBody {
    #[serde(skip_serializing_if = "is_false")]
    pub active: bool,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub card_number: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub card_number_base36: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub card_number_hex: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub facility_code: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct LicensePlateBody {
    #[serde(skip_serializing_if = "is_false")]
    pub active: bool,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
}

/// Access level to create or replace
#[derive(Debug, Clone, Default, Serialize)]
pub struct AccessLevelBody {
    pub access_groups: Vec<String>,
    pub access_schedule_events: Vec<ScheduleEventBody>,
    pub doors: Vec<String>,
    pub name: String,
    pub sites: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ScheduleEventBody {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub access_schedule_event_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub door_status: String,
    pub end_time: String,
    pub start_time: String,
    pub weekday: String,
}

/// Doors and exceptions of a calendar. Empty lists are left out.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ExceptionCalendarBody {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub doors: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub exceptions: Vec<DoorException>,
}

impl ExceptionCalendarBody {
    pub fn validate(&self) -> Result<()> {
        self.exceptions.iter().try_for_each(DoorException::validate)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct AccessGroups {
    #[serde(deserialize_with = "nullable")]
    pub access_groups: Vec<AccessGroupMetadata>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct AccessGroupMetadata {
    pub group_id: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct AccessGroup {
    pub group_id: Option<String>,
    pub name: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub user_ids: Vec<String>,
}

/// Outcome of adding a user to a group. The API may also answer `{}`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct AccessGroupAddition {
    pub group_id: Option<String>,
    pub name: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub successful_adds: Vec<String>,
    #[serde(deserialize_with = "nullable")]
    pub unsuccessful_adds: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct AccessUsers {
    #[serde(deserialize_with = "nullable")]
    pub access_members: Vec<AccessUser>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct AccessUser {
    pub company_name: Option<String>,
    pub department: Option<String>,
    pub department_id: Option<String>,
    pub email: Option<String>,
    pub employee_id: Option<String>,
    pub employee_title: Option<String>,
    pub external_id: Option<String>,
    pub full_name: Option<String>,
    pub has_profile_photo: Option<bool>,
    pub profile_photo_last_updated: Option<String>,
    pub user_id: Option<String>,
}

/// Everything access control knows about one user: groups, credentials,
/// validity dates and unlock permissions
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct AccessInformation {
    #[serde(deserialize_with = "nullable")]
    pub access_groups: Vec<AccessGroup>,
    pub ble_unlock: Option<bool>,
    #[serde(deserialize_with = "nullable")]
    pub cards: Vec<Card>,
    pub end_date: Option<String>,
    pub entry_code: Option<String>,
    pub external_id: Option<String>,
    pub has_profile_photo: Option<bool>,
    #[serde(deserialize_with = "nullable")]
    pub license_plates: Vec<LicensePlate>,
    #[serde(deserialize_with = "nullable")]
    pub mfa_codes: Vec<MfaCode>,
    pub profile_photo_last_updated: Option<String>,
    pub remote_unlock: Option<bool>,
    pub start_date: Option<String>,
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct Card {
    pub active: Option<bool>,
    pub card_id: Option<String>,
    pub card_number: Option<String>,
    pub card_number_base36: Option<String>,
    pub card_number_hex: Option<String>,
    pub facility_code: Option<String>,
    #[serde(rename = "type")]
    pub format: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct LicensePlate {
    pub active: Option<bool>,
    pub license_plate_number: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct MfaCode {
    pub code: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct AccessLevels {
    #[serde(deserialize_with = "nullable")]
    pub access_levels: Vec<AccessLevel>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct AccessLevel {
    #[serde(deserialize_with = "nullable")]
    pub access_groups: Vec<String>,
    pub access_level_id: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub access_schedule_events: Vec<AccessScheduleEvent>,
    #[serde(deserialize_with = "nullable")]
    pub doors: Vec<String>,
    pub last_updated_at: Option<i64>,
    pub name: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub sites: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct AccessScheduleEvent {
    pub access_schedule_event_id: Option<String>,
    pub door_status: Option<String>,
    pub end_time: Option<String>,
    pub start_time: Option<String>,
    pub weekday: Option<String>,
}

/// Result of a remote door unlock
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct DoorUnlock {
    pub door_id: Option<String>,
    pub unlock_duration: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct Doors {
    #[serde(deserialize_with = "nullable")]
    pub doors: Vec<Door>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct Door {
    pub acu_id: Option<String>,
    pub acu_name: Option<String>,
    pub door_id: Option<String>,
    pub name: Option<String>,
    pub site: Option<Site>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct Site {
    pub name: Option<String>,
    pub site_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct DoorExceptionCalendars {
    #[serde(deserialize_with = "nullable")]
    pub door_exception_calendars: Vec<DoorExceptionCalendar>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct DoorExceptionCalendar {
    pub door_exception_calendar_id: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub doors: Vec<String>,
    #[serde(deserialize_with = "nullable")]
    pub exceptions: Vec<DoorException>,
    pub last_updated_at: Option<i64>,
    pub name: Option<String>,
}

/// A dated override of a door's schedule.
///
/// Sent as is when creating or updating exceptions, and received back with
/// its identifiers filled in.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct DoorException {
    #[serde(skip_serializing_if = "is_false")]
    pub all_day_default: bool,
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "nullable")]
    pub calendar_id: String,
    #[serde(deserialize_with = "nullable")]
    pub date: String,
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "nullable")]
    pub door_exception_id: String,
    #[serde(deserialize_with = "nullable")]
    pub door_status: String,
    #[serde(skip_serializing_if = "is_false")]
    pub double_badge: bool,
    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "nullable")]
    pub double_badge_group_ids: Vec<String>,
    #[serde(deserialize_with = "nullable")]
    pub end_time: String,
    #[serde(skip_serializing_if = "is_false")]
    pub first_person_in: bool,
    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "nullable")]
    pub first_person_in_group_ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recurrence_rule: Option<RecurrenceRule>,
    #[serde(deserialize_with = "nullable")]
    pub start_time: String,
}

impl DoorException {
    /// Check the combination rules between all-day defaults, door status,
    /// double badge and first person in.
    pub fn validate(&self) -> Result<()> {
        if self.all_day_default {
            if self.door_status != "access_controlled" {
                return Err(VerkadaError::validation(format!(
                    "door_status must be \"access_controlled\" when all_day_default is true - received {}",
                    self.door_status
                )));
            }
            if !self.start_time.is_empty() || !self.end_time.is_empty() {
                return Err(VerkadaError::validation(format!(
                    "start_time and end_time must be empty when all_day_default is true - received start_time: {} and end_time: {}",
                    self.start_time, self.end_time
                )));
            }
            if self.first_person_in || self.double_badge {
                return Err(VerkadaError::validation(
                    "first_person_in and double_badge must be false when all_day_default is true",
                ));
            }
        }

        check_one_of("door_status", &self.door_status, DOOR_STATUSES)?;

        if self.double_badge && self.door_status != "access_controlled" {
            return Err(VerkadaError::validation(format!(
                "door_status must be \"access_controlled\" when double_badge is true - received {}",
                self.door_status
            )));
        }
        if !self.double_badge_group_ids.is_empty() && !self.double_badge {
            return Err(VerkadaError::validation(
                "double_badge must be true if double_badge_group_ids is not empty",
            ));
        }
        if self.first_person_in
            && !matches!(
                self.door_status.as_str(),
                "card_and_code" | "access_controlled" | "unlocked"
            )
        {
            return Err(VerkadaError::validation(format!(
                "door_status must be \"card_and_code\", \"access_controlled\" or \"unlocked\" when first_person_in is true - received {}",
                self.door_status
            )));
        }
        if !self.first_person_in_group_ids.is_empty() && !self.first_person_in {
            return Err(VerkadaError::validation(
                "first_person_in must be true if first_person_in_group_ids is not empty",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct RecurrenceRule {
    #[serde(deserialize_with = "nullable")]
    pub by_day: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub by_month: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub by_month_day: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub by_set_pos: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<i64>,
    #[serde(deserialize_with = "nullable")]
    pub excluded_dates: Vec<String>,
    #[serde(deserialize_with = "nullable")]
    pub frequency: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval: Option<i64>,
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "nullable")]
    pub until: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct AccessEvents {
    #[serde(deserialize_with = "nullable")]
    pub events: Vec<AccessEvent>,
    pub next_page_token: Option<String>,
}

crate::impl_paginated!(AccessEvents, Option<String>, next_page_token, [events]);

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct AccessEvent {
    pub device_id: Option<String>,
    pub device_type: Option<String>,
    pub end_timestamp: Option<String>,
    pub event_id: Option<String>,
    pub event_info: Option<EventInfo>,
    pub event_type: Option<String>,
    pub organization_id: Option<String>,
    pub site_id: Option<String>,
    pub timestamp: Option<String>,
}

/// Event details. Unlike the rest of the API these keys are camelCase.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields, default, rename_all = "camelCase")]
pub struct EventInfo {
    pub accepted: Option<bool>,
    pub aux_input_id: Option<String>,
    pub aux_input_name: Option<String>,
    pub building_id: Option<String>,
    pub building_name: Option<String>,
    pub direction: Option<String>,
    pub door_id: Option<String>,
    pub door_info: Option<DoorInfo>,
    pub entity_id: Option<String>,
    pub entity_name: Option<String>,
    pub entity_type: Option<String>,
    pub event_type: Option<String>,
    pub floor_id: Option<String>,
    pub floor_name: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub floors: Vec<Floor>,
    pub input_value: Option<String>,
    pub lockdown_info: Option<LockdownInfo>,
    pub message: Option<String>,
    pub organization_id: Option<String>,
    pub raw_card: Option<String>,
    pub site_id: Option<String>,
    pub site_name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub user_id: Option<String>,
    pub user_info: Option<EventUser>,
    pub user_name: Option<String>,
    pub uuid: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields, default, rename_all = "camelCase")]
pub struct DoorInfo {
    pub access_controller_id: Option<String>,
    pub access_controller_name: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields, default, rename_all = "camelCase")]
pub struct Floor {
    pub door_id: Option<String>,
    pub floor_id: Option<String>,
    pub uuid: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct LockdownInfo {
    pub action: Option<String>,
    pub lockdown: Option<Lockdown>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields, default, rename_all = "camelCase")]
pub struct Lockdown {
    pub enabled: Option<bool>,
    pub lockdown_id: Option<String>,
    pub message: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields, default, rename_all = "camelCase")]
pub struct EventUser {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub name: Option<String>,
    pub organization_id: Option<String>,
    pub phone: Option<String>,
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct AccessScenarios {
    #[serde(deserialize_with = "nullable")]
    pub scenarios: Vec<AccessScenario>,
}

/// A lockdown or similar scenario that changes door access site-wide
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct AccessScenario {
    #[serde(deserialize_with = "nullable")]
    pub doors_to_lock: Vec<String>,
    pub message: Option<String>,
    pub name: Option<String>,
    pub scenario_id: Option<String>,
    pub site_count: Option<i64>,
    #[serde(deserialize_with = "nullable")]
    pub sites: Vec<String>,
    pub state: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub user_groups_with_disable_access: Vec<String>,
    #[serde(deserialize_with = "nullable")]
    pub user_groups_with_door_access: Vec<String>,
    #[serde(deserialize_with = "nullable")]
    pub user_groups_with_enable_access: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::QueryParams;

    fn exception(door_status: &str) -> DoorException {
        DoorException {
            date: "2025-01-01".to_string(),
            door_status: door_status.to_string(),
            start_time: "08:00".to_string(),
            end_time: "17:00".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_access_user_ref_counts_set_identifiers() {
        assert!(AccessUserRef::by_email("a@b.c").validate().is_ok());
        assert!(AccessUserRef::default().validate().is_err());
        let two = AccessUserRef {
            user_id: "u".to_string(),
            employee_id: "e".to_string(),
            ..Default::default()
        };
        assert!(two.validate().unwrap_err().is_validation());
        assert_eq!(two.to_query(), "user_id=u&employee_id=e");
    }

    #[test]
    fn test_doors_options_exclusive() {
        let options = DoorsOptions {
            door_ids: vec!["d1".to_string(), "d2".to_string()],
            site_ids: vec!["s1".to_string()],
        };
        assert!(options.validate().is_err());
        let options = DoorsOptions {
            site_ids: options.site_ids,
            ..Default::default()
        };
        assert!(options.validate().is_ok());
        assert_eq!(options.to_query(), "site_ids=s1");
    }

    #[test]
    fn test_door_exception_all_day_rules() {
        let mut all_day = DoorException {
            all_day_default: true,
            door_status: "access_controlled".to_string(),
            ..Default::default()
        };
        assert!(all_day.validate().is_ok());

        all_day.door_status = "locked".to_string();
        assert!(all_day.validate().is_err());

        let mut timed = exception("access_controlled");
        timed.all_day_default = true;
        assert!(timed.validate().is_err());
    }

    #[test]
    fn test_door_exception_badge_rules() {
        assert!(exception("open").validate().is_err());

        let mut badge = exception("locked");
        badge.double_badge = true;
        assert!(badge.validate().is_err());
        badge.door_status = "access_controlled".to_string();
        assert!(badge.validate().is_ok());

        let mut groups = exception("access_controlled");
        groups.double_badge_group_ids = vec!["g".to_string()];
        assert!(groups.validate().is_err());

        let mut fpi = exception("locked");
        fpi.first_person_in = true;
        assert!(fpi.validate().is_err());
        fpi.door_status = "unlocked".to_string();
        assert!(fpi.validate().is_ok());

        let mut fpi_groups = exception("unlocked");
        fpi_groups.first_person_in_group_ids = vec!["g".to_string()];
        assert!(fpi_groups.validate().is_err());
    }

    #[test]
    fn test_door_exception_serializes_sparse() {
        let json = serde_json::to_value(exception("locked")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "date": "2025-01-01",
                "door_status": "locked",
                "end_time": "17:00",
                "start_time": "08:00",
            })
        );
    }

    #[test]
    fn test_event_info_is_camel_case() {
        let events: AccessEvents = serde_json::from_str(
            r#"{"events":[{"event_id":"e1","event_info":{"doorId":"d1","userInfo":{"firstName":"Ada"},"type":"door"}}],"next_page_token":null}"#,
        )
        .unwrap();
        let info = events.events[0].event_info.as_ref().unwrap();
        assert_eq!(info.door_id.as_deref(), Some("d1"));
        assert_eq!(info.kind.as_deref(), Some("door"));
        assert_eq!(
            info.user_info.as_ref().unwrap().first_name.as_deref(),
            Some("Ada")
        );
    }
}
