//! Input rules checked before any request is sent.

use crate::error::{Result, VerkadaError};

/// Accepted `notification_type` values for camera alerts
pub const NOTIFICATION_TYPES: &[&str] = &[
    "person_of_interest",
    "license_plate_of_interest",
    "tamper",
    "crowd",
    "motion",
    "camera_offline",
    "camera_online",
    "line_crossing",
    "loitering",
];

/// Accepted `fields` values for sensor alerts and sensor data
pub const SENSOR_FIELDS: &[&str] = &[
    "humidity",
    "motion",
    "noise_level",
    "pm_2_5",
    "pm_4_0",
    "pm_1_0_0",
    "tamper",
    "temperature",
    "tvoc",
    "usa_air_quality_index",
    "vape_index",
    "carbon_dioxide",
    "carbon_monoxide",
    "barometric_pressure",
    "formaldehyde",
    "ambient_light",
    "tvoc_index",
    "heat_index",
];

/// Occupancy trend aggregation intervals. Empty lets the API pick.
pub const OT_INTERVALS: &[&str] = &[
    "", "15_minutes", "1_hour", "6_hours", "12_hours", "1_day", "30_days",
];

pub const THUMBNAIL_RESOLUTIONS: &[&str] = &["", "low-res", "hi-res"];

pub const STREAM_RESOLUTIONS: &[&str] = &["", "low_res", "high_res"];

pub const VIDEO_QUALITIES: &[&str] = &["STANDARD_QUALITY", "HIGH_QUALITY"];

pub const VIDEO_TO_UPLOAD: &[&str] = &["MOTION", "ALL"];

/// Card formats accepted when adding a card credential
pub const CARD_FORMATS: &[&str] = &[
    "Standard 26-bit Wiegand",
    "HID",
    "HID 37-bit",
    "HID37wFacilityCode",
    "HID 37-bit No Facility Code",
    "HID37woFacilityCode",
    "HID 34-bit",
    "HID34",
    "Casi Rusco 40-Bit",
    "CasiRusco",
    "HID Corporate 1000-35",
    "Corporate1000_35",
    "HID Corporate 1000-48",
    "Corporate1000_48",
    "HID iClass",
    "iClass",
    "DESFire CSN",
    "DESFire",
    "Verkada DESFire",
    "VerkadaDESFire",
    "DESFire 40X",
    "MiFareClassic1K_CSN",
    "MiFareClassic4K_CSN",
    "Apple Wallet Pass",
    "MiFare 4-Byte (32 bit) CSN",
    "MDC Custom 64-bit",
    "MDCCustom_64",
    "HID 36-bit Keyscan",
    "HID36Keyscan",
    "HID 33-bit DSX",
    "HID33DSX",
    "HID 33-bit RS2",
    "HID33RS2",
    "HID 36-bit Simplex",
    "HID36Simplex",
    "Cansec 37-bit",
    "Cansec37",
    "Credit Card BIN Number",
    "CreditCardBin",
    "Kantech XSF",
    "KantechXSF",
    "Schlage 34-bit",
    "Schlage34",
    "Schlage 37-bit",
    "Schlage37x",
    "RBH 50-bit",
    "RBH50",
    "Guardall G-Prox II 36-bit",
    "GProxII36",
    "AMAG 32-bit",
    "AMAG32",
    "Securitas 37-bit",
    "Securitas37",
    "Kastle 32-bit",
    "Kastle32",
    "PointGuard MDI 37-bit",
    "PointGuardMDI37",
    "Blackboard 64-bit",
    "Blackboard64",
    "IDm 64-bit",
    "IDm64bit",
    "Continental 36-bit",
    "Continental36",
    "AWID 34-bit",
    "AWID34",
    "License Plate",
    "HID Infinity 37-bit",
    "HIDInfinity37",
    "HID Ceridian 26-bit",
    "iClass 35-bit",
    "Andover Controls 37-bit",
];

/// Two-letter weekday codes used by access schedule events
pub const WEEKDAYS: &[&str] = &["SU", "MO", "TU", "WE", "TH", "FR", "SA"];

/// Door states for exception calendar entries. Empty means unset.
pub const DOOR_STATUSES: &[&str] = &["", "locked", "card_and_code", "access_controlled", "unlocked"];

/// Accepted `event_type` values for access events
pub const ACCESS_EVENT_TYPES: &[&str] = &[
    "door_opened",
    "door_rejected",
    "door_granted",
    "door_forced_open",
    "door_held_open",
    "door_tailgating",
    "door_crowd_detection",
    "door_tamper",
    "door_poi_detection",
    "door_initialized",
    "door_armed",
    "door_armed_button_pressed",
    "door_aux_unlock",
    "door_locked",
    "door_unlocked",
    "door_unarmed_event",
    "door_code_entered_event",
    "door_button_press_entered_event",
    "door_lock_state_changed",
    "door_lockdown",
    "door_auxinput_change_state",
    "door_auxinput_held",
    "door_low_battery",
    "door_critical_battery",
    "door_mobile_nfc_scan_accepted",
    "door_mobile_nfc_scan_rejected",
    "door_user_database_corrupt",
    "door_keycard_entered_accepted",
    "door_keycard_entered_rejected",
    "door_code_entered_accepted",
    "door_code_entered_rejected",
    "door_remote_unlock_accepted",
    "door_remote_unlock_rejected",
    "door_press_to_exit_accepted",
    "door_ble_unlock_attempt_accepted",
    "door_ble_unlock_attempt_rejected",
    "door_acu_offline",
    "door_fire_alarm_triggered",
    "door_fire_alarm_released",
    "door_acu_fire_alarm_triggered",
    "door_acu_fire_alarm_released",
    "door_schedule_toggle",
    "door_acu_dpi_cut",
    "door_acu_dpi_short",
    "door_acu_rex_cut",
    "door_acu_rex_short",
    "door_acu_rex2_cut",
    "door_acu_rex2_short",
    "door_acu_auxinput_cut",
    "door_acu_auxinput_short",
    "door_lockdown_debounced",
    "door_lp_presented_accepted",
    "door_lp_presented_rejected",
    "door_apb_double_entry",
    "door_apb_double_exit",
    "all_access_granted",
    "all_access_rejected",
    "door_auxoutput_activated",
    "door_auxoutput_deactivated",
    "door_schedule_override_applied",
    "door_schedule_override_removed",
];

/// Field types allowed in a Helix event type schema
pub const HELIX_DATA_TYPES: &[&str] = &["string", "integer", "float", "boolean"];

/// Check an optional page size against an inclusive upper bound
pub fn check_page_size(page_size: Option<i64>, max: i64) -> Result<()> {
    match page_size {
        Some(size) if !(1..=max).contains(&size) => Err(VerkadaError::validation(format!(
            "parameter page_size ({}) is not between 1 and {}",
            size, max
        ))),
        _ => Ok(()),
    }
}

/// Check that `value` belongs to `allowed`
pub fn check_one_of(name: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if allowed.contains(&value) {
        Ok(())
    } else {
        Err(VerkadaError::validation(format!(
            "could not validate {}: {}",
            name, value
        )))
    }
}

/// Check that every element of `values` belongs to `allowed`
pub fn check_all_in<S: AsRef<str>>(name: &str, values: &[S], allowed: &[&str]) -> Result<()> {
    for value in values {
        check_one_of(&format!("parameter in {}", name), value.as_ref(), allowed)?;
    }
    Ok(())
}

/// Require exactly one of the named identifiers to be set (non-empty)
pub fn exactly_one(identifiers: &[(&str, &str)]) -> Result<()> {
    let set = identifiers.iter().filter(|(_, v)| !v.is_empty()).count();
    if set == 1 {
        return Ok(());
    }

    let names: Vec<&str> = identifiers.iter().map(|(name, _)| *name).collect();
    let received: Vec<String> = identifiers
        .iter()
        .map(|(name, value)| format!("{}: {:?}", name, value))
        .collect();
    Err(VerkadaError::validation(format!(
        "need exactly one of {} - received {}",
        names.join(", "),
        received.join(", ")
    )))
}

/// Require a file name to carry the given extension, substituting `default`
/// when it is empty. Returns the name to use.
pub fn check_extension(file_name: &str, extension: &str, default: &str) -> Result<String> {
    let name = if file_name.is_empty() { default } else { file_name };
    if name.ends_with(extension) {
        Ok(name.to_string())
    } else {
        Err(VerkadaError::validation(format!(
            "file name does not end with \"{}\" - received {}",
            extension, name
        )))
    }
}

/// Require both or neither bound of a time range, and cap its length
pub fn check_time_window(start: Option<i64>, end: Option<i64>, max_seconds: i64) -> Result<()> {
    match (start, end) {
        (Some(start), Some(end)) => match end.checked_sub(start) {
            Some(span) if span <= max_seconds => Ok(()),
            span => Err(VerkadaError::validation(format!(
                "difference between start_time and end_time is too large: {} - {} = {}",
                end,
                start,
                span.map_or_else(|| "overflow".to_string(), |s| s.to_string())
            ))),
        },
        (Some(_), None) | (None, Some(_)) => Err(VerkadaError::validation(
            "start_time is provided without end_time (or vice versa)",
        )),
        (None, None) => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_size_bounds() {
        assert!(check_page_size(None, 200).is_ok());
        assert!(check_page_size(Some(1), 200).is_ok());
        assert!(check_page_size(Some(200), 200).is_ok());
        assert!(check_page_size(Some(0), 200).unwrap_err().is_validation());
        assert!(check_page_size(Some(201), 200).is_err());
        assert!(check_page_size(Some(10_000), 10_000).is_ok());
    }

    #[test]
    fn test_exactly_one_counts_set_identifiers() {
        assert!(exactly_one(&[("user_id", "u1"), ("external_id", "")]).is_ok());
        assert!(exactly_one(&[("user_id", ""), ("external_id", "")]).is_err());
        assert!(exactly_one(&[("user_id", "u1"), ("external_id", "e1")]).is_err());
        assert!(exactly_one(&[
            ("email", ""),
            ("external_id", ""),
            ("user_id", ""),
            ("employee_id", "emp"),
        ])
        .is_ok());
    }

    #[test]
    fn test_weekdays() {
        assert!(check_one_of("weekday", "SA", WEEKDAYS).is_ok());
        assert!(check_one_of("weekday", "SAT", WEEKDAYS).is_err());
    }

    #[test]
    fn test_all_in() {
        let types = vec!["motion".to_string(), "crowd".to_string()];
        assert!(check_all_in("notification_type", &types, NOTIFICATION_TYPES).is_ok());
        let err = check_all_in("notification_type", &["smoke"], NOTIFICATION_TYPES).unwrap_err();
        assert!(err.to_string().contains("smoke"));
    }

    #[test]
    fn test_extension() {
        assert_eq!(
            check_extension("", ".jpg", "thumbnail.jpg").unwrap(),
            "thumbnail.jpg"
        );
        assert_eq!(check_extension("a.jpg", ".jpg", "x.jpg").unwrap(), "a.jpg");
        assert!(check_extension("a.png", ".jpg", "x.jpg").is_err());
    }

    #[test]
    fn test_time_window() {
        assert!(check_time_window(None, None, 3600).is_ok());
        assert!(check_time_window(Some(0), Some(3600), 3600).is_ok());
        assert!(check_time_window(Some(0), Some(3601), 3600).is_err());
        assert!(check_time_window(Some(0), None, 3600).is_err());
        assert!(check_time_window(Some(i64::MIN), Some(0), 86_400)
            .unwrap_err()
            .is_validation());
        assert!(check_time_window(Some(0), Some(i64::MAX), 86_400).is_err());
        assert!(check_time_window(Some(i64::MAX), Some(i64::MIN), 86_400).is_err());
    }
}
