//! Camera analytics, license plate recognition, footage and persons of interest.

use super::nullable;
use crate::error::{Result, VerkadaError};
use crate::query::{QueryParams, QueryValue, QueryWriter};
use crate::validation::{check_one_of, VIDEO_QUALITIES, VIDEO_TO_UPLOAD};
use serde::{Deserialize, Serialize};

crate::query_params! {
    #[derive(Debug, Clone, Default)]
    pub struct AlertsOptions {
        pub start_time: Option<i64> => "start_time",
        pub end_time: Option<i64> => "end_time",
        pub include_image_url: Option<bool> => "include_image_url",
        pub page_token: String => "page_token",
        pub page_size: Option<i64> => "page_size",
        pub notification_type: Vec<String> => "notification_type",
    }
}

crate::query_params! {
    /// Time range and aggregation interval for occupancy trends
    #[derive(Debug, Clone, Default)]
    pub struct OccupancyOptions {
        pub start_time: Option<i64> => "start_time",
        pub end_time: Option<i64> => "end_time",
        pub interval: String => "interval",
    }
}

/// Options for max people/vehicle counts.
///
/// Each search zone is an `(x, y)` pair, serialized as `x.y` and joined
/// with `.` into a single `search_zones` parameter.
#[derive(Debug, Clone, Default)]
pub struct MaxCountsOptions {
    pub start_time: Option<i64>,
    pub end_time: Option<i64>,
    pub search_zones: Vec<(i64, i64)>,
}

impl MaxCountsOptions {
    fn encoded_zones(&self) -> String {
        self.search_zones
            .iter()
            .map(|(x, y)| format!("{}.{}", x, y))
            .collect::<Vec<_>>()
            .join(".")
    }
}

impl QueryParams for MaxCountsOptions {
    fn write_query(&self, writer: &mut QueryWriter) {
        self.start_time.write_value("start_time", writer);
        self.end_time.write_value("end_time", writer);
        self.encoded_zones().write_value("search_zones", writer);
    }
}

crate::query_params! {
    #[derive(Debug, Clone, Default)]
    pub struct ObjectCountsOptions {
        pub start_time: Option<i64> => "start_time",
        pub end_time: Option<i64> => "end_time",
        pub page_token: String => "page_token",
        pub page_size: Option<i64> => "page_size",
    }
}

crate::query_params! {
    #[derive(Debug, Clone, Default)]
    pub struct SeenPlatesOptions {
        pub license_plate: String => "license_plate",
        pub start_time: Option<i64> => "start_time",
        pub end_time: Option<i64> => "end_time",
        pub page_token: Option<i64> => "page_token",
        pub page_size: Option<i64> => "page_size",
    }
}

crate::query_params! {
    #[derive(Debug, Clone, Default)]
    pub struct PlateTimestampsOptions {
        pub start_time: Option<i64> => "start_time",
        pub end_time: Option<i64> => "end_time",
        pub page_token: Option<i64> => "page_token",
        pub page_size: Option<i64> => "page_size",
    }
}

crate::query_params! {
    /// Page selection for listings paginated by a string token
    #[derive(Debug, Clone, Default)]
    pub struct PageOptions {
        pub page_size: Option<i64> => "page_size",
        pub page_token: String => "page_token",
    }
}

crate::query_params! {
    #[derive(Debug, Clone, Default)]
    pub struct FootageLinkOptions {
        pub timestamp: Option<i64> => "timestamp",
    }
}

crate::query_params! {
    #[derive(Debug, Clone, Default)]
    pub struct ThumbnailOptions {
        pub timestamp: Option<i64> => "timestamp",
        /// `low-res` or `hi-res`
        pub resolution: String => "resolution",
    }
}

crate::query_params! {
    #[derive(Debug, Clone, Default)]
    pub struct ThumbnailLinkOptions {
        pub timestamp: Option<i64> => "timestamp",
        pub expiry: Option<i64> => "expiry",
    }
}

crate::query_params! {
    /// Historical range and resolution of an HLS stream. Leave both times
    /// unset for live footage.
    #[derive(Debug, Clone, Default)]
    pub struct StreamOptions {
        pub start_time: Option<i64> => "start_time",
        pub end_time: Option<i64> => "end_time",
        /// `low_res` or `high_res`
        pub resolution: String => "resolution",
    }
}

/// MQTT broker settings for object position streaming
#[derive(Debug, Clone, Default, Serialize)]
pub struct MqttConfigBody {
    pub broker_cert: String,
    pub broker_host_port: String,
    pub camera_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub client_password: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub client_username: String,
}

/// New cloud backup settings for a camera
#[derive(Debug, Clone, Default, Serialize)]
pub struct CloudBackupSettingsBody {
    pub camera_id: String,
    /// Seven `0`/`1` flags, Sunday first, comma separated
    pub days_to_preserve: String,
    /// `0` or `1`
    pub enabled: i64,
    /// `start,end` seconds of the day
    pub time_to_preserve: String,
    /// `start,end` seconds of the day
    pub upload_timeslot: String,
    pub video_quality: String,
    pub video_to_upload: String,
}

impl CloudBackupSettingsBody {
    pub fn validate(&self) -> Result<()> {
        let days = &self.days_to_preserve;
        if days.len() != 13 {
            return Err(VerkadaError::validation(format!(
                "parameter days_to_preserve is not the correct length (13) - {} length {}",
                days,
                days.len()
            )));
        }
        if !days.chars().all(|c| matches!(c, '0' | '1' | ',')) {
            return Err(VerkadaError::validation(format!(
                "parameter days_to_preserve should only contain 0 or 1 delimited by \",\" - received {}",
                days
            )));
        }
        if !(self.enabled == 0 || self.enabled == 1) {
            return Err(VerkadaError::validation(format!(
                "parameter enabled can only be 0 or 1 - received {}",
                self.enabled
            )));
        }
        check_time_pair("time_to_preserve", &self.time_to_preserve)?;
        check_time_pair("upload_timeslot", &self.upload_timeslot)?;
        check_one_of("video_quality", &self.video_quality, VIDEO_QUALITIES)?;
        check_one_of("video_to_upload", &self.video_to_upload, VIDEO_TO_UPLOAD)
    }
}

/// Require exactly one `,` in a `start,end` pair. Values are not checked.
fn check_time_pair(name: &str, value: &str) -> Result<()> {
    match value.split(',').count() {
        2 => Ok(()),
        1 => Err(VerkadaError::validation(format!(
            "did not delimit {} with \",\" - received {}",
            name, value
        ))),
        _ => Err(VerkadaError::validation(format!(
            "too many delimiters detected in {} - received {}",
            name, value
        ))),
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct Alerts {
    pub next_page_token: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub notifications: Vec<Notification>,
}

crate::impl_paginated!(Alerts, Option<String>, next_page_token, [notifications]);

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct Notification {
    pub camera_id: Option<String>,
    pub created: Option<i64>,
    pub crowd_threshold: Option<i64>,
    pub image_url: Option<String>,
    pub notification_type: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub objects: Vec<String>,
    pub person_label: Option<String>,
    pub video_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct DashboardOccupancy {
    pub dashboard_id: Option<String>,
    pub dashboard_name: Option<String>,
    pub end_time: Option<i64>,
    #[serde(deserialize_with = "nullable")]
    pub occupancy: Vec<Vec<i64>>,
    pub org_id: Option<String>,
    pub org_name: Option<String>,
    pub start_time: Option<i64>,
    #[serde(deserialize_with = "nullable")]
    pub trend_in: Vec<Vec<i64>>,
    #[serde(deserialize_with = "nullable")]
    pub trend_out: Vec<Vec<i64>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct MaxCounts {
    pub people_count: Option<i64>,
    pub vehicle_count: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct ObjectCounts {
    pub next_page_token: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub object_counts: Vec<ObjectCount>,
}

crate::impl_paginated!(ObjectCounts, Option<String>, next_page_token, [object_counts]);

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct ObjectCount {
    pub detected_time: Option<i64>,
    pub people_count: Option<i64>,
    pub vehicle_count: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct MqttConfig {
    pub broker_cert: Option<String>,
    pub broker_host_port: Option<String>,
    pub camera_id: Option<String>,
    pub client_password: Option<String>,
    pub client_username: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct OccupancyTrends {
    pub camera_address: Option<String>,
    pub camera_id: Option<String>,
    pub camera_name: Option<String>,
    pub camera_site: Option<String>,
    pub end_time: Option<i64>,
    pub org_id: Option<String>,
    pub org_name: Option<String>,
    pub preset_id: Option<String>,
    pub start_time: Option<i64>,
    #[serde(deserialize_with = "nullable")]
    pub trend_in: Vec<Vec<i64>>,
    #[serde(deserialize_with = "nullable")]
    pub trend_out: Vec<Vec<i64>>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct SeenPlates {
    pub camera_id: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub detections: Vec<PlateDetection>,
    pub next_page_token: Option<i64>,
}

crate::impl_paginated!(SeenPlates, Option<i64>, next_page_token, [detections]);

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct PlateDetection {
    pub image_url: Option<String>,
    pub license_plate: Option<String>,
    pub timestamp: Option<i64>,
    pub vehicle_image_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct LicensePlateOfInterest {
    pub creation_time: Option<i64>,
    pub description: Option<String>,
    pub license_plate: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct LicensePlatesOfInterest {
    #[serde(deserialize_with = "nullable")]
    pub license_plate_of_interest: Vec<LicensePlateOfInterest>,
    pub next_page_token: Option<String>,
}

crate::impl_paginated!(
    LicensePlatesOfInterest,
    Option<String>,
    next_page_token,
    [license_plate_of_interest]
);

/// Result of a CSV batch operation
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct BatchResult {
    #[serde(rename = "addedMs")]
    pub added_ms: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct PlateTimestamps {
    pub camera_id: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub detections: Vec<i64>,
    pub license_plate: Option<String>,
    pub next_page_token: Option<i64>,
}

crate::impl_paginated!(PlateTimestamps, Option<i64>, next_page_token, [detections]);

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct AudioStatus {
    pub camera_id: Option<String>,
    pub enabled: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct CloudBackupSettings {
    pub camera_id: Option<String>,
    pub days_to_preserve: Option<String>,
    pub enabled: Option<i64>,
    pub last_updated_segment_hq: Option<String>,
    pub last_updated_segment_sq: Option<String>,
    pub time_to_preserve: Option<String>,
    pub upload_timeslot: Option<String>,
    pub video_quality: Option<String>,
    pub video_to_upload: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct CameraDevices {
    #[serde(deserialize_with = "nullable")]
    pub cameras: Vec<CameraDevice>,
    pub next_page_token: Option<String>,
}

crate::impl_paginated!(CameraDevices, Option<String>, next_page_token, [cameras]);

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct CameraDevice {
    pub camera_id: Option<String>,
    pub cloud_retention: Option<i64>,
    pub date_added: Option<i64>,
    pub device_retention: Option<serde_json::Value>,
    pub firmware: Option<String>,
    pub firmware_update_schedule: Option<String>,
    pub last_online: Option<i64>,
    pub local_ip: Option<String>,
    pub location: Option<String>,
    pub location_angle: Option<f64>,
    pub location_lat: Option<f64>,
    pub location_lon: Option<f64>,
    pub mac: Option<String>,
    pub model: Option<String>,
    pub name: Option<String>,
    pub people_history_enabled: Option<bool>,
    pub serial: Option<String>,
    pub site: Option<String>,
    pub site_id: Option<String>,
    pub status: Option<String>,
    pub timezone: Option<String>,
    pub vehicle_history_enabled: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct OccupancyTrendCameras {
    #[serde(deserialize_with = "nullable")]
    pub cameras: Vec<OccupancyTrendCamera>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct OccupancyTrendCamera {
    pub camera_id: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub preset_ids: Vec<String>,
    #[serde(deserialize_with = "nullable")]
    pub presets: Vec<Preset>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct Preset {
    pub object_class: Option<String>,
    pub preset_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct FootageLink {
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct ThumbnailLink {
    pub expiry: Option<i64>,
    pub timestamp: Option<i64>,
    pub url: Option<String>,
}

/// HLS playlist link, ready to be opened by a video player
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FootageStream {
    pub streaming_link: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct PersonOfInterest {
    pub created: Option<i64>,
    pub label: Option<String>,
    pub last_seen: Option<i64>,
    pub person_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct PersonsOfInterest {
    pub next_token: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub persons_of_interest: Vec<PersonOfInterest>,
}

crate::impl_paginated!(PersonsOfInterest, Option<String>, next_token, [persons_of_interest]);
