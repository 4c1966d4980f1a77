//! Viewing stations.

use super::nullable;
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct VxDevices {
    #[serde(deserialize_with = "nullable")]
    pub devices: Vec<VxDevice>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct VxDevice {
    pub app_version: Option<String>,
    pub claimed_serial_number: Option<String>,
    pub device_id: Option<String>,
    pub ip_address: Option<String>,
    pub last_seen_at: Option<String>,
    pub last_status: Option<String>,
    pub location: Option<String>,
    pub location_lat: Option<f64>,
    pub location_lon: Option<f64>,
    pub name: Option<String>,
    pub site_id: Option<String>,
    pub timezone: Option<String>,
}
