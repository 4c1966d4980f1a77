//! Classic alarm devices and sites.

use super::nullable;
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct AlarmDevices {
    #[serde(deserialize_with = "nullable")]
    pub devices: Vec<AlarmDevice>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct AlarmDevice {
    pub device_id: Option<String>,
    pub device_type: Option<String>,
    pub site_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct AlarmSites {
    #[serde(deserialize_with = "nullable")]
    pub sites: Vec<AlarmSite>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct AlarmSite {
    pub site_id: Option<String>,
    pub site_name: Option<String>,
    pub site_security_level: Option<String>,
    pub site_state: Option<String>,
}
