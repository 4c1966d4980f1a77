//! Environmental sensors: threshold alerts and readings.

use super::nullable;
use serde::Deserialize;

crate::query_params! {
    #[derive(Debug, Clone, Default)]
    pub struct SensorAlertsOptions {
        pub start_time: Option<i64> => "start_time",
        pub end_time: Option<i64> => "end_time",
        pub page_size: Option<i64> => "page_size",
        pub page_token: String => "page_token",
        pub fields: Vec<String> => "fields",
    }
}

crate::query_params! {
    #[derive(Debug, Clone, Default)]
    pub struct SensorDataOptions {
        pub start_time: Option<i64> => "start_time",
        pub end_time: Option<i64> => "end_time",
        pub page_token: String => "page_token",
        pub page_size: Option<i64> => "page_size",
        pub fields: Vec<String> => "fields",
        pub interval: String => "interval",
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct SensorAlerts {
    #[serde(deserialize_with = "nullable")]
    pub alert_events: Vec<SensorAlert>,
    pub next_page_token: Option<String>,
}

crate::impl_paginated!(SensorAlerts, Option<String>, next_page_token, [alert_events]);

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct SensorAlert {
    pub alert_event_id: Option<String>,
    pub device_id: Option<String>,
    pub device_name: Option<String>,
    pub device_serial: Option<String>,
    pub end_time: Option<i64>,
    pub is_above_max_event: Option<bool>,
    pub most_extreme_value: Option<f64>,
    pub reading: Option<String>,
    pub start_time: Option<i64>,
    pub threshold: Option<f64>,
}

/// Readings of one sensor
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct SensorData {
    #[serde(deserialize_with = "nullable")]
    pub data: Vec<SensorReading>,
    pub device_id: Option<String>,
    pub device_name: Option<String>,
    pub device_serial: Option<String>,
    pub interval: Option<String>,
    pub next_page_token: Option<String>,
}

crate::impl_paginated!(SensorData, Option<String>, next_page_token, [data]);

/// One sample. Only the requested fields are present.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct SensorReading {
    pub heat_index: Option<f64>,
    pub humidity: Option<f64>,
    pub motion: Option<i64>,
    pub noise_level: Option<f64>,
    pub pm_1_0_0: Option<f64>,
    pub pm_2_5: Option<f64>,
    pub pm_4_0: Option<f64>,
    pub tamper: Option<i64>,
    pub temperature: Option<f64>,
    pub time: Option<i64>,
    pub tvoc: Option<f64>,
    pub usa_air_quality_index: Option<i64>,
    pub vape_index: Option<i64>,
    pub vape_index_experimental: Option<i64>,
    pub carbon_dioxide: Option<f64>,
    pub carbon_monoxide: Option<f64>,
    pub barometric_pressure: Option<f64>,
    pub formaldehyde: Option<f64>,
    pub ambient_light: Option<f64>,
    pub tvoc_index: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paginate::Paginated;

    #[test]
    fn test_sensor_pages_accumulate() {
        let mut acc: SensorData = serde_json::from_str(
            r#"{"device_id":"s1","data":[{"time":1,"temperature":21.5}],"next_page_token":"p2"}"#,
        )
        .unwrap();
        let next: SensorData =
            serde_json::from_str(r#"{"device_id":"s1","data":[{"time":2,"humidity":40}],"next_page_token":""}"#)
                .unwrap();
        acc.extend_page(next);
        assert_eq!(acc.data.len(), 2);
        assert_eq!(acc.data[1].humidity, Some(40.0));
        assert_eq!(acc.next_page_token.as_deref(), Some(""));
    }
}
