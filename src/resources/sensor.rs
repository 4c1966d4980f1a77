use crate::models::sensor::*;
use crate::paginate::PageResult;
use crate::query::ScopedQuery;
use crate::rest::Client;
use crate::validation::{check_all_in, check_page_size, SENSOR_FIELDS};

const ALERTS: &str = "/environment/v1/alerts";
const DATA: &str = "/environment/v1/data";

/// Environmental sensor endpoints
#[derive(Debug, Clone, Copy)]
pub struct SensorApi<'a> {
    pub(super) client: &'a Client,
}

impl<'a> SensorApi<'a> {
    /// Threshold alerts raised by a set of sensors
    pub fn get_sensor_alerts(
        &self,
        device_ids: &[String],
        options: SensorAlertsOptions,
    ) -> PageResult<SensorAlerts> {
        check_page_size(options.page_size, 200)?;
        check_all_in("fields", &options.fields, SENSOR_FIELDS)?;

        let query = ScopedQuery::new(options).with_list("device_ids", device_ids);
        let first: SensorAlerts = self.client.get(ALERTS, &query)?;
        self.client.follow_pages(first, |cursor| {
            let mut page = query.clone();
            page.options.page_token = cursor.clone().unwrap_or_default();
            self.client.get(ALERTS, &page)
        })
    }

    /// Readings of one sensor, optionally aggregated over `interval`
    pub fn get_sensor_data(&self, device_id: &str, options: SensorDataOptions) -> PageResult<SensorData> {
        check_page_size(options.page_size, 200)?;
        check_all_in("fields", &options.fields, SENSOR_FIELDS)?;

        let query = ScopedQuery::new(options).with("device_id", device_id);
        let first: SensorData = self.client.get(DATA, &query)?;
        self.client.follow_pages(first, |cursor| {
            let mut page = query.clone();
            page.options.page_token = cursor.clone().unwrap_or_default();
            self.client.get(DATA, &page)
        })
    }
}
