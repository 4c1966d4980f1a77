use crate::error::Result;
use crate::models::alarms::{AlarmDevices, AlarmSites};
use crate::query::ScopedQuery;
use crate::rest::Client;

const DEVICES: &str = "/alarms/v1/devices";
const SITES: &str = "/alarms/v1/sites";

/// Classic alarms endpoints
#[derive(Debug, Clone, Copy)]
pub struct AlarmsApi<'a> {
    pub(super) client: &'a Client,
}

impl<'a> AlarmsApi<'a> {
    pub fn get_alarm_devices(&self, site_id: &str) -> Result<AlarmDevices> {
        self.client
            .get(DEVICES, &ScopedQuery::only("site_id", site_id))
    }

    /// Alarm sites, all of them when `site_ids` is empty
    pub fn get_alarm_sites(&self, site_ids: &[String]) -> Result<AlarmSites> {
        let query = ScopedQuery::new(()).with_list("site_ids", site_ids);
        self.client.get(SITES, &query)
    }
}
