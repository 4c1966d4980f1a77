use crate::error::Result;
use crate::models::vx::VxDevices;
use crate::rest::Client;

const DEVICES: &str = "/viewing_station/v1/devices";

/// Viewing station endpoints
#[derive(Debug, Clone, Copy)]
pub struct VxApi<'a> {
    pub(super) client: &'a Client,
}

impl<'a> VxApi<'a> {
    pub fn get_vx_devices(&self) -> Result<VxDevices> {
        self.client.get(DEVICES, &())
    }
}
