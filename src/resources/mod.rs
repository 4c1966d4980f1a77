//! Resource facades, one per API family.
//!
//! Each facade borrows the [`Client`] and maps its methods one-to-one to
//! endpoints: validate the inputs, build the query and body, send, decode.

use crate::rest::Client;

pub mod access;
pub mod alarms;
pub mod camera;
pub mod guest;
pub mod helix;
pub mod platform;
pub mod sensor;
pub mod vx;

pub use access::AccessApi;
pub use alarms::AlarmsApi;
pub use camera::CameraApi;
pub use guest::GuestApi;
pub use helix::HelixApi;
pub use platform::CoreApi;
pub use sensor::SensorApi;
pub use vx::VxApi;

impl Client {
    /// Access control: users, credentials, doors, levels, events, scenarios
    pub fn access(&self) -> AccessApi<'_> {
        AccessApi { client: self }
    }

    /// Cameras: analytics, license plates, footage, persons of interest
    pub fn camera(&self) -> CameraApi<'_> {
        CameraApi { client: self }
    }

    /// Organization: audit logs and users
    pub fn core(&self) -> CoreApi<'_> {
        CoreApi { client: self }
    }

    /// Guest management
    pub fn guest(&self) -> GuestApi<'_> {
        GuestApi { client: self }
    }

    /// Helix video tagging
    pub fn helix(&self) -> HelixApi<'_> {
        HelixApi { client: self }
    }

    /// Environmental sensors
    pub fn sensor(&self) -> SensorApi<'_> {
        SensorApi { client: self }
    }

    /// Classic alarms
    pub fn alarms(&self) -> AlarmsApi<'_> {
        AlarmsApi { client: self }
    }

    /// Viewing stations
    pub fn vx(&self) -> VxApi<'_> {
        VxApi { client: self }
    }
}
