use crate::error::Result;
use crate::models::camera::*;
use crate::models::EmptyResponse;
use crate::paginate::PageResult;
use crate::query::ScopedQuery;
use crate::rest::Client;
use crate::token::StreamingToken;
use crate::validation::{
    check_all_in, check_extension, check_one_of, check_page_size, check_time_window,
    NOTIFICATION_TYPES, OT_INTERVALS, STREAM_RESOLUTIONS, THUMBNAIL_RESOLUTIONS,
};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::Method;
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::debug;

const ALERTS: &str = "/cameras/v1/alerts";
const DASHBOARD_OCCUPANCY: &str = "/cameras/v1/analytics/dashboard_occupancy_trends";
const MAX_COUNTS: &str = "/cameras/v1/analytics/max_object_counts";
const OBJECT_COUNTS: &str = "/cameras/v1/analytics/object_counts";
const MQTT_CONFIG: &str = "/cameras/v1/analytics/object_position_mqtt";
const OCCUPANCY_TRENDS: &str = "/cameras/v1/analytics/occupancy_trends";
const LPR_IMAGES: &str = "/cameras/v1/analytics/lpr/images";
const LPOI: &str = "/cameras/v1/analytics/lpr/license_plate_of_interest";
const LPOI_BATCH: &str = "/cameras/v1/analytics/lpr/license_plate_of_interest/batch";
const LPR_TIMESTAMPS: &str = "/cameras/v1/analytics/lpr/timestamps";
const AUDIO_STATUS: &str = "/cameras/v1/audio/status";
const CLOUD_BACKUP: &str = "/cameras/v1/cloud_backup/settings";
const DEVICES: &str = "/cameras/v1/devices";
const OT_CAMERAS: &str = "/cameras/v1/occupancy_trend_enabled";
const FOOTAGE_LINK: &str = "/cameras/v1/footage/link";
const THUMBNAIL: &str = "/cameras/v1/footage/thumbnails";
const LATEST_THUMBNAIL: &str = "/cameras/v1/footage/thumbnails/latest";
const THUMBNAIL_LINK: &str = "/cameras/v1/footage/thumbnails/link";
const STREAM: &str = "/stream/cameras/v1/footage/stream/stream.m3u8";
const POI: &str = "/cameras/v1/people/person_of_interest";

const DEFAULT_THUMBNAIL: &str = "thumbnail.jpg";

#[derive(Serialize)]
struct LpoiBody<'b> {
    #[serde(skip_serializing_if = "Option::is_none")]
    license_plate: Option<&'b str>,
    description: &'b str,
}

#[derive(Serialize)]
struct AudioBody<'b> {
    camera_id: &'b str,
    enabled: bool,
}

#[derive(Serialize)]
struct PoiBody<'b> {
    #[serde(skip_serializing_if = "Option::is_none")]
    base64_image: Option<String>,
    label: &'b str,
}

/// Camera endpoints
#[derive(Debug, Clone, Copy)]
pub struct CameraApi<'a> {
    pub(super) client: &'a Client,
}

impl<'a> CameraApi<'a> {
    /// Camera alerts (offline, tamper, detections, ...) within a time range
    pub fn get_alerts(&self, options: AlertsOptions) -> PageResult<Alerts> {
        check_all_in("notification_type", &options.notification_type, NOTIFICATION_TYPES)?;
        check_page_size(options.page_size, 200)?;

        let first: Alerts = self.client.get(ALERTS, &options)?;
        self.client.follow_pages(first, |cursor| {
            let page = AlertsOptions {
                page_token: cursor.clone().unwrap_or_default(),
                ..options.clone()
            };
            self.client.get(ALERTS, &page)
        })
    }

    /// Occupancy trends of a dashboard
    pub fn get_dashboard_ot_data(
        &self,
        dashboard_id: &str,
        options: OccupancyOptions,
    ) -> Result<DashboardOccupancy> {
        check_one_of("interval", &options.interval, OT_INTERVALS)?;
        let query = ScopedQuery::new(options).with("dashboard_id", dashboard_id);
        self.client.get(DASHBOARD_OCCUPANCY, &query)
    }

    /// Max people and vehicle counts seen by a camera
    pub fn get_max_counts(&self, camera_id: &str, options: MaxCountsOptions) -> Result<MaxCounts> {
        let query = ScopedQuery::new(options).with("camera_id", camera_id);
        self.client.get(MAX_COUNTS, &query)
    }

    pub fn get_object_counts(
        &self,
        camera_id: &str,
        options: ObjectCountsOptions,
    ) -> PageResult<ObjectCounts> {
        check_page_size(options.page_size, 200)?;

        let query = ScopedQuery::new(options).with("camera_id", camera_id);
        let first: ObjectCounts = self.client.get(OBJECT_COUNTS, &query)?;
        self.client.follow_pages(first, |cursor| {
            let mut page = query.clone();
            page.options.page_token = cursor.clone().unwrap_or_default();
            self.client.get(OBJECT_COUNTS, &page)
        })
    }

    /// Configure the MQTT broker receiving object positions
    pub fn set_mqtt_config(&self, body: &MqttConfigBody) -> Result<MqttConfig> {
        self.client.send_json(Method::POST, MQTT_CONFIG, &(), body)
    }

    /// Occupancy trends of a camera preset
    pub fn get_ot_data(
        &self,
        camera_id: &str,
        preset_id: &str,
        options: OccupancyOptions,
    ) -> Result<OccupancyTrends> {
        check_one_of("interval", &options.interval, OT_INTERVALS)?;
        let query = ScopedQuery::new(options)
            .with("camera_id", camera_id)
            .with("preset_id", preset_id);
        self.client.get(OCCUPANCY_TRENDS, &query)
    }

    /// License plates seen by a camera, paginated by a numeric token
    pub fn get_seen_plates(&self, camera_id: &str, options: SeenPlatesOptions) -> PageResult<SeenPlates> {
        check_page_size(options.page_size, 200)?;

        let query = ScopedQuery::new(options).with("camera_id", camera_id);
        let first: SeenPlates = self.client.get(LPR_IMAGES, &query)?;
        self.client.follow_pages(first, |cursor| {
            let mut page = query.clone();
            page.options.page_token = *cursor;
            self.client.get(LPR_IMAGES, &page)
        })
    }

    pub fn delete_lpoi(&self, license_plate: &str) -> Result<LicensePlateOfInterest> {
        self.client
            .delete(LPOI, &ScopedQuery::only("license_plate", license_plate))
    }

    pub fn get_all_lpoi(&self, options: PageOptions) -> PageResult<LicensePlatesOfInterest> {
        check_page_size(options.page_size, 10_000)?;

        let first: LicensePlatesOfInterest = self.client.get(LPOI, &options)?;
        self.client.follow_pages(first, |cursor| {
            let page = PageOptions {
                page_token: cursor.clone().unwrap_or_default(),
                ..options.clone()
            };
            self.client.get(LPOI, &page)
        })
    }

    pub fn update_lpoi(&self, license_plate: &str, description: &str) -> Result<LicensePlateOfInterest> {
        let body = LpoiBody {
            license_plate: None,
            description,
        };
        self.client.send_json(
            Method::PATCH,
            LPOI,
            &ScopedQuery::only("license_plate", license_plate),
            &body,
        )
    }

    pub fn create_lpoi(&self, license_plate: &str, description: &str) -> Result<LicensePlateOfInterest> {
        let body = LpoiBody {
            license_plate: Some(license_plate),
            description,
        };
        self.client.send_json(Method::POST, LPOI, &(), &body)
    }

    /// Delete every license plate of interest listed in a CSV file
    pub fn delete_lpoi_by_csv(&self, file_path: impl AsRef<Path>) -> Result<BatchResult> {
        self.client
            .request_with_file(Method::DELETE, LPOI_BATCH, &(), file_path, "text/csv")
    }

    /// Create license plates of interest from a CSV file
    pub fn create_lpoi_by_csv(&self, file_path: impl AsRef<Path>) -> Result<BatchResult> {
        self.client
            .request_with_file(Method::POST, LPOI_BATCH, &(), file_path, "text/csv")
    }

    /// Times at which a camera saw a license plate
    pub fn get_license_plate_timestamps(
        &self,
        camera_id: &str,
        license_plate: &str,
        options: PlateTimestampsOptions,
    ) -> PageResult<PlateTimestamps> {
        check_page_size(options.page_size, 200)?;

        let query = ScopedQuery::new(options)
            .with("camera_id", camera_id)
            .with("license_plate", license_plate);
        let first: PlateTimestamps = self.client.get(LPR_TIMESTAMPS, &query)?;
        self.client.follow_pages(first, |cursor| {
            let mut page = query.clone();
            page.options.page_token = *cursor;
            self.client.get(LPR_TIMESTAMPS, &page)
        })
    }

    pub fn get_camera_audio_status(&self, camera_id: &str) -> Result<AudioStatus> {
        self.client
            .get(AUDIO_STATUS, &ScopedQuery::only("camera_id", camera_id))
    }

    pub fn update_camera_audio(&self, camera_id: &str, enabled: bool) -> Result<EmptyResponse> {
        let body = AudioBody { camera_id, enabled };
        self.client.send_json(Method::POST, AUDIO_STATUS, &(), &body)
    }

    pub fn get_cloud_backup_settings(&self, camera_id: &str) -> Result<CloudBackupSettings> {
        self.client
            .get(CLOUD_BACKUP, &ScopedQuery::only("camera_id", camera_id))
    }

    pub fn update_cloud_backup_settings(&self, body: &CloudBackupSettingsBody) -> Result<EmptyResponse> {
        body.validate()?;
        self.client.send_json(Method::POST, CLOUD_BACKUP, &(), body)
    }

    pub fn get_camera_devices(&self, options: PageOptions) -> PageResult<CameraDevices> {
        check_page_size(options.page_size, 10_000)?;

        let first: CameraDevices = self.client.get(DEVICES, &options)?;
        self.client.follow_pages(first, |cursor| {
            let page = PageOptions {
                page_token: cursor.clone().unwrap_or_default(),
                ..options.clone()
            };
            self.client.get(DEVICES, &page)
        })
    }

    /// Cameras with occupancy trends enabled, with their presets
    pub fn get_ot_cameras(&self) -> Result<OccupancyTrendCameras> {
        self.client.get(OT_CAMERAS, &())
    }

    /// Link to footage of a camera in Command
    pub fn get_link_to_footage(&self, camera_id: &str, options: FootageLinkOptions) -> Result<FootageLink> {
        let query = ScopedQuery::new(options).with("camera_id", camera_id);
        self.client.get(FOOTAGE_LINK, &query)
    }

    /// Download a thumbnail at a point in time.
    ///
    /// An empty `file_name` saves to `thumbnail.jpg`; any other name must
    /// end with `.jpg`.
    pub fn get_thumbnail_image(
        &self,
        camera_id: &str,
        options: ThumbnailOptions,
        file_name: &str,
    ) -> Result<()> {
        check_one_of("resolution", &options.resolution, THUMBNAIL_RESOLUTIONS)?;
        let destination = check_extension(file_name, ".jpg", DEFAULT_THUMBNAIL)?;
        let query = ScopedQuery::new(options).with("camera_id", camera_id);
        self.client
            .request_for_file(Method::GET, THUMBNAIL, &query, destination)
    }

    /// Download the latest thumbnail of a camera
    pub fn get_latest_thumbnail_image(
        &self,
        camera_id: &str,
        resolution: &str,
        file_name: &str,
    ) -> Result<()> {
        check_one_of("resolution", resolution, THUMBNAIL_RESOLUTIONS)?;
        let destination = check_extension(file_name, ".jpg", DEFAULT_THUMBNAIL)?;
        let query = ScopedQuery::only("camera_id", camera_id).with("resolution", resolution);
        self.client
            .request_for_file(Method::GET, LATEST_THUMBNAIL, &query, destination)
    }

    pub fn get_thumbnail_link(&self, camera_id: &str, options: ThumbnailLinkOptions) -> Result<ThumbnailLink> {
        let query = ScopedQuery::new(options).with("camera_id", camera_id);
        self.client.get(THUMBNAIL_LINK, &query)
    }

    /// Token for the streaming endpoints, valid for 30 minutes
    pub fn get_streaming_token(&self) -> Result<StreamingToken> {
        self.client.streaming_token()
    }

    /// Build the HLS playlist link for live or historical footage.
    ///
    /// When `file_name` is not empty the playlist is also downloaded to it;
    /// it must end with `.m3u8`.
    pub fn stream_footage(
        &self,
        org_id: &str,
        camera_id: &str,
        jwt: &str,
        options: StreamOptions,
        file_name: &str,
    ) -> Result<FootageStream> {
        check_time_window(options.start_time, options.end_time, 3600)?;
        check_one_of("resolution", &options.resolution, STREAM_RESOLUTIONS)?;
        if !file_name.is_empty() {
            check_extension(file_name, ".m3u8", "")?;
        }

        let query = ScopedQuery::new(options)
            .with("org_id", org_id)
            .with("camera_id", camera_id)
            .with("jwt", jwt);
        let stream = FootageStream {
            streaming_link: self.client.build_url(STREAM, &query)?,
        };

        if !file_name.is_empty() {
            self.client
                .request_for_file(Method::GET, STREAM, &query, file_name)?;
        }
        Ok(stream)
    }

    pub fn delete_poi(&self, person_id: &str) -> Result<PersonOfInterest> {
        self.client
            .delete(POI, &ScopedQuery::only("person_id", person_id))
    }

    pub fn get_all_poi(&self, options: PageOptions) -> PageResult<PersonsOfInterest> {
        let first: PersonsOfInterest = self.client.get(POI, &options)?;
        self.client.follow_pages(first, |cursor| {
            let page = PageOptions {
                page_token: cursor.clone().unwrap_or_default(),
                ..options.clone()
            };
            self.client.get(POI, &page)
        })
    }

    pub fn update_poi(&self, person_id: &str, label: &str) -> Result<PersonOfInterest> {
        let body = PoiBody {
            base64_image: None,
            label,
        };
        self.client.send_json(
            Method::PATCH,
            POI,
            &ScopedQuery::only("person_id", person_id),
            &body,
        )
    }

    /// Create a person of interest from a face image file
    pub fn create_poi(&self, image_path: impl AsRef<Path>, label: &str) -> Result<PersonOfInterest> {
        let image = fs::read(image_path.as_ref())?;
        debug!(bytes = image.len(), "encoding person of interest image");
        let body = PoiBody {
            base64_image: Some(STANDARD.encode(image)),
            label,
        };
        self.client.send_json(Method::POST, POI, &(), &body)
    }
}
