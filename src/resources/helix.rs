use crate::error::Result;
use crate::models::helix::*;
use crate::models::EmptyResponse;
use crate::query::ScopedQuery;
use crate::rest::Client;
use reqwest::Method;
use serde::Serialize;

const EVENT: &str = "/cameras/v1/video_tagging/event";
const EVENT_SEARCH: &str = "/cameras/v1/video_tagging/event/search";
const EVENT_TYPE: &str = "/cameras/v1/video_tagging/event_type";

#[derive(Serialize)]
struct NewEvent<'b> {
    #[serde(flatten)]
    event: &'b HelixEventBody,
    camera_id: &'b str,
    event_type_uid: &'b str,
    time_ms: i64,
}

#[derive(Serialize)]
struct EventTypeBody<'b> {
    event_schema: &'b EventSchema,
    name: &'b str,
}

fn event_key(camera_id: &str, time_ms: i64, event_type_uid: &str) -> ScopedQuery<()> {
    ScopedQuery::only("camera_id", camera_id)
        .with("time_ms", time_ms)
        .with("event_type_uid", event_type_uid)
}

/// Helix video tagging endpoints.
///
/// An event is identified by its camera, its timestamp in milliseconds and
/// the UID of its event type.
#[derive(Debug, Clone, Copy)]
pub struct HelixApi<'a> {
    pub(super) client: &'a Client,
}

impl<'a> HelixApi<'a> {
    pub fn delete_helix_event(&self, camera_id: &str, time_ms: i64, event_type_uid: &str) -> Result<EmptyResponse> {
        self.client
            .delete(EVENT, &event_key(camera_id, time_ms, event_type_uid))
    }

    pub fn get_helix_event(&self, camera_id: &str, time_ms: i64, event_type_uid: &str) -> Result<HelixEvent> {
        self.client
            .get(EVENT, &event_key(camera_id, time_ms, event_type_uid))
    }

    pub fn update_helix_event(
        &self,
        camera_id: &str,
        time_ms: i64,
        event_type_uid: &str,
        event: &HelixEventBody,
    ) -> Result<EmptyResponse> {
        self.client.send_json(
            Method::PATCH,
            EVENT,
            &event_key(camera_id, time_ms, event_type_uid),
            event,
        )
    }

    pub fn create_helix_event(
        &self,
        camera_id: &str,
        time_ms: i64,
        event_type_uid: &str,
        event: &HelixEventBody,
    ) -> Result<EmptyResponse> {
        let body = NewEvent {
            event,
            camera_id,
            event_type_uid,
            time_ms,
        };
        self.client.send_json(Method::POST, EVENT, &(), &body)
    }

    pub fn search_helix_event(&self, search: &HelixSearch) -> Result<HelixEvent> {
        self.client.send_json(Method::POST, EVENT_SEARCH, &(), search)
    }

    pub fn delete_helix_event_type(&self, event_type_uid: &str) -> Result<EmptyResponse> {
        self.client
            .delete(EVENT_TYPE, &ScopedQuery::only("event_type_uid", event_type_uid))
    }

    /// List event types, optionally narrowed to one UID or one name
    pub fn get_helix_event_types(&self, options: EventTypesOptions) -> Result<HelixEventTypes> {
        options.validate()?;
        self.client.get(EVENT_TYPE, &options)
    }

    pub fn update_helix_event_type(
        &self,
        event_type_uid: &str,
        event_schema: &EventSchema,
        name: &str,
    ) -> Result<EmptyResponse> {
        check_schema(event_schema)?;
        let body = EventTypeBody { event_schema, name };
        self.client.send_json(
            Method::PATCH,
            EVENT_TYPE,
            &ScopedQuery::only("event_type_uid", event_type_uid),
            &body,
        )
    }

    pub fn create_helix_event_type(&self, event_schema: &EventSchema, name: &str) -> Result<HelixEventType> {
        check_schema(event_schema)?;
        let body = EventTypeBody { event_schema, name };
        self.client.send_json(Method::POST, EVENT_TYPE, &(), &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::QueryParams;

    #[test]
    fn test_event_key_order() {
        assert_eq!(
            event_key("cam 1", 1700000000000, "uid").to_query(),
            "camera_id=cam+1&time_ms=1700000000000&event_type_uid=uid"
        );
    }

    #[test]
    fn test_new_event_body() {
        let event = HelixEventBody {
            flagged: true,
            ..Default::default()
        };
        let json = serde_json::to_value(NewEvent {
            event: &event,
            camera_id: "c1",
            event_type_uid: "u1",
            time_ms: 5,
        })
        .unwrap();
        assert_eq!(
            json,
            serde_json::json!({"flagged": true, "camera_id": "c1", "event_type_uid": "u1", "time_ms": 5})
        );
    }
}
