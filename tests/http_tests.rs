use mockito::{Matcher, Server};
use std::fs;
use verkada_client::models::sensor::SensorDataOptions;
use verkada_client::{Client, Config, VerkadaError};

fn connect(server: &Server, auto_paginate: bool) -> Client {
    let config = Config::default()
        .with_base_url(server.url())
        .with_auto_paginate(auto_paginate);
    Client::new("live-key", config).unwrap()
}

#[test]
fn test_token_exchange_and_authorized_get() {
    let mut server = Server::new();
    let token = server
        .mock("POST", "/token")
        .match_header("x-api-key", "live-key")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"token":"tok-abc"}"#)
        .expect(1)
        .create();
    let sites = server
        .mock("GET", "/alarms/v1/sites")
        .match_query(Matcher::UrlEncoded("site_ids".into(), "s1,s2".into()))
        .match_header("x-verkada-auth", "tok-abc")
        .with_status(200)
        .with_body(r#"{"sites":[{"site_id":"s1","site_state":"armed"},{"site_id":"s2"}]}"#)
        .create();

    let client = connect(&server, false);
    let result = client
        .alarms()
        .get_alarm_sites(&["s1".to_string(), "s2".to_string()])
        .unwrap();

    assert_eq!(result.sites.len(), 2);
    assert_eq!(result.sites[0].site_state.as_deref(), Some("armed"));
    token.assert();
    sites.assert();
}

#[test]
fn test_rejected_api_key_is_an_auth_error() {
    let mut server = Server::new();
    server
        .mock("POST", "/token")
        .with_status(401)
        .with_body(r#"{"message":"invalid api key"}"#)
        .create();

    let config = Config::default().with_base_url(server.url());
    let err = Client::new("bad-key", config).unwrap_err();
    assert!(matches!(err, VerkadaError::Auth { .. }));
}

#[test]
fn test_paginated_sensor_data_over_http() {
    let mut server = Server::new();
    server
        .mock("POST", "/token")
        .with_status(200)
        .with_body(r#"{"token":"tok-abc"}"#)
        .create();
    let first = server
        .mock("GET", "/environment/v1/data")
        .match_query(Matcher::Exact("device_id=sv-1&fields=temperature,humidity".into()))
        .with_status(200)
        .with_body(r#"{"device_id":"sv-1","data":[{"time":1,"temperature":20.5}],"next_page_token":"p2"}"#)
        .create();
    let second = server
        .mock("GET", "/environment/v1/data")
        .match_query(Matcher::Exact(
            "device_id=sv-1&page_token=p2&fields=temperature,humidity".into(),
        ))
        .with_status(200)
        .with_body(r#"{"device_id":"sv-1","data":[{"time":2,"humidity":41.0}],"next_page_token":""}"#)
        .create();

    let client = connect(&server, true);
    let data = client
        .sensor()
        .get_sensor_data(
            "sv-1",
            SensorDataOptions {
                fields: vec!["temperature".to_string(), "humidity".to_string()],
                ..Default::default()
            },
        )
        .unwrap();

    assert_eq!(data.data.len(), 2);
    assert_eq!(data.data[1].humidity, Some(41.0));
    first.assert();
    second.assert();
}

#[test]
fn test_profile_photo_upload_is_multipart() {
    let dir = tempfile::tempdir().unwrap();
    let photo = dir.path().join("face.jpg");
    fs::write(&photo, "not really a jpeg").unwrap();

    let mut server = Server::new();
    server
        .mock("POST", "/token")
        .with_status(200)
        .with_body(r#"{"token":"tok-abc"}"#)
        .create();
    let upload = server
        .mock("PUT", "/access/v1/access_users/user/profile_photo")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("user_id".into(), "u1".into()),
            Matcher::UrlEncoded("overwrite".into(), "true".into()),
        ]))
        .match_header("content-type", Matcher::Regex("^multipart/form-data; boundary=".into()))
        .match_body(Matcher::Regex(r#"filename="face.jpg""#.into()))
        .with_status(200)
        .with_body("{}")
        .create();

    let client = connect(&server, false);
    client
        .access()
        .upload_profile_photo(
            &verkada_client::models::platform::UserRef::by_user_id("u1"),
            Some(true),
            photo.to_str().unwrap(),
        )
        .unwrap();

    upload.assert();
}
