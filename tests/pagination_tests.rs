mod common;

use common::{client, config, path_of, ScriptedTransport};
use verkada_client::models::guest::VisitsOptions;
use verkada_client::models::platform::AuditLogOptions;
use verkada_client::VerkadaError;

fn audit_page(event: &str, token: &str) -> String {
    format!(
        r#"{{"audit_logs":[{{"event_name":"{}"}}],"next_page_token":"{}"}}"#,
        event, token
    )
}

#[test]
fn test_pages_are_followed_until_cursor_is_empty() {
    let transport = ScriptedTransport::new();
    transport
        .reply(200, &audit_page("a", "tok1"))
        .reply(200, &audit_page("b", "tok2"))
        .reply(200, &audit_page("c", ""));
    let (client, _) = client(&transport, config().with_auto_paginate(true));

    let logs = client
        .core()
        .get_audit_logs(AuditLogOptions {
            page_size: Some(1),
            ..Default::default()
        })
        .unwrap();

    let names: Vec<_> = logs
        .audit_logs
        .iter()
        .map(|l| l.event_name.as_deref().unwrap())
        .collect();
    assert_eq!(names, ["a", "b", "c"]);

    let paths: Vec<_> = transport
        .requests()
        .iter()
        .map(|r| path_of(r).to_string())
        .collect();
    assert_eq!(
        paths,
        [
            "/core/v1/audit_log?page_size=1",
            "/core/v1/audit_log?page_token=tok1&page_size=1",
            "/core/v1/audit_log?page_token=tok2&page_size=1",
        ]
    );
}

#[test]
fn test_repeated_cursor_stops_pagination() {
    let transport = ScriptedTransport::new();
    transport
        .reply(200, &audit_page("a", "tok1"))
        .reply(200, &audit_page("b", "tok1"))
        .reply(200, &audit_page("c", ""));
    let (client, _) = client(&transport, config().with_auto_paginate(true));

    let logs = client.core().get_audit_logs(AuditLogOptions::default()).unwrap();

    assert_eq!(logs.audit_logs.len(), 2);
    assert_eq!(logs.next_page_token.as_deref(), Some("tok1"));
    assert_eq!(transport.requests().len(), 2);
}

#[test]
fn test_first_page_only_without_auto_paginate() {
    let transport = ScriptedTransport::new();
    transport.reply(200, &audit_page("a", "tok1"));
    let (client, _) = client(&transport, config().with_auto_paginate(false));

    let logs = client.core().get_audit_logs(Default::default()).unwrap();

    assert_eq!(logs.audit_logs.len(), 1);
    assert_eq!(logs.next_page_token.as_deref(), Some("tok1"));
    assert_eq!(transport.requests().len(), 1);
}

#[test]
fn test_failed_page_keeps_earlier_pages() {
    let transport = ScriptedTransport::new();
    transport
        .reply(200, &audit_page("a", "tok1"))
        .reply(500, "internal error");
    let (client, _) = client(&transport, config().with_auto_paginate(true));

    let failure = client.core().get_audit_logs(Default::default()).unwrap_err();

    let partial = failure.partial.as_ref().unwrap();
    assert_eq!(partial.audit_logs.len(), 1);
    assert_eq!(failure.error.status_code(), Some(500));
}

#[test]
fn test_failed_first_page_has_no_partial() {
    let transport = ScriptedTransport::new();
    transport.reply(404, "no such site");
    let (client, _) = client(&transport, config().with_auto_paginate(true));

    let failure = client.core().get_audit_logs(Default::default()).unwrap_err();
    assert!(failure.partial.is_none());
    assert!(failure.into_error().is_not_found());
}

#[test]
fn test_invalid_page_size_sends_nothing() {
    let transport = ScriptedTransport::new();
    let (client, _) = client(&transport, config());

    let failure = client
        .core()
        .get_audit_logs(AuditLogOptions {
            page_size: Some(500),
            ..Default::default()
        })
        .unwrap_err();

    assert!(matches!(failure.error, VerkadaError::Validation(_)));
    assert!(transport.requests().is_empty());
}

#[test]
fn test_visit_cursor_comes_from_last_visit() {
    let transport = ScriptedTransport::new();
    transport
        .reply(
            200,
            r#"{"visits":[{"visit_id":"v1","next_page_token":""},{"visit_id":"v2","next_page_token":"n1"}]}"#,
        )
        .reply(200, r#"{"visits":[{"visit_id":"v3","next_page_token":null}]}"#);
    let (client, _) = client(&transport, config().with_auto_paginate(true));

    let visits = client
        .guest()
        .get_guest_visits("site-1", 1_000, 2_000, VisitsOptions::default())
        .unwrap();

    assert_eq!(visits.visits.len(), 3);
    let second = &transport.requests()[1];
    assert_eq!(
        path_of(second),
        "/guest/v1/visits?site_id=site-1&start_time=1000&end_time=2000&page_token=n1"
    );
}

#[test]
fn test_visit_window_is_limited_to_a_day() {
    let transport = ScriptedTransport::new();
    let (client, _) = client(&transport, config());

    let failure = client
        .guest()
        .get_guest_visits("site-1", 0, 86_401, VisitsOptions::default())
        .unwrap_err();

    assert!(failure.error.is_validation());
    assert!(transport.requests().is_empty());
}
