#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use verkada_client::transport::{HttpRequest, HttpResponse, Transport};
use verkada_client::{Client, Config, Result, VerkadaError};

pub const BASE_URL: &str = "https://api.test";
pub const SESSION_TOKEN: &str = "session-1";

/// Transport answering `/token` itself and every other request from a
/// script, in order. Requests are recorded for inspection.
#[derive(Default)]
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<Result<HttpResponse>>>,
    requests: Mutex<Vec<HttpRequest>>,
    token_calls: AtomicUsize,
}

impl ScriptedTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(ScriptedTransport::default())
    }

    pub fn reply(&self, status: u16, body: &str) -> &Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(HttpResponse::new(status, body)));
        self
    }

    /// Fail the next request as if the connection could not be made
    pub fn network_error(&self) -> &Self {
        let error = reqwest::blocking::Client::new()
            .get("not a url")
            .build()
            .unwrap_err();
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(VerkadaError::Request(error)));
        self
    }

    /// Recorded requests, token exchanges excluded
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn token_calls(&self) -> usize {
        self.token_calls.load(Ordering::SeqCst)
    }
}

impl Transport for ScriptedTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse> {
        if request.url == format!("{}/token", BASE_URL) {
            self.token_calls.fetch_add(1, Ordering::SeqCst);
            return Ok(HttpResponse::new(
                200,
                format!(r#"{{"token":"{}"}}"#, SESSION_TOKEN),
            ));
        }

        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(HttpResponse::new(500, "no scripted response")))
    }
}

pub fn config() -> Config {
    Config::default().with_base_url(BASE_URL)
}

/// Client over `transport` that records backoff delays instead of sleeping
pub fn client(transport: &Arc<ScriptedTransport>, config: Config) -> (Client, Arc<Mutex<Vec<Duration>>>) {
    let sleeps = Arc::new(Mutex::new(Vec::new()));
    let recorded = sleeps.clone();
    let client = Client::with_transport("test-api-key", config, transport.clone())
        .unwrap()
        .with_sleeper(move |delay| recorded.lock().unwrap().push(delay));
    (client, sleeps)
}

/// Path and query of a recorded request, without the base URL
pub fn path_of(request: &HttpRequest) -> &str {
    request.url.strip_prefix(BASE_URL).unwrap_or(&request.url)
}
