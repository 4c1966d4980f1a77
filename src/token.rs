use crate::error::{Result, VerkadaError};
use crate::transport::{HttpRequest, Transport};
use chrono::{DateTime, Duration, Utc};
use reqwest::Method;
use serde::Deserialize;
use std::fmt;
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, info};

/// Local validity window of a session token. Shorter than the lifetime the
/// server advertises so a token never expires mid-request.
pub const TOKEN_VALIDITY_MINUTES: i64 = 29;

/// SessionToken is a short-lived bearer token derived from the API key.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken {
    /// Value sent in the `x-verkada-auth` header
    pub token: String,
    /// Instant from which the token is considered stale
    pub expires_at: DateTime<Utc>,
}

impl SessionToken {
    pub fn new(token: String, expires_at: DateTime<Utc>) -> Self {
        SessionToken { token, expires_at }
    }

    /// A token valid for the standard local window starting now
    pub fn issued_now(token: String) -> Self {
        SessionToken::new(token, Utc::now() + Duration::minutes(TOKEN_VALIDITY_MINUTES))
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionToken")
            .field("token", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    token: String,
}

/// Token used to authorize HLS streaming requests
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamingToken {
    #[serde(default)]
    pub accessible_cameras: Vec<String>,
    #[serde(default)]
    pub accessible_sites: Vec<String>,
    pub expiration: Option<i64>,
    pub expires_at: Option<i64>,
    pub jwt: String,
    #[serde(default)]
    pub permission: Vec<String>,
}

/// Owns the API key and the current session token, refreshing the token
/// lazily whenever a request needs it.
pub struct TokenManager {
    api_key: String,
    base_url: String,
    current: Mutex<Option<SessionToken>>,
}

impl TokenManager {
    pub fn new(api_key: String, base_url: String) -> Self {
        TokenManager {
            api_key,
            base_url,
            current: Mutex::new(None),
        }
    }

    /// Seed the manager with an existing token
    pub fn with_token(self, token: SessionToken) -> Self {
        *self.lock() = Some(token);
        self
    }

    /// Current token, if any, without refreshing
    pub fn current(&self) -> Option<SessionToken> {
        self.lock().clone()
    }

    /// Return a valid session token, exchanging the API key for a new one
    /// if the cached token is missing or stale.
    ///
    /// The lock is held across the exchange so concurrent callers on the
    /// same client wait for one refresh instead of racing.
    pub fn ensure_valid_token(&self, transport: &dyn Transport) -> Result<String> {
        let mut current = self.lock();
        if let Some(ref token) = *current {
            if !token.is_expired() {
                return Ok(token.token.clone());
            }
            debug!(expires_at = %token.expires_at, "session token expired");
        }

        let token = self.exchange(transport)?;
        let value = token.token.clone();
        *current = Some(token);
        Ok(value)
    }

    /// Exchange the API key for a fresh session token
    fn exchange(&self, transport: &dyn Transport) -> Result<SessionToken> {
        let request = HttpRequest::new(Method::POST, format!("{}/token", self.base_url))
            .header("accept", "application/json")
            .header("x-api-key", self.api_key.clone());

        let response = transport.send(&request).map_err(|e| {
            VerkadaError::auth("could not retrieve session token", Some(Box::new(e)))
        })?;

        if !response.is_success() {
            return Err(VerkadaError::auth(
                format!(
                    "token exchange failed with status {}: {}",
                    response.status,
                    response.text()
                ),
                None,
            ));
        }

        let parsed: TokenResponse = serde_json::from_slice(&response.body).map_err(|e| {
            VerkadaError::auth(
                format!("error parsing token response: {}", response.text()),
                Some(Box::new(e)),
            )
        })?;

        info!("obtained new session token");
        Ok(SessionToken::issued_now(parsed.token))
    }

    /// Fetch a streaming token with the API key
    pub fn streaming_token(&self, transport: &dyn Transport) -> Result<StreamingToken> {
        let request = HttpRequest::new(
            Method::GET,
            format!("{}/cameras/v1/footage/token", self.base_url),
        )
        .header("accept", "application/json")
        .header("x-api-key", self.api_key.clone());

        let response = transport.send(&request).map_err(|e| {
            VerkadaError::auth("could not retrieve streaming token", Some(Box::new(e)))
        })?;

        if !response.is_success() {
            return Err(VerkadaError::auth(
                format!(
                    "streaming token request failed with status {}: {}",
                    response.status,
                    response.text()
                ),
                None,
            ));
        }

        serde_json::from_slice(&response.body).map_err(|e| VerkadaError::Decode {
            status: response.status,
            body: response.text(),
            source: e,
        })
    }

    fn lock(&self) -> MutexGuard<'_, Option<SessionToken>> {
        // A panic while holding the lock cannot leave a half-written token behind
        self.current.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl fmt::Debug for TokenManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenManager")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("current", &self.current())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::HttpResponse;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct TokenServer {
        calls: AtomicUsize,
        status: u16,
        body: &'static str,
    }

    impl TokenServer {
        fn new(status: u16, body: &'static str) -> Self {
            TokenServer {
                calls: AtomicUsize::new(0),
                status,
                body,
            }
        }
    }

    impl Transport for TokenServer {
        fn send(&self, request: &HttpRequest) -> Result<HttpResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            assert_eq!(request.method, Method::POST);
            assert_eq!(request.url, "https://api.example.test/token");
            assert_eq!(request.header_value("x-api-key"), Some("secret"));
            Ok(HttpResponse::new(self.status, self.body))
        }
    }

    fn manager() -> TokenManager {
        TokenManager::new("secret".to_string(), "https://api.example.test".to_string())
    }

    #[test]
    fn test_expired_token_triggers_one_exchange() {
        let server = TokenServer::new(200, r#"{"token":"fresh"}"#);
        let manager = manager().with_token(SessionToken::new(
            "stale".to_string(),
            Utc::now() - Duration::minutes(1),
        ));

        assert_eq!(manager.ensure_valid_token(&server).unwrap(), "fresh");
        assert_eq!(server.calls.load(Ordering::SeqCst), 1);

        // the refreshed token is reused
        assert_eq!(manager.ensure_valid_token(&server).unwrap(), "fresh");
        assert_eq!(server.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_valid_token_skips_exchange() {
        let server = TokenServer::new(200, r#"{"token":"fresh"}"#);
        let manager = manager().with_token(SessionToken::new(
            "cached".to_string(),
            Utc::now() + Duration::minutes(5),
        ));

        assert_eq!(manager.ensure_valid_token(&server).unwrap(), "cached");
        assert_eq!(server.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_new_token_uses_local_window() {
        let server = TokenServer::new(200, r#"{"token":"fresh","expires":99999}"#);
        let manager = manager();
        manager.ensure_valid_token(&server).unwrap();

        let token = manager.current().unwrap();
        let remaining = token.expires_at - Utc::now();
        assert!(remaining <= Duration::minutes(TOKEN_VALIDITY_MINUTES));
        assert!(remaining > Duration::minutes(TOKEN_VALIDITY_MINUTES - 1));
    }

    #[test]
    fn test_malformed_body_is_auth_error() {
        let server = TokenServer::new(200, "<html>oops</html>");
        let err = manager().ensure_valid_token(&server).unwrap_err();
        assert!(matches!(err, VerkadaError::Auth { .. }));
    }

    #[test]
    fn test_rejected_key_is_auth_error() {
        let server = TokenServer::new(401, r#"{"message":"unauthorized"}"#);
        let err = manager().ensure_valid_token(&server).unwrap_err();
        assert!(matches!(err, VerkadaError::Auth { .. }));
        assert!(err.to_string().contains("401"));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let manager = manager().with_token(SessionToken::issued_now("tok".to_string()));
        let printed = format!("{:?}", manager);
        assert!(!printed.contains("secret"));
        assert!(!printed.contains("\"tok\""));
    }
}
