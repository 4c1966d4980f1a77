use crate::client::{create_rest_client, Config};
use crate::error::{Result, VerkadaError};
use crate::query::QueryParams;
use crate::token::{SessionToken, StreamingToken, TokenManager};
use crate::transport::{FilePart, HttpRequest, HttpResponse, RequestBody, ReqwestTransport, Transport};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};
use url::Url;

/// Function used to wait between rate-limited attempts
pub type Sleeper = Arc<dyn Fn(Duration) + Send + Sync>;

/// Client for the Verkada REST API.
///
/// Owns the API key, the session token and the HTTP transport. All methods
/// take `&self`; the session token is refreshed transparently before any
/// request that needs it.
pub struct Client {
    config: Config,
    transport: Arc<dyn Transport>,
    tokens: TokenManager,
    sleeper: Sleeper,
}

impl Client {
    /// Create a new client and exchange the API key for a first session token
    ///
    /// # Arguments
    /// * `api_key` - Organization API key
    /// * `config` - Region, pagination and retry settings
    pub fn new(api_key: impl Into<String>, config: Config) -> Result<Self> {
        let http = create_rest_client(&config)?;
        Client::with_transport(api_key, config, Arc::new(ReqwestTransport::new(http)))
    }

    /// Create a new client reading `API_KEY` from the environment.
    ///
    /// A `.env` file in the working directory is loaded first if present.
    pub fn from_env(config: Config) -> Result<Self> {
        crate::env::load_default_env_file()?;
        let api_key = std::env::var("API_KEY").map_err(|_| {
            VerkadaError::Config(
                "no environment variable \"API_KEY\", set it in a .env file or in the process environment"
                    .to_string(),
            )
        })?;
        Client::new(api_key, config)
    }

    /// Create a new client over a custom transport
    pub fn with_transport(
        api_key: impl Into<String>,
        config: Config,
        transport: Arc<dyn Transport>,
    ) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(VerkadaError::Config("API key is empty".to_string()));
        }

        let base_url = config.base_url();
        Url::parse(&base_url)?;

        let client = Client {
            tokens: TokenManager::new(api_key, base_url),
            config,
            transport,
            sleeper: Arc::new(std::thread::sleep),
        };
        client.tokens.ensure_valid_token(client.transport.as_ref())?;
        Ok(client)
    }

    /// Replace the function used to wait between rate-limited attempts
    pub fn with_sleeper(mut self, sleeper: impl Fn(Duration) + Send + Sync + 'static) -> Self {
        self.sleeper = Arc::new(sleeper);
        self
    }

    /// Get the client configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get the base URL requests are sent to
    pub fn base_url(&self) -> String {
        self.config.base_url()
    }

    /// Whether paginated endpoints follow every cursor
    pub fn auto_paginate(&self) -> bool {
        self.config.auto_paginate
    }

    /// Current session token, without refreshing
    pub fn session_token(&self) -> Option<SessionToken> {
        self.tokens.current()
    }

    /// Fetch a token for the streaming endpoints
    pub fn streaming_token(&self) -> Result<StreamingToken> {
        self.tokens.streaming_token(self.transport.as_ref())
    }

    /// Make an API request and decode the JSON response into the target type
    ///
    /// # Arguments
    /// * `method` - HTTP method
    /// * `path` - Endpoint path, starting with `/`
    /// * `params` - Query parameters
    /// * `body` - Optional JSON body
    ///
    /// # Returns
    /// The decoded response. Fields the target type does not declare are
    /// rejected as a [`VerkadaError::Decode`].
    pub fn request<P, B, T>(
        &self,
        method: Method,
        path: &str,
        params: &P,
        body: Option<&B>,
    ) -> Result<T>
    where
        P: QueryParams + ?Sized,
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.build_url(path, params)?;
        let mut request = HttpRequest::new(method, url).header("accept", "application/json");
        if let Some(body) = body {
            request = request
                .header("content-type", "application/json")
                .body(RequestBody::Json(serde_json::to_vec(body)?));
        }

        let response = self.execute(request)?;
        decode_response(&response)
    }

    /// GET without a body
    pub fn get<P, T>(&self, path: &str, params: &P) -> Result<T>
    where
        P: QueryParams + ?Sized,
        T: DeserializeOwned,
    {
        self.request(Method::GET, path, params, None::<&()>)
    }

    /// DELETE without a body
    pub fn delete<P, T>(&self, path: &str, params: &P) -> Result<T>
    where
        P: QueryParams + ?Sized,
        T: DeserializeOwned,
    {
        self.request(Method::DELETE, path, params, None::<&()>)
    }

    /// Request of any method without a body
    pub fn send<P, T>(&self, method: Method, path: &str, params: &P) -> Result<T>
    where
        P: QueryParams + ?Sized,
        T: DeserializeOwned,
    {
        self.request(method, path, params, None::<&()>)
    }

    /// Request with a JSON body
    pub fn send_json<P, B, T>(&self, method: Method, path: &str, params: &P, body: &B) -> Result<T>
    where
        P: QueryParams + ?Sized,
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(method, path, params, Some(body))
    }

    /// Upload a file as multipart/form-data and decode the JSON response
    ///
    /// The file is sent as a single part named `file`. CSV files are
    /// re-emitted line by line with CRLF endings; anything else is sent as is.
    pub fn request_with_file<P, T>(
        &self,
        method: Method,
        path: &str,
        params: &P,
        file_path: impl AsRef<Path>,
        mime_type: &str,
    ) -> Result<T>
    where
        P: QueryParams + ?Sized,
        T: DeserializeOwned,
    {
        let file_path = file_path.as_ref();
        let part = read_file_part(file_path, mime_type)?;
        let url = self.build_url(path, params)?;

        let request = HttpRequest::new(method, url)
            .header("accept", "application/json")
            .body(RequestBody::Multipart(part));

        let response = self.execute(request)?;
        decode_response(&response)
    }

    /// Download the raw response body into a file, overwriting it.
    ///
    /// Nothing is written when the API answers with an error status.
    pub fn request_for_file<P>(
        &self,
        method: Method,
        path: &str,
        params: &P,
        destination: impl AsRef<Path>,
    ) -> Result<()>
    where
        P: QueryParams + ?Sized,
    {
        let url = self.build_url(path, params)?;
        let response = self.execute(HttpRequest::new(method, url))?;
        if !response.is_success() {
            return Err(VerkadaError::Http {
                status: response.status,
                body: response.text(),
            });
        }

        fs::write(destination.as_ref(), &response.body)?;
        debug!(
            destination = %destination.as_ref().display(),
            bytes = response.body.len(),
            "downloaded file"
        );
        Ok(())
    }

    /// Build the absolute URL for a path and its query parameters
    pub fn build_url<P>(&self, path: &str, params: &P) -> Result<String>
    where
        P: QueryParams + ?Sized,
    {
        let mut url = Url::parse(&format!("{}{}", self.config.base_url(), path))?;
        let query = params.to_query();
        if !query.is_empty() {
            url.set_query(Some(&query));
        }
        Ok(url.to_string())
    }

    /// Send a request with a fresh token, retrying while the API answers 429
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        let policy = &self.config.retry;
        let mut attempt: u32 = 0;

        loop {
            let token = self.tokens.ensure_valid_token(self.transport.as_ref())?;
            let mut current = request.clone();
            current.set_header("x-verkada-auth", token);

            let start = Instant::now();
            let response = self.transport.send(&current)?;
            debug!(
                method = %current.method,
                url = %current.url,
                status = response.status,
                elapsed = ?start.elapsed(),
                "request complete"
            );

            if response.status != 429 {
                return Ok(response);
            }

            if attempt >= policy.max_retries {
                warn!(url = %current.url, attempts = attempt + 1, "giving up after repeated 429 responses");
                return Err(VerkadaError::RateLimitExceeded {
                    attempts: attempt + 1,
                });
            }

            let delay = policy.delay_for(attempt);
            warn!(url = %current.url, attempt, ?delay, "rate limited, backing off");
            (self.sleeper)(delay);
            attempt += 1;
        }
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("config", &self.config)
            .field("tokens", &self.tokens)
            .finish_non_exhaustive()
    }
}

/// Decode a response body, rejecting unknown fields on the target type.
/// An empty body decodes like `{}`.
pub fn decode_response<T: DeserializeOwned>(response: &HttpResponse) -> Result<T> {
    if !response.is_success() {
        return Err(VerkadaError::Http {
            status: response.status,
            body: response.text(),
        });
    }

    let body: &[u8] = if response.body.iter().all(u8::is_ascii_whitespace) {
        b"{}"
    } else {
        &response.body
    };

    serde_json::from_slice(body).map_err(|e| VerkadaError::Decode {
        status: response.status,
        body: response.text(),
        source: e,
    })
}

/// Read a file into a multipart part named `file`
fn read_file_part(file_path: &Path, mime_type: &str) -> Result<FilePart> {
    let raw = fs::read(file_path)?;
    let bytes = if mime_type == "text/csv" {
        normalize_line_endings(&raw)
    } else {
        raw
    };

    let file_name = file_path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| file_path.display().to_string());

    Ok(FilePart {
        field_name: "file".to_string(),
        file_name,
        mime_type: mime_type.to_string(),
        bytes,
    })
}

/// Re-emit every line followed by CRLF, whatever the original line ending
fn normalize_line_endings(raw: &[u8]) -> Vec<u8> {
    let mut lines: Vec<&[u8]> = raw.split(|b| *b == b'\n').collect();
    // a trailing newline does not start another line
    if raw.is_empty() || raw.ends_with(b"\n") {
        lines.pop();
    }

    let mut out = Vec::with_capacity(raw.len() + lines.len());
    for line in lines {
        let line = line.strip_suffix(b"\r").unwrap_or(line);
        out.extend_from_slice(line);
        out.extend_from_slice(b"\r\n");
    }
    out
}
