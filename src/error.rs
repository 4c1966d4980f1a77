use thiserror::Error;

/// Main error type for Verkada API operations
#[derive(Debug, Error)]
pub enum VerkadaError {
    /// Invalid client configuration (unknown region, missing API key)
    #[error("configuration error: {0}")]
    Config(String),

    /// The API key could not be exchanged for a session token
    #[error("authentication failed: {message}")]
    Auth {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Caller-supplied parameters violate a documented rule; raised before any I/O
    #[error("invalid parameters: {0}")]
    Validation(String),

    /// Transport-level failure (DNS, connection, timeout)
    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),

    /// A successful response whose body did not match the target schema
    #[error("failed to decode response (status {status}): {source}, response: {body}")]
    Decode {
        status: u16,
        body: String,
        #[source]
        source: serde_json::Error,
    },

    /// Non-success HTTP status other than 429
    #[error("HTTP error {status}: {body}")]
    Http { status: u16, body: String },

    /// The endpoint kept answering 429 after every allowed retry
    #[error("rate limit exceeded after {attempts} attempts")]
    RateLimitExceeded { attempts: u32 },

    /// JSON serialization of a request body failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing error
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// IO error (file upload/download)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl VerkadaError {
    /// Create a new validation error
    pub fn validation(message: impl Into<String>) -> Self {
        VerkadaError::Validation(message.into())
    }

    /// Create a new authentication error
    pub fn auth(
        message: impl Into<String>,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        VerkadaError::Auth {
            message: message.into(),
            source,
        }
    }

    /// Check if this error was raised by input validation
    pub fn is_validation(&self) -> bool {
        matches!(self, VerkadaError::Validation(_))
    }

    /// Check if this error is a not found error (404)
    pub fn is_not_found(&self) -> bool {
        self.status_code() == Some(404)
    }

    /// Get the HTTP status code if the error carries one
    pub fn status_code(&self) -> Option<u16> {
        match self {
            VerkadaError::Decode { status, .. } => Some(*status),
            VerkadaError::Http { status, .. } => Some(*status),
            VerkadaError::RateLimitExceeded { .. } => Some(429),
            VerkadaError::Request(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Result type for Verkada operations
pub type Result<T> = std::result::Result<T, VerkadaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_not_found() {
        let error = VerkadaError::Http {
            status: 404,
            body: "{\"message\":\"not found\"}".to_string(),
        };
        assert!(error.is_not_found());
        assert_eq!(error.status_code(), Some(404));
    }

    #[test]
    fn test_decode_error_carries_body() {
        let source = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let error = VerkadaError::Decode {
            status: 200,
            body: "not json".to_string(),
            source,
        };
        let message = error.to_string();
        assert!(message.contains("status 200"));
        assert!(message.contains("not json"));
        assert!(!error.is_validation());
    }

    #[test]
    fn test_rate_limit_status() {
        let error = VerkadaError::RateLimitExceeded { attempts: 9 };
        assert_eq!(error.status_code(), Some(429));
    }
}
