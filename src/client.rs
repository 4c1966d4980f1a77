use crate::error::{Result, VerkadaError};
use reqwest::blocking::{Client, ClientBuilder};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Create the HTTP client used for every API request
/// with connection pooling and the configured timeouts
pub fn create_rest_client(config: &Config) -> Result<Client> {
    let client = ClientBuilder::new()
        .pool_max_idle_per_host(50)
        .timeout(config.timeout)
        .connect_timeout(config.connect_timeout)
        .build()?;
    Ok(client)
}

/// Regional API shard. Chosen once at client construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Region {
    /// United States (`prod1`)
    #[default]
    Prod1,
    /// Europe (`prod2`)
    Prod2,
    /// Australia (`au`)
    Au,
}

impl Region {
    /// Base URL for the region
    pub fn base_url(&self) -> &'static str {
        match self {
            Region::Prod1 => "https://api.verkada.com",
            Region::Prod2 => "https://api.eu.verkada.com",
            Region::Au => "https://api.au.verkada.com",
        }
    }

    /// Short shard name as used in configuration files
    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Prod1 => "prod1",
            Region::Prod2 => "prod2",
            Region::Au => "au",
        }
    }
}

impl FromStr for Region {
    type Err = VerkadaError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "prod1" => Ok(Region::Prod1),
            "prod2" => Ok(Region::Prod2),
            "au" => Ok(Region::Au),
            other => Err(VerkadaError::Config(format!(
                "invalid region/shard, must be \"prod1\", \"prod2\", or \"au\" - received {}",
                other
            ))),
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Backoff applied when the API answers 429 Too Many Requests.
///
/// The delay before retry `n` (0-based) is `base_delay * 2^n`, capped at
/// `max_delay`. After `max_retries` retries the call fails with
/// [`VerkadaError::RateLimitExceeded`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy {
            max_retries: 8,
            base_delay: Duration::from_millis(50),
            max_delay: Duration::from_secs(10),
        }
    }
}

impl RetryPolicy {
    /// Delay to wait before the retry following attempt `attempt`
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 2u32.checked_pow(attempt).unwrap_or(u32::MAX);
        self.base_delay
            .checked_mul(factor)
            .unwrap_or(self.max_delay)
            .min(self.max_delay)
    }
}

/// Configuration for the API client
#[derive(Debug, Clone)]
pub struct Config {
    /// Regional shard
    pub region: Region,
    /// Overrides the region's base URL (proxies, test servers)
    pub base_url: Option<String>,
    /// Merge every page of paginated endpoints into one response
    pub auto_paginate: bool,
    /// 429 backoff policy
    pub retry: RetryPolicy,
    /// Whole-request timeout
    pub timeout: Duration,
    /// TCP connect timeout
    pub connect_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            region: Region::default(),
            base_url: None,
            auto_paginate: false,
            retry: RetryPolicy::default(),
            timeout: Duration::from_secs(300), // 5 minutes
            connect_timeout: Duration::from_secs(10),
        }
    }
}

impl Config {
    /// Create a new configuration for the given region
    pub fn new(region: Region) -> Self {
        Config {
            region,
            ..Config::default()
        }
    }

    /// Enable or disable auto-pagination
    pub fn with_auto_paginate(mut self, auto_paginate: bool) -> Self {
        self.auto_paginate = auto_paginate;
        self
    }

    /// Point the client at a different host than the region's
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the 429 retry policy
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Get the base URL for API requests, without trailing slash
    pub fn base_url(&self) -> String {
        match self.base_url {
            Some(ref url) => url.trim_end_matches('/').to_string(),
            None => self.region.base_url().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_parsing() {
        assert_eq!("prod1".parse::<Region>().unwrap(), Region::Prod1);
        assert_eq!("prod2".parse::<Region>().unwrap(), Region::Prod2);
        assert_eq!("au".parse::<Region>().unwrap(), Region::Au);

        let err = "us-east".parse::<Region>().unwrap_err();
        assert!(matches!(err, VerkadaError::Config(_)));
    }

    #[test]
    fn test_config_base_url() {
        let config = Config::new(Region::Prod2);
        assert_eq!(config.base_url(), "https://api.eu.verkada.com");

        let config = Config::default().with_base_url("http://localhost:8080/");
        assert_eq!(config.base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_retry_delays() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_for(0), Duration::from_millis(50));
        assert_eq!(policy.delay_for(1), Duration::from_millis(100));
        assert_eq!(policy.delay_for(3), Duration::from_millis(400));
        assert_eq!(policy.delay_for(20), Duration::from_secs(10));
        assert_eq!(policy.delay_for(64), Duration::from_secs(10));
    }
}
