//! Local credential file loading.
//!
//! The file holds one `KEY:value` pair per line, for example
//! `API_KEY:abc123`. The first colon separates key from value, so values
//! may themselves contain colons. Blank lines and lines starting with `#`
//! are skipped.

use crate::error::Result;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Default credential file, relative to the working directory
pub const DEFAULT_ENV_FILE: &str = ".env";

/// Parse the content of a credential file into key/value pairs
pub fn parse_env(content: &str) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    for (number, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        match line.split_once(':') {
            Some((key, value)) if !key.trim().is_empty() => {
                pairs.push((key.trim().to_string(), value.trim().to_string()));
            }
            _ => warn!(line = number + 1, "skipping malformed credential line"),
        }
    }
    pairs
}

/// Load a credential file into the process environment.
///
/// # Returns
/// The number of variables set
pub fn load_env_file(path: impl AsRef<Path>) -> Result<usize> {
    let content = fs::read_to_string(path.as_ref())?;
    let pairs = parse_env(&content);
    for (key, value) in &pairs {
        std::env::set_var(key, value);
    }
    debug!(path = %path.as_ref().display(), count = pairs.len(), "loaded credential file");
    Ok(pairs.len())
}

/// Load `.env` from the working directory if it exists
pub fn load_default_env_file() -> Result<usize> {
    if Path::new(DEFAULT_ENV_FILE).is_file() {
        load_env_file(DEFAULT_ENV_FILE)
    } else {
        Ok(0)
    }
}
