//! Client configuration.
//!
//! The base URL comes from the environment; the token file lives in the
//! platform data directory. Both can be overridden explicitly, which is
//! how tests point the client at a mock server and a temp directory.

use std::path::PathBuf;
use std::time::Duration;

/// Environment variable naming the API base URL.
pub const API_URL_ENV: &str = "NOTESPACE_API_URL";

/// Default base URL for local development.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Per-request timeout.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Settings for one [`crate::ApiClient`] instance.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API origin, no trailing slash.
    pub base_url: String,
    /// Applied to every request.
    pub timeout: Duration,
    /// Durable location for the session token, or `None` to keep the
    /// session in memory only.
    pub token_path: Option<PathBuf>,
}

impl ClientConfig {
    /// Configuration from `NOTESPACE_API_URL`, falling back to the local
    /// development URL.
    pub fn from_env() -> Self {
        let base_url = std::env::var(API_URL_ENV)
            .ok()
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        Self::new(base_url)
    }

    /// Configuration for an explicit base URL. Trailing slashes are
    /// trimmed so paths can be appended verbatim.
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            token_path: default_token_path(),
        }
    }

    /// Override the token file location, or disable durable storage with
    /// `None`.
    pub fn with_token_path(mut self, path: Option<PathBuf>) -> Self {
        self.token_path = path;
        self
    }
}

/// Platform data directory for the token file.
///
/// `None` when no home directory can be resolved (e.g. a stripped-down
/// container); the session then runs memory-only.
fn default_token_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "notespace")
        .map(|dirs| dirs.data_dir().join("token"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slashes_are_trimmed() {
        let config = ClientConfig::new("http://api.example.com///");
        assert_eq!(config.base_url, "http://api.example.com");
    }

    #[test]
    fn bare_url_is_kept() {
        let config = ClientConfig::new("https://notes.example.com:8443");
        assert_eq!(config.base_url, "https://notes.example.com:8443");
    }

    #[test]
    fn token_path_override() {
        let config = ClientConfig::new(DEFAULT_API_URL).with_token_path(None);
        assert!(config.token_path.is_none());
    }
}
