use std::{env, time::Duration};

use shopkeep_etsy::DEFAULT_API_BASE_URL;

/// Server configuration loaded from environment variables.
///
/// OAuth and session settings live in [`shopkeep_auth::AuthConfig`].
#[derive(Debug, Clone)]
pub struct Config {
    /// Browser origin allowed by CORS (default: "http://localhost:3000")
    pub client_url: String,
    /// Etsy Open API base URL
    pub api_base_url: String,
    /// Per-request timeout in seconds (default: 30)
    pub request_timeout_secs: u64,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `CLIENT_URL` - Allowed browser origin (default: "http://localhost:3000")
    /// - `ETSY_API_BASE_URL` - Open API base (default: the production v3 application URL)
    /// - `REQUEST_TIMEOUT_SECS` - Request timeout in seconds (default: 30)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            client_url: env::var("CLIENT_URL").unwrap_or(defaults.client_url),
            api_base_url: env::var("ETSY_API_BASE_URL").unwrap_or(defaults.api_base_url),
            request_timeout_secs: env::var("REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|secs| *secs > 0)
                .unwrap_or(defaults.request_timeout_secs),
        }
    }

    /// Get the request timeout as a Duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            client_url: "http://localhost:3000".to_string(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_secs: 30,
        }
    }
}
