//! Client configuration parsed from environment variables.

pub const DEFAULT_API_URL: &str = "http://localhost:8080";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Connection settings shared by the auth gateway and the request pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Backend origin, no trailing slash (e.g. `http://localhost:8080`).
    pub base_url: String,
    pub request_timeout_secs: u64,
    pub connect_timeout_secs: u64,
}

impl ApiConfig {
    /// Build a config for the given backend origin with default timeouts.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
        }
    }

    /// Build config from environment variables.
    ///
    /// Optional:
    /// - `SHOPEASY_API_URL`: backend origin, default `http://localhost:8080`
    /// - `SHOPEASY_REQUEST_TIMEOUT_SECS`: default 30
    /// - `SHOPEASY_CONNECT_TIMEOUT_SECS`: default 10
    #[must_use]
    pub fn from_env() -> Self {
        let base_url = std::env::var("SHOPEASY_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let mut config = Self::new(base_url);
        config.request_timeout_secs =
            env_parse_u64("SHOPEASY_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS);
        config.connect_timeout_secs =
            env_parse_u64("SHOPEASY_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS);
        config
    }
}

fn env_parse_u64(key: &str, default: u64) -> u64 {
    std::env::var(key).ok().and_then(|raw| raw.trim().parse().ok()).unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
