//! Configuration module for StatusBoard.
//!
//! Loads configuration from environment variables with sensible defaults.

use std::env;
use std::time::Duration;

/// Default endpoint of the uptime-monitoring API.
pub const DEFAULT_API_URL: &str = "https://api.uptimerobot.com/v2/getMonitors";

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP port for the web server (default: 8080)
    pub http_port: u16,
    /// Settings handed to the upstream client
    pub upstream: UpstreamConfig,
}

/// Settings for talking to the uptime-monitoring API.
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    /// API key; `None` is reported as a configuration error on first use.
    pub api_key: Option<String>,
    /// Full URL of the `getMonitors` endpoint
    pub api_url: String,
    /// Bound on a single upstream call (default: 10s)
    pub timeout: Duration,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_port: 8080,
            upstream: UpstreamConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `UPTIMEROBOT_API_KEY`: upstream API key (no default)
    /// - `STATUSBOARD_HTTP_PORT`: HTTP port (default: 8080)
    /// - `STATUSBOARD_API_URL`: upstream endpoint (default: UptimeRobot v2 `getMonitors`)
    /// - `STATUSBOARD_TIMEOUT_SECS`: upstream timeout in seconds (default: 10)
    pub fn load() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        if let Some(port) = lookup("STATUSBOARD_HTTP_PORT").and_then(|s| s.parse().ok()) {
            cfg.http_port = port;
        }

        cfg.upstream.api_key = lookup("UPTIMEROBOT_API_KEY")
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());

        if let Some(url) = lookup("STATUSBOARD_API_URL").filter(|u| !u.is_empty()) {
            cfg.upstream.api_url = url;
        }

        if let Some(secs) = lookup("STATUSBOARD_TIMEOUT_SECS").and_then(|s| s.parse::<u64>().ok()) {
            if secs > 0 {
                cfg.upstream.timeout = Duration::from_secs(secs);
            }
        }

        cfg
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let cfg = ServerConfig::default();
        assert_eq!(cfg.http_port, 8080);
        assert_eq!(cfg.upstream.api_url, DEFAULT_API_URL);
        assert_eq!(cfg.upstream.timeout, Duration::from_secs(10));
        assert!(cfg.upstream.api_key.is_none());
    }

    #[test]
    fn test_overrides() {
        let cfg = ServerConfig::from_lookup(lookup_from(&[
            ("STATUSBOARD_HTTP_PORT", "9000"),
            ("UPTIMEROBOT_API_KEY", " ur-123 "),
            ("STATUSBOARD_API_URL", "http://localhost:1234/getMonitors"),
            ("STATUSBOARD_TIMEOUT_SECS", "5"),
        ]));
        assert_eq!(cfg.http_port, 9000);
        assert_eq!(cfg.upstream.api_key.as_deref(), Some("ur-123"));
        assert_eq!(cfg.upstream.api_url, "http://localhost:1234/getMonitors");
        assert_eq!(cfg.upstream.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_invalid_values_keep_defaults() {
        let cfg = ServerConfig::from_lookup(lookup_from(&[
            ("STATUSBOARD_HTTP_PORT", "not-a-port"),
            ("UPTIMEROBOT_API_KEY", "   "),
            ("STATUSBOARD_TIMEOUT_SECS", "0"),
        ]));
        assert_eq!(cfg.http_port, 8080);
        assert!(cfg.upstream.api_key.is_none());
        assert_eq!(cfg.upstream.timeout, Duration::from_secs(10));
    }
}
