use std::time::Duration;

use prompt_runtime::backend_client::DEFAULT_UPSTREAM_BASE_URL;

/// Proxy settings, read from the environment.
///
/// Env vars:
/// - `UPSTREAM_BASE_URL`: backend base URL (default: `http://127.0.0.1:5000`)
/// - `UPSTREAM_TIMEOUT_SECS`: per-request upstream timeout (default: none)
/// - `PROXY_BIND_ADDR`: listen address (default: `0.0.0.0`)
/// - `PROXY_PORT`: listen port (default: `3000`)
/// - `CORS_ALLOWED_ORIGINS`: `*`, empty, or a comma-separated origin list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyConfig {
    pub upstream_base_url: String,
    pub upstream_timeout: Option<Duration>,
    pub bind_addr: String,
    pub port: u16,
    pub cors_allowed_origins: String,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            upstream_base_url: DEFAULT_UPSTREAM_BASE_URL.to_string(),
            upstream_timeout: None,
            bind_addr: "0.0.0.0".to_string(),
            port: 3000,
            cors_allowed_origins: String::new(),
        }
    }
}

impl ProxyConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Unparseable numbers fall back to
    /// the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let upstream_timeout = lookup("UPSTREAM_TIMEOUT_SECS")
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs);

        let port = lookup("PROXY_PORT")
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.port);

        Self {
            upstream_base_url: lookup("UPSTREAM_BASE_URL")
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.upstream_base_url),
            upstream_timeout,
            bind_addr: lookup("PROXY_BIND_ADDR")
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.bind_addr),
            port,
            cors_allowed_origins: lookup("CORS_ALLOWED_ORIGINS").unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_when_unset() {
        let config = ProxyConfig::from_lookup(|_| None);
        assert_eq!(config, ProxyConfig::default());
        assert_eq!(config.upstream_base_url, "http://127.0.0.1:5000");
        assert!(config.upstream_timeout.is_none());
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("UPSTREAM_BASE_URL", "http://backend:5000"),
            ("UPSTREAM_TIMEOUT_SECS", "30"),
            ("PROXY_PORT", "8080"),
            ("CORS_ALLOWED_ORIGINS", "http://localhost:3001"),
        ]);
        let config = ProxyConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string()));

        assert_eq!(config.upstream_base_url, "http://backend:5000");
        assert_eq!(config.upstream_timeout, Some(Duration::from_secs(30)));
        assert_eq!(config.port, 8080);
        assert_eq!(config.bind_addr, "0.0.0.0");
        assert_eq!(config.cors_allowed_origins, "http://localhost:3001");
    }

    #[test]
    fn test_bad_numbers_fall_back() {
        let config = ProxyConfig::from_lookup(|k| match k {
            "PROXY_PORT" => Some("not-a-port".into()),
            "UPSTREAM_TIMEOUT_SECS" => Some("0".into()),
            _ => None,
        });
        assert_eq!(config.port, 3000);
        assert!(config.upstream_timeout.is_none());
    }
}
