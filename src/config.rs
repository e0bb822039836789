use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_ROUTER_BASE: &str = "/";

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub api_base_url: String,
    /// `None` means requests wait for the backend indefinitely.
    pub timeout: Option<Duration>,
    pub router_base: String,
    pub log_level: String,
    /// Directory for the rolling log file; `None` keeps logs on stdout only.
    pub log_dir: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout: None,
            router_base: DEFAULT_ROUTER_BASE.to_string(),
            log_level: "info".to_string(),
            log_dir: None,
        }
    }
}

impl ClientConfig {
    /// Reads `.env` (if present) and then the process environment.
    pub fn load() -> Self {
        let _ = dotenvy::dotenv();
        Self::from_env()
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_base_url = get("DANCI_API_BASE_URL")
            .map(|v| v.trim().to_string())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

        let timeout = get("DANCI_API_TIMEOUT_MS")
            .and_then(|value| value.trim().parse::<u64>().ok())
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis);

        let router_base = get("DANCI_ROUTER_BASE")
            .map(|v| v.trim().to_string())
            .unwrap_or_else(|| DEFAULT_ROUTER_BASE.to_string());

        let log_level = get("RUST_LOG").unwrap_or_else(|| "info".to_string());

        let file_logs = get("ENABLE_FILE_LOGS")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);
        let log_dir = file_logs
            .then(|| get("LOG_DIR").unwrap_or_else(|| "./logs".to_string()))
            .map(PathBuf::from);

        Self {
            api_base_url,
            timeout,
            router_base,
            log_level,
            log_dir,
        }
    }

    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = ClientConfig::from_lookup(lookup(&[]));
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.api_base_url, "http://127.0.0.1:8000");
        assert!(config.timeout.is_none());
    }

    #[test]
    fn test_reads_overrides() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("DANCI_API_BASE_URL", " https://tutor.example.com/api "),
            ("DANCI_API_TIMEOUT_MS", "2500"),
            ("DANCI_ROUTER_BASE", "/app/"),
            ("RUST_LOG", "debug"),
        ]));
        assert_eq!(config.api_base_url, "https://tutor.example.com/api");
        assert_eq!(config.timeout, Some(Duration::from_millis(2500)));
        assert_eq!(config.router_base, "/app/");
        assert_eq!(config.log_level, "debug");
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn test_file_logs_need_explicit_opt_in() {
        let config = ClientConfig::from_lookup(lookup(&[("LOG_DIR", "/var/log/danci")]));
        assert!(config.log_dir.is_none());

        let config = ClientConfig::from_lookup(lookup(&[("ENABLE_FILE_LOGS", "1")]));
        assert_eq!(config.log_dir, Some(PathBuf::from("./logs")));

        let config = ClientConfig::from_lookup(lookup(&[
            ("ENABLE_FILE_LOGS", "true"),
            ("LOG_DIR", "/var/log/danci"),
        ]));
        assert_eq!(config.log_dir, Some(PathBuf::from("/var/log/danci")));
    }

    #[test]
    fn test_invalid_or_zero_timeout_means_none() {
        for raw in ["", "abc", "0", "-5"] {
            let config = ClientConfig::from_lookup(lookup(&[("DANCI_API_TIMEOUT_MS", raw)]));
            assert!(config.timeout.is_none(), "timeout for {raw:?}");
        }
    }

    #[test]
    fn test_blank_base_url_falls_back() {
        let config = ClientConfig::from_lookup(lookup(&[("DANCI_API_BASE_URL", "   ")]));
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
    }
}
