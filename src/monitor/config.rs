//! Monitor configuration

use std::path::PathBuf;
use std::time::Duration;

/// Default network-status source
pub const DEFAULT_STATUS_URL: &str = "http://atlas.devnet.xandeum.com:3000/api/pods";

const DEFAULT_CHECK_INTERVAL_HOURS: u64 = 2;

/// All knobs for the monitor. Core logic takes these values; nothing in
/// the core reads the environment itself.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Network-status source URL
    pub status_url: String,
    /// Chat webhook destination
    pub webhook_url: String,
    /// Time between cycles
    pub check_interval: Duration,
    /// Fetch attempts per cycle
    pub fetch_attempts: u32,
    /// Per-attempt HTTP timeout
    pub fetch_timeout: Duration,
    /// Fixed wait after a failed fetch attempt
    pub retry_backoff: Duration,
    /// Reject updates whose churn ratio exceeds this (strictly)
    pub churn_threshold: f64,
    /// Baseline state file location
    pub state_path: PathBuf,
}

impl MonitorConfig {
    /// Create a config with defaults for everything but the webhook
    pub fn new(webhook_url: impl Into<String>) -> Self {
        Self {
            status_url: DEFAULT_STATUS_URL.to_string(),
            webhook_url: webhook_url.into(),
            check_interval: Duration::from_secs(DEFAULT_CHECK_INTERVAL_HOURS * 3600),
            fetch_attempts: 3,
            fetch_timeout: Duration::from_secs(10),
            retry_backoff: Duration::from_secs(5),
            churn_threshold: 0.5,
            state_path: PathBuf::from("nodewatch_state.json"),
        }
    }

    /// Set the status source URL
    pub fn with_status_url(mut self, url: impl Into<String>) -> Self {
        self.status_url = url.into();
        self
    }

    /// Set the cycle interval
    pub fn with_check_interval(mut self, interval: Duration) -> Self {
        self.check_interval = interval;
        self
    }

    /// Set the churn rejection threshold
    pub fn with_churn_threshold(mut self, threshold: f64) -> Self {
        self.churn_threshold = threshold;
        self
    }

    /// Set the state file location
    pub fn with_state_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.state_path = path.into();
        self
    }

    /// Build a config from environment variables.
    ///
    /// - `NODEWATCH_WEBHOOK_URL` (required)
    /// - `NODEWATCH_STATUS_URL`
    /// - `NODEWATCH_CHECK_INTERVAL_HOURS` (minimum 1, default 2)
    /// - `NODEWATCH_STATE_PATH`
    pub fn from_env() -> Result<Self, ConfigError> {
        let webhook_url =
            std::env::var("NODEWATCH_WEBHOOK_URL").map_err(|_| ConfigError::MissingWebhook)?;

        let mut config = Self::new(webhook_url);

        if let Ok(url) = std::env::var("NODEWATCH_STATUS_URL") {
            config.status_url = url;
        }

        if let Ok(raw) = std::env::var("NODEWATCH_CHECK_INTERVAL_HOURS") {
            match raw.parse::<u64>() {
                Ok(hours) if hours >= 1 => {
                    config.check_interval = Duration::from_secs(hours * 3600);
                }
                Ok(_) => {
                    tracing::warn!(
                        "NODEWATCH_CHECK_INTERVAL_HOURS must be at least 1, using default of {}",
                        DEFAULT_CHECK_INTERVAL_HOURS
                    );
                }
                Err(_) => {
                    tracing::warn!(
                        "Invalid NODEWATCH_CHECK_INTERVAL_HOURS value, using default of {}",
                        DEFAULT_CHECK_INTERVAL_HOURS
                    );
                }
            }
        }

        if let Ok(path) = std::env::var("NODEWATCH_STATE_PATH") {
            config.state_path = PathBuf::from(path);
        }

        Ok(config)
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("NODEWATCH_WEBHOOK_URL environment variable not set")]
    MissingWebhook,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MonitorConfig::new("https://chat.example.com/hook");
        assert_eq!(config.check_interval, Duration::from_secs(7200));
        assert_eq!(config.fetch_attempts, 3);
        assert_eq!(config.retry_backoff, Duration::from_secs(5));
        assert_eq!(config.churn_threshold, 0.5);
    }

    #[test]
    fn test_builder() {
        let config = MonitorConfig::new("https://chat.example.com/hook")
            .with_status_url("http://127.0.0.1:3000/api/pods")
            .with_check_interval(Duration::from_secs(60))
            .with_churn_threshold(0.25)
            .with_state_path("/tmp/state.json");

        assert_eq!(config.status_url, "http://127.0.0.1:3000/api/pods");
        assert_eq!(config.check_interval, Duration::from_secs(60));
        assert_eq!(config.churn_threshold, 0.25);
        assert_eq!(config.state_path, PathBuf::from("/tmp/state.json"));
    }
}
