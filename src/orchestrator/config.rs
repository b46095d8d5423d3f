use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Where each scrape attempt runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IsolationMode {
    /// A fresh child process per attempt
    #[default]
    Process,
    /// A tokio task per attempt inside the orchestrator process
    Task,
}

/// Batch run configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Records per batch (default: 50)
    pub batch_size: usize,

    /// Pause after every attempt in seconds (default: 5)
    pub request_delay_secs: u64,

    /// Pause between batches in seconds (default: 60)
    pub batch_delay_secs: u64,

    /// Hard wall-clock budget per attempt in seconds (default: 300)
    pub process_timeout_secs: u64,

    pub isolation: IsolationMode,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            batch_size: 50,
            request_delay_secs: 5,
            batch_delay_secs: 60,
            process_timeout_secs: 300,
            isolation: IsolationMode::Process,
        }
    }
}

impl RunConfig {
    pub fn request_delay(&self) -> Duration {
        Duration::from_secs(self.request_delay_secs)
    }

    pub fn batch_delay(&self) -> Duration {
        Duration::from_secs(self.batch_delay_secs)
    }

    pub fn process_timeout(&self) -> Duration {
        Duration::from_secs(self.process_timeout_secs)
    }

    /// Parse interval string like "5s", "2m", "1h"; bare numbers are seconds
    pub fn parse_interval(s: &str) -> Result<u64, String> {
        let s = s.trim().to_lowercase();

        if let Some(hours) = s.strip_suffix('h') {
            hours
                .parse::<u64>()
                .ok()
                .and_then(|h| h.checked_mul(3600))
                .ok_or_else(|| format!("Invalid hours: {}", hours))
        } else if let Some(minutes) = s.strip_suffix('m') {
            minutes
                .parse::<u64>()
                .ok()
                .and_then(|m| m.checked_mul(60))
                .ok_or_else(|| format!("Invalid minutes: {}", minutes))
        } else if let Some(secs) = s.strip_suffix('s') {
            secs.parse::<u64>()
                .map_err(|_| format!("Invalid seconds: {}", secs))
        } else {
            s.parse::<u64>()
                .map_err(|_| format!("Invalid interval: {}. Use format like '30s', '5m', '1h'", s))
        }
    }

    /// Format interval for display
    pub fn format_interval(secs: u64) -> String {
        if secs >= 3600 && secs.is_multiple_of(3600) {
            format!("{}h", secs / 3600)
        } else if secs >= 60 && secs.is_multiple_of(60) {
            format!("{}m", secs / 60)
        } else {
            format!("{}s", secs)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RunConfig::default();
        assert_eq!(config.batch_size, 50);
        assert_eq!(config.request_delay(), Duration::from_secs(5));
        assert_eq!(config.batch_delay(), Duration::from_secs(60));
        assert_eq!(config.process_timeout(), Duration::from_secs(300));
        assert_eq!(config.isolation, IsolationMode::Process);
    }

    #[test]
    fn test_parse_interval() {
        assert_eq!(RunConfig::parse_interval("5m").unwrap(), 300);
        assert_eq!(RunConfig::parse_interval("30s").unwrap(), 30);
        assert_eq!(RunConfig::parse_interval("1h").unwrap(), 3600);
        assert_eq!(RunConfig::parse_interval("45").unwrap(), 45);
        assert_eq!(RunConfig::parse_interval(" 2M ").unwrap(), 120);
        assert!(RunConfig::parse_interval("soon").is_err());
    }

    #[test]
    fn test_parse_interval_overflow_is_error() {
        assert!(RunConfig::parse_interval("6000000000000000h").is_err());
        assert!(RunConfig::parse_interval("400000000000000000m").is_err());
        assert_eq!(RunConfig::parse_interval("18446744073709551615s").unwrap(), u64::MAX);
    }

    #[test]
    fn test_format_interval() {
        assert_eq!(RunConfig::format_interval(300), "5m");
        assert_eq!(RunConfig::format_interval(7200), "2h");
        assert_eq!(RunConfig::format_interval(90), "90s");
        assert_eq!(RunConfig::format_interval(0), "0s");
    }

    #[test]
    fn test_isolation_mode_from_toml() {
        let config: RunConfig = toml::from_str("isolation = \"task\"\nbatch_size = 10").unwrap();
        assert_eq!(config.isolation, IsolationMode::Task);
        assert_eq!(config.batch_size, 10);
        assert_eq!(config.request_delay_secs, 5);
    }
}
