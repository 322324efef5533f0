// Configuration types module
// Defines the ambient settings; listen address and payload are fixed

use serde::Deserialize;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// Emit one access log line per request
    pub access_log: bool,
    /// Access log format (combined, common or json)
    #[serde(default = "default_access_log_format")]
    pub access_log_format: String,
    /// Access log file path (optional, stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}

#[allow(clippy::missing_const_for_fn)]
fn default_access_log_format() -> String {
    "combined".to_string()
}

/// Connection settings, in seconds
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    /// Zero disables HTTP keep-alive
    pub keep_alive_timeout: u64,
    /// Limit on waiting for a request's headers; zero (the default) disables it
    pub header_read_timeout: u64,
}

impl PerformanceConfig {
    pub const fn keep_alive(&self) -> bool {
        self.keep_alive_timeout > 0
    }

    pub const fn header_read_timeout(&self) -> Option<std::time::Duration> {
        if self.header_read_timeout > 0 {
            Some(std::time::Duration::from_secs(self.header_read_timeout))
        } else {
            None
        }
    }
}
