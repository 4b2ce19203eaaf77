//! Configuration management for mcm
//!
//! Settings are read from environment variables with sensible defaults and
//! passed explicitly into the discovery pipeline; nothing reads the environment
//! after startup.
//!
//! # Environment Variables
//!
//! - `MCM_HOME`: Home directory - default: `~/.mcm`
//! - `EXA_API_KEY`: Exa search API key, needed to resolve bare names - default: unset
//! - `GITHUB_TOKEN`: GitHub token for higher rate limits and private repositories - default: unset
//! - `MCM_REQUEST_TIMEOUT`: HTTP timeout in seconds - default: "30"
//! - `MCM_REQUEST_DELAY_MS`: Pause between discovered items in milliseconds - default: "1000"
//! - `MCM_LOG_LEVEL`: Logging level - default: "info"
//! - `MCM_LOG_JSON`: JSON log output (true|false) - default: "false"
//!
//! # Example
//!
//! ```no_run
//! use mcm::McmConfig;
//!
//! let config = McmConfig::default();
//! config.validate().expect("Invalid configuration");
//! println!("{}", config);
//! ```

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_HOME_DIR: &str = ".mcm";
const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const DEFAULT_REQUEST_DELAY_MS: u64 = 1000;
const MAX_REQUEST_DELAY_MS: u128 = 60_000;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration validation failed
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),

    /// No home directory could be determined
    #[error("Cannot determine home directory. Set MCM_HOME or pass --home")]
    NoHomeDirectory,
}

/// Process-wide settings for a discovery run
#[derive(Debug, Clone)]
pub struct McmConfig {
    /// Root of the mcm directory layout
    pub home: PathBuf,

    /// Exa search API key
    pub search_api_key: Option<String>,

    /// GitHub access token
    pub github_token: Option<String>,

    /// HTTP request timeout in seconds
    pub request_timeout_secs: u64,

    /// Minimum pause between successive discovery requests
    pub request_delay: Duration,

    /// Logging level (trace, debug, info, warn, error)
    pub log_level: String,

    /// Emit logs as JSON
    pub log_json: bool,
}

impl Default for McmConfig {
    /// Loads configuration from `MCM_*` and provider environment variables
    fn default() -> Self {
        let home = env::var("MCM_HOME")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(default_home);

        let request_timeout_secs = env::var("MCM_REQUEST_TIMEOUT")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);

        let request_delay = env::var("MCM_REQUEST_DELAY_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .map(Duration::from_millis)
            .unwrap_or(Duration::from_millis(DEFAULT_REQUEST_DELAY_MS));

        let log_level = env::var("MCM_LOG_LEVEL")
            .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string())
            .to_lowercase();

        let log_json = env::var("MCM_LOG_JSON")
            .ok()
            .and_then(|v| v.parse::<bool>().ok())
            .unwrap_or(false);

        Self {
            home,
            search_api_key: non_empty_var("EXA_API_KEY"),
            github_token: non_empty_var("GITHUB_TOKEN"),
            request_timeout_secs,
            request_delay,
            log_level,
            log_json,
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// `~/.mcm`, or `.mcm` relative to the working directory when no home exists
fn default_home() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(DEFAULT_HOME_DIR))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_HOME_DIR))
}

impl McmConfig {
    /// Override the home directory (e.g. from `--home`)
    pub fn with_home(mut self, home: impl Into<PathBuf>) -> Self {
        self.home = home.into();
        self
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if any value is out of range
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.home.as_os_str().is_empty() {
            return Err(ConfigError::NoHomeDirectory);
        }

        if self.request_timeout_secs == 0 {
            return Err(ConfigError::ValidationFailed(
                "Request timeout must be at least 1 second".to_string(),
            ));
        }
        if self.request_timeout_secs > 600 {
            return Err(ConfigError::ValidationFailed(
                "Request timeout cannot exceed 10 minutes".to_string(),
            ));
        }

        if self.request_delay.as_millis() > MAX_REQUEST_DELAY_MS {
            return Err(ConfigError::ValidationFailed(
                "Request delay cannot exceed 60 seconds".to_string(),
            ));
        }

        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(ConfigError::ValidationFailed(format!(
                    "Invalid log level: {}. Valid options: trace, debug, info, warn, error",
                    self.log_level
                )))
            }
        }

        Ok(())
    }
}

fn describe_secret(value: &Option<String>) -> &'static str {
    if value.is_some() {
        "set"
    } else {
        "not set"
    }
}

impl fmt::Display for McmConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "MCM Configuration:")?;
        writeln!(f, "  Home: {}", self.home.display())?;
        writeln!(f, "  Search API Key: {}", describe_secret(&self.search_api_key))?;
        writeln!(f, "  GitHub Token: {}", describe_secret(&self.github_token))?;
        writeln!(f, "  Request Timeout: {}s", self.request_timeout_secs)?;
        writeln!(f, "  Request Delay: {}ms", self.request_delay.as_millis())?;
        writeln!(f, "  Log Level: {}", self.log_level)?;
        Ok(())
    }
}
