//! Dashboard configuration
//!
//! Loaded from `~/.cronboard/config.yaml` (or `$CRONBOARD_CONFIG`). Falls back
//! to defaults if the file doesn't exist.
//!
//! Environment Variable Overrides:
//! - CRONBOARD_API_URL: Upstream job/watchdog API base URL
//! - CRONBOARD_API_TOKEN: Bearer token for the upstream API
//! - CRONBOARD_LOCALE: Default display locale
//! - CRONBOARD_HOST / CRONBOARD_PORT: Dashboard API bind address
//! - CRONBOARD_POLL_SECS: Watchdog poll interval

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::constants::{
    DEFAULT_API_URL, DEFAULT_HOST, DEFAULT_POLL_INTERVAL_SECS, DEFAULT_PORT,
    STALENESS_THRESHOLD_MS,
};
use crate::error::AppError;
use crate::i18n;

const MAX_CONFIG_BYTES: u64 = 1_048_576;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Upstream job/watchdog API base URL
    pub api_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,
    /// Locale used when a request doesn't name one
    pub locale: String,
    pub host: String,
    pub port: u16,
    pub poll_interval_secs: u64,
    pub staleness_threshold_ms: i64,
    pub request_timeout_secs: u64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        DashboardConfig {
            api_url: DEFAULT_API_URL.to_string(),
            api_token: None,
            locale: i18n::DEFAULT_LOCALE.to_string(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            poll_interval_secs: DEFAULT_POLL_INTERVAL_SECS,
            staleness_threshold_ms: STALENESS_THRESHOLD_MS,
            request_timeout_secs: 10,
        }
    }
}

impl DashboardConfig {
    /// `$CRONBOARD_CONFIG`, else `~/.cronboard/config.yaml`
    pub fn config_path() -> Option<PathBuf> {
        if let Ok(path) = env::var("CRONBOARD_CONFIG") {
            return Some(PathBuf::from(path));
        }
        dirs::home_dir().map(|h| h.join(".cronboard").join("config.yaml"))
    }

    /// Load from the default location and apply environment overrides
    pub fn load() -> Result<Self, AppError> {
        let config = match Self::config_path() {
            Some(path) => Self::load_from(&path)?,
            None => Self::default(),
        };
        let config = config.with_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Load from a YAML file with DoS protection
    ///
    /// A missing file yields the defaults. Files over 1MB are rejected.
    pub fn load_from(path: &Path) -> Result<Self, AppError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let metadata = fs::metadata(path)?;
        if metadata.len() > MAX_CONFIG_BYTES {
            return Err(AppError::config_error(format!(
                "Config too large: {} bytes (max 1MB)",
                metadata.len()
            )));
        }

        let contents = fs::read_to_string(path)?;
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: DashboardConfig = serde_yaml::from_str(&contents)
            .map_err(|e| AppError::from(e).with_details(path.display().to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Apply environment variable overrides
    pub fn with_env_overrides(self) -> Self {
        self.apply_overrides(|key| env::var(key).ok())
    }

    fn apply_overrides(mut self, get: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = get("CRONBOARD_API_URL") {
            self.api_url = url;
        }
        if let Some(token) = get("CRONBOARD_API_TOKEN") {
            self.api_token = Some(token).filter(|t| !t.is_empty());
        }
        if let Some(locale) = get("CRONBOARD_LOCALE") {
            self.locale = locale;
        }
        if let Some(host) = get("CRONBOARD_HOST") {
            self.host = host;
        }
        if let Some(port) = get("CRONBOARD_PORT").and_then(|p| p.parse().ok()) {
            self.port = port;
        }
        if let Some(secs) = get("CRONBOARD_POLL_SECS").and_then(|s| s.parse().ok()) {
            self.poll_interval_secs = secs;
        }
        self
    }

    /// Validate configuration constraints
    pub fn validate(&self) -> Result<(), AppError> {
        if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
            return Err(AppError::config_error(format!(
                "api_url must be an http(s) URL, got '{}'",
                self.api_url
            )));
        }
        if self.poll_interval_secs == 0 {
            return Err(AppError::config_error("poll_interval_secs must be at least 1"));
        }
        if self.staleness_threshold_ms <= 0 {
            return Err(AppError::config_error("staleness_threshold_ms must be positive"));
        }
        if self.request_timeout_secs == 0 {
            return Err(AppError::config_error("request_timeout_secs must be at least 1"));
        }
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Locale tag normalized to a registered table
    pub fn default_locale(&self) -> &'static str {
        i18n::resolve(&self.locale)
    }
}
