//! LilyPad configuration.
//!
//! Loaded from TOML; every field has a default so a partial or missing file
//! still yields a usable configuration.

use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Environment variable that overrides `oracle.base_url`.
pub const ORACLE_URL_ENV: &str = "LILYPAD_ORACLE_URL";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
#[serde(default)]
pub struct LilypadConfig {
    /// Oracle service settings.
    oracle: OracleConfig,

    /// REST session service settings.
    server: ServerConfig,
}

/// Where and how to reach the word-ladder oracle service.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
#[serde(default)]
pub struct OracleConfig {
    /// Base URL the oracle endpoints hang off.
    #[setters(into)]
    base_url: String,

    /// Per-request timeout in seconds.
    timeout_secs: u64,

    /// Retries after a connectivity failure or timeout.
    max_retries: u32,

    /// Backoff unit in milliseconds; the n-th retry waits n units.
    retry_backoff_ms: u64,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000/api".to_string(),
            timeout_secs: 10,
            max_retries: 2,
            retry_backoff_ms: 250,
        }
    }
}

impl OracleConfig {
    /// Request timeout as a duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Backoff unit as a duration.
    pub fn retry_backoff(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_ms)
    }
}

/// Bind address for the REST session service.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind.
    #[setters(into)]
    host: String,

    /// Port to bind.
    port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

impl ServerConfig {
    /// `host:port` form for binding.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl LilypadConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml(&content)?;
        info!(oracle_url = %config.oracle.base_url, "Config loaded successfully");
        Ok(config)
    }

    /// Parses configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))
    }

    /// Loads `path` if it exists, otherwise returns defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            info!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Applies overrides from the process environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Applies overrides from an arbitrary variable lookup.
    ///
    /// Blank values are ignored.
    #[instrument(skip(self, lookup))]
    pub fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        match lookup(ORACLE_URL_ENV) {
            Some(url) if !url.trim().is_empty() => {
                debug!(url = %url, "Oracle URL overridden from environment");
                self.oracle.base_url = url.trim().to_string();
            }
            Some(_) => warn!(var = ORACLE_URL_ENV, "Ignoring blank override"),
            None => {}
        }
        self
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LilypadConfig::default();
        assert_eq!(config.oracle().base_url(), "http://127.0.0.1:5000/api");
        assert_eq!(*config.oracle().timeout_secs(), 10);
        assert_eq!(*config.oracle().max_retries(), 2);
        assert_eq!(config.oracle().retry_backoff(), Duration::from_millis(250));
        assert_eq!(config.server().bind_addr(), "127.0.0.1:3000");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = LilypadConfig::from_toml("[server]\nport = 8080\n").unwrap();
        assert_eq!(*config.server().port(), 8080);
        assert_eq!(config.server().host(), "127.0.0.1");
        assert_eq!(config.oracle(), &OracleConfig::default());
    }

    #[test]
    fn test_bad_toml_is_error() {
        let err = LilypadConfig::from_toml("[oracle]\ntimeout_secs = \"soon\"\n").unwrap_err();
        assert!(err.message.contains("Failed to parse config"));
    }

    #[test]
    fn test_env_override() {
        let config = LilypadConfig::default().with_overrides_from(|key| {
            (key == ORACLE_URL_ENV).then(|| " http://oracle.test/api ".to_string())
        });
        assert_eq!(config.oracle().base_url(), "http://oracle.test/api");
    }

    #[test]
    fn test_blank_env_override_ignored() {
        let config = LilypadConfig::default().with_overrides_from(|_| Some("  ".to_string()));
        assert_eq!(config.oracle().base_url(), "http://127.0.0.1:5000/api");
    }

    #[test]
    fn test_setters_chain() {
        let oracle = OracleConfig::default()
            .with_base_url("http://elsewhere/api")
            .with_max_retries(0);
        assert_eq!(oracle.base_url(), "http://elsewhere/api");
        assert_eq!(*oracle.max_retries(), 0);
    }
}
