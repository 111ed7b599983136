//! Configuration loading and management
//!
//! Configuration is loaded from `~/.config/commitlens/config.toml`
//!
//! This module follows the XDG Base Directory Specification:
//! - Config: `$XDG_CONFIG_HOME/commitlens/` (~/.config/commitlens/)
//! - State/Logs: `$XDG_STATE_HOME/commitlens/` (~/.local/state/commitlens/)

use crate::error::{Error, Result};
use crate::types::Granularity;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Returns a best-effort home directory path.
fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Returns XDG_CONFIG_HOME or ~/.config
fn xdg_config_home() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".config"))
}

/// Returns XDG_STATE_HOME or ~/.local/state
fn xdg_state_home() -> PathBuf {
    std::env::var("XDG_STATE_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/state"))
}

/// Main configuration struct
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Analytics configuration
    #[serde(default)]
    pub analytics: AnalyticsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Defaults for the aggregation engine
#[derive(Debug, Deserialize, Clone)]
pub struct AnalyticsConfig {
    /// Bucket width for the frequency series
    #[serde(default)]
    pub granularity: Granularity,

    /// Maximum number of ranked contributors
    #[serde(default = "default_contributor_limit")]
    pub contributor_limit: usize,

    /// Number of streaks reported in `top`
    #[serde(default = "default_top_streaks")]
    pub top_streaks: usize,

    /// Commits per slice when reducing in parallel
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            granularity: Granularity::default(),
            contributor_limit: default_contributor_limit(),
            top_streaks: default_top_streaks(),
            chunk_size: default_chunk_size(),
        }
    }
}

fn default_contributor_limit() -> usize {
    20
}

fn default_top_streaks() -> usize {
    5
}

fn default_chunk_size() -> usize {
    5000
}

/// Logging configuration
#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Maximum number of log files to keep
    #[serde(default = "default_max_log_files")]
    pub max_files: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            max_files: default_max_log_files(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_log_files() -> usize {
    5
}

impl Config {
    /// Load configuration from the default path
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            return Ok(Config::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read config file {:?}: {}", path, e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration, returning error message if invalid
    pub fn validate(&self) -> Result<()> {
        if self.analytics.contributor_limit == 0 {
            return Err(Error::Config(
                "analytics.contributor_limit must be at least 1".to_string(),
            ));
        }
        if self.analytics.top_streaks == 0 {
            return Err(Error::Config(
                "analytics.top_streaks must be at least 1".to_string(),
            ));
        }
        if self.analytics.chunk_size == 0 {
            return Err(Error::Config(
                "analytics.chunk_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Returns the default config file path
    ///
    /// `$XDG_CONFIG_HOME/commitlens/config.toml` (~/.config/commitlens/config.toml)
    pub fn config_path() -> PathBuf {
        xdg_config_home().join("commitlens").join("config.toml")
    }

    /// Returns the state directory path (for logs)
    ///
    /// `$XDG_STATE_HOME/commitlens/` (~/.local/state/commitlens/)
    pub fn state_dir() -> PathBuf {
        xdg_state_home().join("commitlens")
    }

    /// Returns the log file path, before the daily date suffix
    ///
    /// `$XDG_STATE_HOME/commitlens/commitlens.log` (~/.local/state/commitlens/commitlens.log)
    pub fn log_path() -> PathBuf {
        Self::state_dir().join(crate::logging::LOG_FILE_PREFIX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.analytics.granularity, Granularity::Week);
        assert_eq!(config.analytics.contributor_limit, 20);
        assert_eq!(config.analytics.top_streaks, 5);
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
[analytics]
granularity = "month"
contributor_limit = 10

[logging]
level = "debug"
"#;
        let config: Config = toml::from_str(toml).unwrap();

        assert_eq!(config.analytics.granularity, Granularity::Month);
        assert_eq!(config.analytics.contributor_limit, 10);
        assert_eq!(config.analytics.chunk_size, 5000);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_load_from_file_rejects_zero_chunk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[analytics]\nchunk_size = 0").unwrap();

        let err = Config::load_from(file.path()).unwrap_err();
        assert!(err.to_string().contains("chunk_size"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[analytics]\ngranularity = \"day\"\ntop_streaks = 3").unwrap();

        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.analytics.granularity, Granularity::Day);
        assert_eq!(config.analytics.top_streaks, 3);
    }

    #[test]
    fn test_unknown_granularity_is_an_error() {
        let toml = "[analytics]\ngranularity = \"fortnight\"\n";
        assert!(toml::from_str::<Config>(toml).is_err());
    }

    #[test]
    fn test_log_path_under_state_dir() {
        assert!(Config::log_path().ends_with("commitlens/commitlens.log"));
    }
}
