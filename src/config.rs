//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use crate::chart::ChartProps;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub charts: ChartConfig,

    #[serde(default)]
    pub moderation: ModerationConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Archive server connection
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// No explicit timeout when unset
    pub request_timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: None,
        }
    }
}

impl ServerConfig {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

/// Activity chart settings
#[derive(Debug, Clone, Deserialize)]
pub struct ChartConfig {
    #[serde(default = "default_chart_width")]
    pub width: f64,

    #[serde(default = "default_chart_height")]
    pub height: f64,

    /// Row height used on the list index
    #[serde(default = "default_index_height")]
    pub index_height: f64,

    #[serde(default = "default_url_template")]
    pub url_template: String,
}

fn default_chart_width() -> f64 {
    250.0
}

fn default_chart_height() -> f64 {
    50.0
}

fn default_index_height() -> f64 {
    30.0
}

fn default_url_template() -> String {
    "/hyperkitty/list/PLACEHOLDER@PLACEHOLDER/recent-activity".to_string()
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: default_chart_width(),
            height: default_chart_height(),
            index_height: default_index_height(),
            url_template: default_url_template(),
        }
    }
}

impl ChartConfig {
    pub fn props(&self) -> ChartProps {
        ChartProps {
            width: self.width,
            height: self.height,
        }
    }

    pub fn index_props(&self) -> ChartProps {
        self.props().with_height(self.index_height)
    }
}

/// Held-message dialog settings
#[derive(Debug, Clone, Deserialize)]
pub struct ModerationConfig {
    #[serde(default = "default_moderation_error")]
    pub error_message: String,
}

fn default_moderation_error() -> String {
    "An error occurred while loading the held message.".to_string()
}

impl Default for ModerationConfig {
    fn default() -> Self {
        Self {
            error_message: default_moderation_error(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("archivist").join("config.toml")),
            Some(PathBuf::from("/etc/archivist/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        tracing::debug!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("ARCHIVIST_BASE_URL") {
            self.server.base_url = url;
        }
        if let Ok(secs) = std::env::var("ARCHIVIST_REQUEST_TIMEOUT") {
            if let Ok(s) = secs.parse() {
                self.server.request_timeout_secs = Some(s);
            }
        }

        if let Ok(width) = std::env::var("ARCHIVIST_CHART_WIDTH") {
            if let Ok(w) = width.parse() {
                self.charts.width = w;
            }
        }
        if let Ok(height) = std::env::var("ARCHIVIST_CHART_HEIGHT") {
            if let Ok(h) = height.parse() {
                self.charts.height = h;
            }
        }

        if let Ok(level) = std::env::var("ARCHIVIST_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("ARCHIVIST_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Archivist Configuration
#
# Environment variables override these settings:
# - ARCHIVIST_BASE_URL
# - ARCHIVIST_REQUEST_TIMEOUT
# - ARCHIVIST_CHART_WIDTH
# - ARCHIVIST_CHART_HEIGHT
# - ARCHIVIST_LOG_LEVEL
# - ARCHIVIST_LOG_FORMAT

[server]
# Archive server URL; relative request paths are joined to it
base_url = "http://localhost:8000"

# Request timeout in seconds (unset: client default)
# request_timeout_secs = 30

[charts]
# Activity chart size in pixels
width = 250
height = 50

# Chart height on the list index
index_height = 30

# Per-list activity URL; PLACEHOLDER@PLACEHOLDER is replaced by the list address
url_template = "/hyperkitty/list/PLACEHOLDER@PLACEHOLDER/recent-activity"

[moderation]
# Shown when a held message cannot be loaded
error_message = "An error occurred while loading the held message."

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_parses() {
        let config: Config = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config.server.base_url, "http://localhost:8000");
        assert_eq!(config.server.request_timeout(), None);
        assert_eq!(config.charts.props(), ChartProps::default());
        assert_eq!(config.charts.index_props().height, 30.0);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[charts]\nwidth = 640\n\n[server]\nrequest_timeout_secs = 12").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.charts.width, 640.0);
        assert_eq!(config.charts.height, 50.0);
        assert_eq!(config.server.request_timeout(), Some(Duration::from_secs(12)));
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_env_overrides_file() {
        // Only test in this crate touching ARCHIVIST_* variables
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server]\nbase_url = \"http://file\"\n\n[charts]\nheight = 40").unwrap();

        let vars = [
            ("ARCHIVIST_BASE_URL", "https://lists.example.org"),
            ("ARCHIVIST_REQUEST_TIMEOUT", "9"),
            ("ARCHIVIST_CHART_WIDTH", "480"),
            ("ARCHIVIST_CHART_HEIGHT", "tall"),
            ("ARCHIVIST_LOG_LEVEL", "debug"),
            ("ARCHIVIST_LOG_FORMAT", "json"),
        ];
        for (key, value) in vars {
            std::env::set_var(key, value);
        }

        let config = Config::load_with_env(file.path());

        for (key, _) in vars {
            std::env::remove_var(key);
        }
        let config = config.unwrap();

        assert_eq!(config.server.base_url, "https://lists.example.org");
        assert_eq!(config.server.request_timeout(), Some(Duration::from_secs(9)));
        assert_eq!(config.charts.width, 480.0);
        // Unparseable numbers leave the file value in place
        assert_eq!(config.charts.height, 40.0);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn test_load_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        assert!(matches!(Config::load(&missing), Err(ConfigError::Io { .. })));

        let bad = dir.path().join("bad.toml");
        std::fs::write(&bad, "[charts\nwidth = ").unwrap();
        assert!(matches!(Config::load(&bad), Err(ConfigError::Parse { .. })));
    }
}
