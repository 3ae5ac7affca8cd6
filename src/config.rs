//! Configuration loading and constants.
//!
//! Loads application configuration from a TOML file and defines defaults for
//! the HTTP listener, artifact paths, and logging. The config file is
//! optional: a missing file falls back to built-in defaults, so the binary
//! runs off fixed relative paths with no configuration at all.

use serde::Deserialize;
use std::path::Path;

/// Default configuration file path
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Default path to the serialized classifier
pub const DEFAULT_MODEL_PATH: &str = "models/heart_disease_model.json";

/// Default path to the serialized feature scaler
pub const DEFAULT_SCALER_PATH: &str = "models/scaler.json";

/// Default log filter when RUST_LOG is not set
pub const DEFAULT_LOG_FILTER: &str = "cardio=debug,tower_http=info";

/// Default log format (text or json)
pub const DEFAULT_LOG_FORMAT: &str = "text";

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub http: HttpServerConfig,
    /// Locations of the pre-fit artifacts
    #[serde(default)]
    pub artifacts: ArtifactConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpServerConfig {
    #[serde(default = "HttpServerConfig::default_host")]
    pub host: String,
    #[serde(default = "HttpServerConfig::default_port")]
    pub port: u16,
    /// Include raw and scaled feature vectors in prediction responses.
    /// Exposes internal numeric state to callers; disable for production.
    #[serde(default = "HttpServerConfig::default_debug_responses")]
    pub debug_responses: bool,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: Self::default_port(),
            debug_responses: Self::default_debug_responses(),
        }
    }
}

impl HttpServerConfig {
    fn default_host() -> String {
        "127.0.0.1".to_string()
    }
    fn default_port() -> u16 {
        5000
    }
    fn default_debug_responses() -> bool {
        true
    }
}

/// Locations of the two artifact files read once at startup
#[derive(Debug, Clone, Deserialize)]
pub struct ArtifactConfig {
    #[serde(default = "ArtifactConfig::default_model_path")]
    pub model_path: String,
    #[serde(default = "ArtifactConfig::default_scaler_path")]
    pub scaler_path: String,
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        Self {
            model_path: Self::default_model_path(),
            scaler_path: Self::default_scaler_path(),
        }
    }
}

impl ArtifactConfig {
    fn default_model_path() -> String {
        DEFAULT_MODEL_PATH.to_string()
    }
    fn default_scaler_path() -> String {
        DEFAULT_SCALER_PATH.to_string()
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log format: "text" (human-readable, default) or "json" (structured)
    #[serde(default = "LoggingConfig::default_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: DEFAULT_LOG_FORMAT.to_string(),
        }
    }
}

impl LoggingConfig {
    fn default_format() -> String {
        DEFAULT_LOG_FORMAT.to_string()
    }
}

impl AppConfig {
    /// Load configuration from `path`, or built-in defaults if the file
    /// does not exist. A file that exists but fails to parse is an error.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        Ok(config)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_uses_defaults() {
        let config = AppConfig::load("/nonexistent/cardio.toml").unwrap();
        assert_eq!(config.http.port, 5000);
        assert_eq!(config.artifacts.model_path, DEFAULT_MODEL_PATH);
        assert!(config.http.debug_responses);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[http]\nport = 8080\ndebug_responses = false").unwrap();
        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config.http.port, 8080);
        assert!(!config.http.debug_responses);
        assert_eq!(config.http.host, "127.0.0.1");
        assert_eq!(config.artifacts.scaler_path, DEFAULT_SCALER_PATH);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "not valid toml [").unwrap();
        assert!(matches!(
            AppConfig::load(file.path()),
            Err(ConfigError::Parse(_))
        ));
    }
}
