//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides; CLI flags
//! are applied last by the binary.

use crate::recompute::YearBounds;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub dataset: DatasetConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub filter: FilterConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Source table and cleaning rules
#[derive(Debug, Clone, Deserialize)]
pub struct DatasetConfig {
    #[serde(default = "default_dataset_path")]
    pub path: PathBuf,

    #[serde(default = "default_unknown_score_token")]
    pub unknown_score_token: String,

    #[serde(default = "default_min_year")]
    pub min_year: i32,
}

fn default_dataset_path() -> PathBuf {
    PathBuf::from("data/games.csv")
}

fn default_unknown_score_token() -> String {
    crate::dataset::DEFAULT_UNKNOWN_SCORE_TOKEN.to_string()
}

fn default_min_year() -> i32 {
    crate::dataset::DEFAULT_MIN_YEAR
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: default_dataset_path(),
            unknown_score_token: default_unknown_score_token(),
            min_year: default_min_year(),
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Verbose logging and error detail
    #[serde(default)]
    pub debug: bool,

    /// Allowed CORS origins; empty allows any
    #[serde(default)]
    pub cors_origins: Vec<String>,

    #[serde(default = "default_max_ws_connections")]
    pub max_ws_connections: usize,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8050
}

fn default_max_ws_connections() -> usize {
    1000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            debug: false,
            cors_origins: Vec::new(),
            max_ws_connections: default_max_ws_connections(),
        }
    }
}

impl ServerConfig {
    /// Create config with custom host and port
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Filter behaviour
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilterConfig {
    /// Whether the year range keeps games released exactly on its endpoints
    #[serde(default)]
    pub year_bounds: YearBounds,
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

        Self::parse(&content).map_err(|e| match e {
            ConfigError::Parse { error, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                error,
            },
            other => other,
        })
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: PathBuf::new(),
            error: e.to_string(),
        })
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
            dirs::config_dir().map(|p| p.join("gamedash").join("config.toml")),
            Some(PathBuf::from("/etc/gamedash/config.toml")),
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

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(path) = var("GAMEDASH_DATA") {
            self.dataset.path = PathBuf::from(path);
        }

        if let Some(host) = var("GAMEDASH_HOST") {
            self.server.host = host;
        }
        if let Some(port) = var("GAMEDASH_PORT") {
            if let Ok(p) = port.parse() {
                self.server.port = p;
            }
        }
        if let Some(debug) = var("GAMEDASH_DEBUG") {
            self.server.debug = debug.to_lowercase() != "false" && debug != "0";
        }

        if let Some(level) = var("GAMEDASH_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("GAMEDASH_LOG_FORMAT") {
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
    r#"# gamedash configuration
#
# Environment variables override these settings:
# - GAMEDASH_DATA
# - GAMEDASH_HOST
# - GAMEDASH_PORT
# - GAMEDASH_DEBUG
# - GAMEDASH_LOG_LEVEL
# - GAMEDASH_LOG_FORMAT

[dataset]
# Games table (CSV with a header row)
path = "data/games.csv"

# User-score value meaning "not rated yet"; such rows are dropped
unknown_score_token = "tbd"

# Games released before this year are dropped
min_year = 2000

[server]
host = "127.0.0.1"
port = 8050

# Verbose logging
debug = false

# Allowed CORS origins (empty allows any)
cors_origins = []

# Concurrent WebSocket sessions
max_ws_connections = 1000

[filter]
# exclusive: games released exactly on the range endpoints are left out
# inclusive: they are kept
year_bounds = "exclusive"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
