//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::api::ApiConfig;
use crate::sheets::{CachedSource, GoogleSheetsSource, SheetError, SheetSource, WorkbookSource};

/// Environment variable naming the Google Sheets credentials file
pub const CREDENTIALS_ENV: &str = "GOOGLE_SHEETS_CREDENTIALS";

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub source: SourceConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl From<&ServerConfig> for ApiConfig {
    fn from(server: &ServerConfig) -> Self {
        ApiConfig::new(server.host.clone(), server.port)
    }
}

/// Which backend the sheets are read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    #[default]
    Workbook,
    Google,
}

/// Sheet source configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    #[serde(default)]
    pub kind: SourceKind,

    #[serde(default = "default_workbook_dir")]
    pub workbook_dir: PathBuf,

    pub credentials_file: Option<PathBuf>,

    /// Seconds a fetched sheet is reused, 0 disables caching
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl_secs: u64,
}

fn default_workbook_dir() -> PathBuf {
    PathBuf::from("./strategic_insight")
}

fn default_cache_ttl() -> u64 {
    30
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            kind: SourceKind::default(),
            workbook_dir: default_workbook_dir(),
            credentials_file: None,
            cache_ttl_secs: default_cache_ttl(),
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

impl LoggingConfig {
    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
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
            dirs::config_dir().map(|p| p.join("strategic-console").join("config.toml")),
            Some(PathBuf::from("/etc/strategic-console/config.toml")),
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
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from any key lookup
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(host) = lookup("STRATEGIC_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("STRATEGIC_PORT").and_then(|p| p.parse().ok()) {
            self.server.port = port;
        }

        if let Some(dir) = lookup("STRATEGIC_WORKBOOK_DIR") {
            self.source.workbook_dir = PathBuf::from(dir);
        }
        if let Some(ttl) = lookup("STRATEGIC_CACHE_TTL_SECS").and_then(|t| t.parse().ok()) {
            self.source.cache_ttl_secs = ttl;
        }
        if let Some(path) = lookup(CREDENTIALS_ENV).filter(|p| !p.trim().is_empty()) {
            self.source.credentials_file = Some(PathBuf::from(path));
            self.source.kind = SourceKind::Google;
        }

        if let Some(level) = lookup("STRATEGIC_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("STRATEGIC_LOG_FORMAT") {
            self.logging.format = format;
        }
    }

    /// Read sheets from a local workbook, overriding any google source
    pub fn use_workbook(&mut self, path: impl Into<PathBuf>) {
        self.source.workbook_dir = path.into();
        self.source.kind = SourceKind::Workbook;
    }

    /// Construct the configured sheet source behind its cache
    pub fn build_source(&self) -> Result<Arc<dyn SheetSource>, SheetError> {
        let ttl = Duration::from_secs(self.source.cache_ttl_secs);

        match self.source.kind {
            SourceKind::Workbook => {
                tracing::info!(dir = ?self.source.workbook_dir, "Reading sheets from local workbook");
                let source = WorkbookSource::new(self.source.workbook_dir.clone());
                Ok(Arc::new(CachedSource::new(source, ttl)))
            }
            SourceKind::Google => {
                let path = self.source.credentials_file.as_deref().ok_or_else(|| {
                    SheetError::Credentials(format!(
                        "source kind is google but no credentials file is set (use {})",
                        CREDENTIALS_ENV
                    ))
                })?;
                tracing::info!(credentials = ?path, "Reading sheets from Google Sheets");
                let source = GoogleSheetsSource::from_credentials_file(path)?;
                Ok(Arc::new(CachedSource::new(source, ttl)))
            }
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
    r#"# Strategic Console Configuration
#
# Environment variables override these settings:
# - STRATEGIC_HOST
# - STRATEGIC_PORT
# - STRATEGIC_WORKBOOK_DIR
# - STRATEGIC_CACHE_TTL_SECS
# - STRATEGIC_LOG_LEVEL
# - STRATEGIC_LOG_FORMAT
# - GOOGLE_SHEETS_CREDENTIALS (switches the source to google)

[server]
host = "0.0.0.0"
port = 5000

[source]
# Where sheets come from: workbook (CSV directory) or google
kind = "workbook"

# A spreadsheet file (.xlsx, .xlsm, .xls, .ods) or a directory
# with one <sheet name>.csv per sheet
workbook_dir = "./strategic_insight"

# Google Sheets credentials JSON: spreadsheet_id plus api_key or access_token
# credentials_file = "/etc/strategic-console/credentials.json"

# How long fetched sheets are reused (seconds, 0 disables)
cache_ttl_secs = 30

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
