//! Configuration management for the tourist map
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::TourismError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable holding the mapping provider key
pub const MAPS_API_KEY_ENV: &str = "GOOGLE_MAPS_API_KEY";

/// Environment variable overriding the server port
pub const PORT_ENV: &str = "PORT";

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TourismConfig {
    /// Mapping provider configuration
    pub maps: MapsConfig,
    /// Recommendation backend the client talks to
    pub backend: BackendConfig,
    /// Backend server settings
    pub server: ServerConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Mapping provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapsConfig {
    /// Provider API key
    pub api_key: Option<String>,
    /// Zoom used when a view has no preference
    #[serde(default = "default_zoom")]
    pub default_zoom: u8,
}

/// Recommendation backend client settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL, without the `/api` suffix
    #[serde(default = "default_backend_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_backend_timeout")]
    pub timeout_seconds: u32,
}

/// Backend server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_host")]
    pub host: String,
    #[serde(default = "default_server_port")]
    pub port: u16,
    /// JSON file with the attraction catalog
    #[serde(default = "default_catalog_path")]
    pub catalog_path: String,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_zoom() -> u8 {
    crate::map::DEFAULT_ZOOM
}

fn default_backend_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_backend_timeout() -> u32 {
    30
}

fn default_server_host() -> String {
    "0.0.0.0".to_string()
}

fn default_server_port() -> u16 {
    5000
}

fn default_catalog_path() -> String {
    "data/attractions.json".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for MapsConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            default_zoom: default_zoom(),
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_backend_base_url(),
            timeout_seconds: default_backend_timeout(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            catalog_path: default_catalog_path(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl MapsConfig {
    /// The provider key; a missing or blank key means the map cannot load
    pub fn require_api_key(&self) -> crate::Result<&str> {
        match self.api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => Ok(key),
            _ => Err(TourismError::initialization(format!(
                "maps API key is not configured; set {MAPS_API_KEY_ENV} or maps.api_key"
            ))),
        }
    }
}

impl TourismConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        // Load from file if path is provided or use default location
        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Environment overrides, e.g. TOURIST_BACKEND__BASE_URL
        builder = builder.add_source(
            Environment::with_prefix("TOURIST")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: TourismConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_environment();
        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("tourist-map").join("config.toml"))
    }

    /// Pick up the conventional variables that do not follow the TOURIST_ prefix
    pub fn apply_environment(&mut self) {
        if self.maps.api_key.is_none() {
            self.maps.api_key = std::env::var(MAPS_API_KEY_ENV)
                .ok()
                .filter(|key| !key.trim().is_empty());
        }
        if let Some(port) = std::env::var(PORT_ENV)
            .ok()
            .and_then(|raw| raw.parse::<u16>().ok())
        {
            self.server.port = port;
        }
    }

    /// Apply default values to missing configuration fields
    pub fn apply_defaults(&mut self) {
        if self.maps.default_zoom == 0 {
            self.maps.default_zoom = default_zoom();
        }
        if self.backend.base_url.is_empty() {
            self.backend.base_url = default_backend_base_url();
        }
        if self.backend.timeout_seconds == 0 {
            self.backend.timeout_seconds = default_backend_timeout();
        }
        if self.server.host.is_empty() {
            self.server.host = default_server_host();
        }
        if self.server.catalog_path.is_empty() {
            self.server.catalog_path = default_catalog_path();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.maps.default_zoom > 21 {
            return Err(TourismError::config("Default zoom cannot exceed 21").into());
        }

        if self.backend.timeout_seconds > 300 {
            return Err(
                TourismError::config("Backend timeout cannot exceed 300 seconds").into(),
            );
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(TourismError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(TourismError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        if !self.backend.base_url.starts_with("http://")
            && !self.backend.base_url.starts_with("https://")
        {
            return Err(TourismError::config(
                "Backend base URL must be a valid HTTP or HTTPS URL",
            )
            .into());
        }

        Ok(())
    }
}
