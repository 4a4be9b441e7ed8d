//! Configuration management for the Earth wheel
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::WheelError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct WheelConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub geocoding: GeocodingConfig,
    #[serde(default)]
    pub spin: SpinConfig,
    #[serde(default)]
    pub globe: GlobeConfig,
    #[serde(default)]
    pub stars: StarsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub share: ShareConfig,
}

/// Weather proxy HTTP settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_host")]
    pub host: String,
    #[serde(default = "default_server_port")]
    pub port: u16,
}

/// Weather table location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_store_path")]
    pub path: String,
}

/// Reverse geocoding settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodingConfig {
    /// Base URL of the Nominatim-compatible service
    #[serde(default = "default_geocoding_base_url")]
    pub base_url: String,
    /// How long a spin waits for the lookup before falling back
    #[serde(default = "default_geocoding_timeout")]
    pub timeout_ms: u64,
    #[serde(default = "default_geocoding_user_agent")]
    pub user_agent: String,
}

/// Spin animation calibration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpinConfig {
    #[serde(default = "default_initial_speed")]
    pub initial_speed: f64,
    #[serde(default = "default_spin_duration")]
    pub duration_ms: u64,
    #[serde(default = "default_fps")]
    pub fps: u32,
    #[serde(default = "default_settle_speed")]
    pub settle_speed: f64,
    /// Facing distance (degrees) at or below which the settle rotation is skipped
    #[serde(default = "default_front_tolerance")]
    pub front_tolerance_deg: f64,
    #[serde(default = "default_win_effect")]
    pub win_effect_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobeConfig {
    #[serde(default = "default_globe_max_radius")]
    pub max_radius: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StarsConfig {
    #[serde(default = "default_star_count")]
    pub count: usize,
    #[serde(default = "default_star_radius")]
    pub radius: f64,
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

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareConfig {
    /// Page linked from share messages
    #[serde(default = "default_share_base_url")]
    pub base_url: String,
}

// Default value functions
fn default_server_host() -> String {
    "0.0.0.0".to_string()
}

fn default_server_port() -> u16 {
    3001
}

fn default_store_path() -> String {
    dirs::data_dir()
        .map(|dir| dir.join("earthwheel").join("weather"))
        .unwrap_or_else(|| PathBuf::from("weather_data"))
        .to_string_lossy()
        .into_owned()
}

fn default_geocoding_base_url() -> String {
    "https://nominatim.openstreetmap.org".to_string()
}

fn default_geocoding_timeout() -> u64 {
    3000
}

fn default_geocoding_user_agent() -> String {
    format!("EarthWheel/{}", crate::VERSION)
}

fn default_initial_speed() -> f64 {
    5.0
}

fn default_spin_duration() -> u64 {
    5000
}

fn default_fps() -> u32 {
    60
}

fn default_settle_speed() -> f64 {
    0.5
}

fn default_front_tolerance() -> f64 {
    30.0
}

fn default_win_effect() -> u64 {
    3000
}

fn default_globe_max_radius() -> f64 {
    2.8
}

fn default_star_count() -> usize {
    5000
}

fn default_star_radius() -> f64 {
    120.0
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_share_base_url() -> String {
    "https://yourwebsite.com/earthwheel".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
        }
    }
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            base_url: default_geocoding_base_url(),
            timeout_ms: default_geocoding_timeout(),
            user_agent: default_geocoding_user_agent(),
        }
    }
}

impl Default for SpinConfig {
    fn default() -> Self {
        Self {
            initial_speed: default_initial_speed(),
            duration_ms: default_spin_duration(),
            fps: default_fps(),
            settle_speed: default_settle_speed(),
            front_tolerance_deg: default_front_tolerance(),
            win_effect_ms: default_win_effect(),
        }
    }
}

impl Default for GlobeConfig {
    fn default() -> Self {
        Self {
            max_radius: default_globe_max_radius(),
        }
    }
}

impl Default for StarsConfig {
    fn default() -> Self {
        Self {
            count: default_star_count(),
            radius: default_star_radius(),
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

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            base_url: default_share_base_url(),
        }
    }
}

impl SpinConfig {
    #[must_use]
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }

    /// Interval between animation frames
    #[must_use]
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.fps.max(1)))
    }

    #[must_use]
    pub fn win_effect(&self) -> Duration {
        Duration::from_millis(self.win_effect_ms)
    }
}

impl GeocodingConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl WheelConfig {
    /// Load configuration from `config_path` (or the default location) and
    /// `EARTHWHEEL_*` environment variables
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

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

        // EARTHWHEEL_SPIN__DURATION_MS=4000 style overrides
        builder = builder.add_source(
            Environment::with_prefix("EARTHWHEEL")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: WheelConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("earthwheel").join("config.toml"))
    }

    /// Apply default values to empty or zeroed fields
    pub fn apply_defaults(&mut self) {
        if self.server.host.is_empty() {
            self.server.host = default_server_host();
        }
        if self.server.port == 0 {
            self.server.port = default_server_port();
        }
        if self.store.path.is_empty() {
            self.store.path = default_store_path();
        }
        if self.geocoding.base_url.is_empty() {
            self.geocoding.base_url = default_geocoding_base_url();
        }
        if self.geocoding.timeout_ms == 0 {
            self.geocoding.timeout_ms = default_geocoding_timeout();
        }
        if self.geocoding.user_agent.is_empty() {
            self.geocoding.user_agent = default_geocoding_user_agent();
        }
        if self.spin.fps == 0 {
            self.spin.fps = default_fps();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
        if self.share.base_url.is_empty() {
            self.share.base_url = default_share_base_url();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    fn validate_numeric_ranges(&self) -> Result<()> {
        if !(self.spin.initial_speed > 0.0) {
            return Err(WheelError::config("Spin initial speed must be positive").into());
        }

        if self.spin.duration_ms == 0 {
            return Err(WheelError::config("Spin duration must be greater than zero").into());
        }

        if self.spin.fps > 240 {
            return Err(WheelError::config("Spin frame rate cannot exceed 240 fps").into());
        }

        if !(0.0..=180.0).contains(&self.spin.front_tolerance_deg) {
            return Err(WheelError::config(
                "Front tolerance must be between 0 and 180 degrees",
            )
            .into());
        }

        if self.geocoding.timeout_ms > 60_000 {
            return Err(WheelError::config(
                "Geocoding timeout cannot exceed 60000 ms",
            )
            .into());
        }

        if !(self.globe.max_radius > 0.0) {
            return Err(WheelError::config("Globe radius must be positive").into());
        }

        if self.stars.count > 100_000 {
            return Err(WheelError::config("Star count cannot exceed 100000").into());
        }

        Ok(())
    }

    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(WheelError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(WheelError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        for (name, url) in [
            ("Geocoding base URL", &self.geocoding.base_url),
            ("Share base URL", &self.share.base_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(WheelError::config(format!(
                    "{name} must be a valid HTTP or HTTPS URL"
                ))
                .into());
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = WheelConfig::default();
        assert_eq!(config.server.port, 3001);
        assert_eq!(config.geocoding.timeout(), Duration::from_secs(3));
        assert_eq!(config.spin.initial_speed, 5.0);
        assert_eq!(config.spin.duration(), Duration::from_secs(5));
        assert_eq!(config.spin.front_tolerance_deg, 30.0);
        assert_eq!(config.spin.win_effect(), Duration::from_secs(3));
        assert_eq!(config.stars.count, 5000);
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_invalid_log_level() {
        let mut config = WheelConfig::default();
        config.logging.level = "invalid".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_config_validation_numeric_ranges() {
        let mut config = WheelConfig::default();
        config.geocoding.timeout_ms = 120_000;
        let result = config.validate();
        assert!(result.unwrap_err().to_string().contains("timeout cannot exceed"));

        let mut config = WheelConfig::default();
        config.spin.initial_speed = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_rejects_non_http_url() {
        let mut config = WheelConfig::default();
        config.geocoding.base_url = "ftp://example.com".to_string();
        let result = config.validate();
        assert!(result.unwrap_err().to_string().contains("HTTP or HTTPS"));
    }

    #[test]
    fn test_apply_defaults_fills_zeroed_fields() {
        let mut config = WheelConfig::default();
        config.server.port = 0;
        config.spin.fps = 0;
        config.logging.format.clear();
        config.apply_defaults();

        assert_eq!(config.server.port, 3001);
        assert_eq!(config.spin.fps, 60);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_load_from_toml_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[server]\nport = 8080\n\n[spin]\nduration_ms = 4000\n\n[logging]\nformat = \"json\""
        )
        .unwrap();

        let config = WheelConfig::load_from_path(Some(file.path().to_path_buf())).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.spin.duration_ms, 4000);
        assert_eq!(config.spin.initial_speed, 5.0);
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn test_frame_interval() {
        let config = SpinConfig::default();
        let interval = config.frame_interval();
        assert!(interval > Duration::from_millis(16) && interval < Duration::from_millis(17));
    }

    #[test]
    fn test_config_path_generation() {
        if let Some(path) = WheelConfig::get_config_path() {
            assert!(path.to_string_lossy().contains("earthwheel"));
            assert!(path.to_string_lossy().contains("config.toml"));
        }
    }
}
