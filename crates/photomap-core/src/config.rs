use crate::error::{PhotomapError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::Path;

pub const DEFAULT_MAX_CONCURRENCY: usize = 16;
pub const DEFAULT_MAP_CENTER: (f64, f64) = (39.5, -98.35);
pub const DEFAULT_MAP_ZOOM: u8 = 4;
pub const DEFAULT_TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Loaded from config file
    File,
    /// Loaded from environment variable
    Environment,
    /// Provided via CLI argument
    Cli,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
            ConfigSource::Cli => 3,
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has higher precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() > self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

/// Layered configuration for Photomap
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    pub max_concurrency: ConfigValue<usize>,
    pub timeout_secs: ConfigValue<Option<u64>>,
    pub verify_decode: ConfigValue<bool>,
    pub map_center: ConfigValue<(f64, f64)>,
    pub map_zoom: ConfigValue<u8>,
    pub tile_url: ConfigValue<String>,
}

impl LayeredConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        Self {
            max_concurrency: ConfigValue::new(DEFAULT_MAX_CONCURRENCY, ConfigSource::Default),
            timeout_secs: ConfigValue::new(None, ConfigSource::Default),
            verify_decode: ConfigValue::new(true, ConfigSource::Default),
            map_center: ConfigValue::new(DEFAULT_MAP_CENTER, ConfigSource::Default),
            map_zoom: ConfigValue::new(DEFAULT_MAP_ZOOM, ConfigSource::Default),
            tile_url: ConfigValue::new(DEFAULT_TILE_URL.to_string(), ConfigSource::Default),
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| PhotomapError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to read config file: {}", e),
            })?;

        let file_config: FileConfig =
            toml::from_str(&content).map_err(|e| PhotomapError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {}", e),
            })?;

        if let Some(max_concurrency) = file_config.max_concurrency {
            self.max_concurrency
                .update(validate_concurrency(max_concurrency)?, ConfigSource::File);
        }

        if let Some(timeout_secs) = file_config.timeout_secs {
            self.timeout_secs.update(Some(timeout_secs), ConfigSource::File);
        }

        if let Some(verify_decode) = file_config.verify_decode {
            self.verify_decode.update(verify_decode, ConfigSource::File);
        }

        if let Some([lat, lon]) = file_config.map_center {
            self.map_center.update(validate_center(lat, lon)?, ConfigSource::File);
        }

        if let Some(map_zoom) = file_config.map_zoom {
            self.map_zoom.update(map_zoom, ConfigSource::File);
        }

        if let Some(tile_url) = file_config.tile_url {
            self.tile_url.update(tile_url, ConfigSource::File);
        }

        Ok(self)
    }

    /// Load configuration from environment variables
    pub fn load_from_env(self) -> Self {
        self.load_from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from any key lookup (environment-shaped)
    pub fn load_from_lookup<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        // PHOTOMAP_MAX_CONCURRENCY
        if let Some(raw) = lookup("PHOTOMAP_MAX_CONCURRENCY") {
            match raw.parse::<usize>().map_err(|e| e.to_string()).and_then(|n| {
                validate_concurrency(n).map_err(|e| e.to_string())
            }) {
                Ok(n) => self.max_concurrency.update(n, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid PHOTOMAP_MAX_CONCURRENCY value '{}': expected a positive integer",
                    raw
                ),
            }
        }

        // PHOTOMAP_TIMEOUT_SECS
        if let Some(raw) = lookup("PHOTOMAP_TIMEOUT_SECS") {
            match raw.parse::<u64>() {
                Ok(secs) => self.timeout_secs.update(Some(secs), ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid PHOTOMAP_TIMEOUT_SECS value '{}': expected whole seconds",
                    raw
                ),
            }
        }

        // PHOTOMAP_VERIFY_DECODE
        if let Some(raw) = lookup("PHOTOMAP_VERIFY_DECODE") {
            match parse_bool(&raw) {
                Some(flag) => self.verify_decode.update(flag, ConfigSource::Environment),
                None => tracing::warn!(
                    "Invalid PHOTOMAP_VERIFY_DECODE value '{}': expected true or false",
                    raw
                ),
            }
        }

        // PHOTOMAP_MAP_CENTER
        if let Some(raw) = lookup("PHOTOMAP_MAP_CENTER") {
            match parse_center(&raw) {
                Ok(center) => self.map_center.update(center, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid PHOTOMAP_MAP_CENTER value '{}': expected 'lat,lon'",
                    raw
                ),
            }
        }

        // PHOTOMAP_MAP_ZOOM
        if let Some(raw) = lookup("PHOTOMAP_MAP_ZOOM") {
            match raw.parse::<u8>() {
                Ok(zoom) => self.map_zoom.update(zoom, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid PHOTOMAP_MAP_ZOOM value '{}': expected an integer zoom level",
                    raw
                ),
            }
        }

        // PHOTOMAP_TILE_URL
        if let Some(raw) = lookup("PHOTOMAP_TILE_URL") {
            self.tile_url.update(raw, ConfigSource::Environment);
        }

        self
    }

    /// Update configuration from CLI arguments
    pub fn update_from_cli(&mut self, overrides: CliConfigOverrides) {
        if let Some(max_concurrency) = overrides.max_concurrency {
            self.max_concurrency.update(max_concurrency.max(1), ConfigSource::Cli);
        }

        if let Some(timeout_secs) = overrides.timeout_secs {
            self.timeout_secs.update(Some(timeout_secs), ConfigSource::Cli);
        }

        if let Some(verify_decode) = overrides.verify_decode {
            self.verify_decode.update(verify_decode, ConfigSource::Cli);
        }

        if let Some(map_center) = overrides.map_center {
            self.map_center.update(map_center, ConfigSource::Cli);
        }

        if let Some(map_zoom) = overrides.map_zoom {
            self.map_zoom.update(map_zoom, ConfigSource::Cli);
        }
    }

    /// Get all configuration values as a map for inspection
    pub fn to_inspection_map(&self) -> HashMap<String, (String, ConfigSource)> {
        let mut map = HashMap::new();

        map.insert(
            "max_concurrency".to_string(),
            (self.max_concurrency.value.to_string(), self.max_concurrency.source),
        );

        map.insert(
            "timeout_secs".to_string(),
            (
                self.timeout_secs
                    .value
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "none".to_string()),
                self.timeout_secs.source,
            ),
        );

        map.insert(
            "verify_decode".to_string(),
            (self.verify_decode.value.to_string(), self.verify_decode.source),
        );

        let (lat, lon) = self.map_center.value;
        map.insert(
            "map_center".to_string(),
            (format!("{}, {}", lat, lon), self.map_center.source),
        );

        map.insert(
            "map_zoom".to_string(),
            (self.map_zoom.value.to_string(), self.map_zoom.source),
        );

        map.insert("tile_url".to_string(), (self.tile_url.value.clone(), self.tile_url.source));

        map
    }
}

impl Default for LayeredConfig {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Configuration loaded from TOML file
#[derive(Debug, Deserialize, Serialize)]
struct FileConfig {
    max_concurrency: Option<usize>,
    timeout_secs: Option<u64>,
    verify_decode: Option<bool>,
    map_center: Option<[f64; 2]>,
    map_zoom: Option<u8>,
    tile_url: Option<String>,
}

/// CLI configuration overrides
#[derive(Debug, Default)]
pub struct CliConfigOverrides {
    pub max_concurrency: Option<usize>,
    pub timeout_secs: Option<u64>,
    pub verify_decode: Option<bool>,
    pub map_center: Option<(f64, f64)>,
    pub map_zoom: Option<u8>,
}

fn validate_concurrency(n: usize) -> Result<usize> {
    if n == 0 {
        return Err(PhotomapError::ConfigInvalid {
            key: "max_concurrency".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }
    Ok(n)
}

fn validate_center(lat: f64, lon: f64) -> Result<(f64, f64)> {
    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
        return Err(PhotomapError::ConfigInvalid {
            key: "map_center".to_string(),
            reason: format!("({}, {}) is outside [-90, 90] x [-180, 180]", lat, lon),
        });
    }
    Ok((lat, lon))
}

/// Parse a "lat,lon" pair
pub fn parse_center(s: &str) -> Result<(f64, f64)> {
    let invalid = || PhotomapError::ConfigInvalid {
        key: "map_center".to_string(),
        reason: format!("Invalid map center: {}. Use 'lat,lon'", s),
    };

    let (lat, lon) = s.split_once(',').ok_or_else(invalid)?;
    let lat: f64 = lat.trim().parse().map_err(|_| invalid())?;
    let lon: f64 = lon.trim().parse().map_err(|_| invalid())?;
    validate_center(lat, lon)
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
