//! Configuration loading utilities for CLI commands

use anyhow::Result;
use photomap_core::config::{CliConfigOverrides, LayeredConfig};
use photomap_core::PhotomapError;
use std::path::{Path, PathBuf};

use crate::errors;

/// Config file picked up from the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "photomap.toml";

/// Resolve which config file to read, if any
pub fn config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => {
            let local = PathBuf::from(DEFAULT_CONFIG_FILE);
            local.is_file().then_some(local)
        }
    }
}

/// Load layered configuration: defaults, file, environment
pub fn load_config(explicit: Option<&Path>) -> Result<LayeredConfig> {
    let mut config = LayeredConfig::with_defaults();

    if let Some(path) = config_path(explicit) {
        tracing::debug!(path = %path.display(), "Loading configuration file");
        config = config.load_from_file(&path).map_err(|e| match e {
            PhotomapError::ConfigInvalid { key, reason } => {
                anyhow::Error::new(errors::invalid_config(&key, &reason))
            }
            other => anyhow::Error::new(other),
        })?;
    }

    Ok(config.load_from_env())
}

/// Load layered configuration with CLI overrides
pub fn load_config_with_overrides(
    explicit: Option<&Path>,
    overrides: CliConfigOverrides,
) -> Result<LayeredConfig> {
    let mut config = load_config(explicit)?;
    config.update_from_cli(overrides);
    Ok(config)
}
