//! Error types for Photomap

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::models::Axis;

#[derive(Debug, Error)]
pub enum PhotomapError {
    // Pipeline errors
    #[error("Failed to read {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode image {file_name}: {reason}")]
    Decode { file_name: String, reason: String },

    #[error("No {axis} geotag in {file_name}")]
    MissingGeotag { file_name: String, axis: Axis },

    #[error("Coordinates ({latitude}, {longitude}) in {file_name} are out of range")]
    OutOfRange {
        file_name: String,
        latitude: f64,
        longitude: f64,
    },

    #[error("Ingest of {file_name} timed out after {limit:?}")]
    TimedOut { file_name: String, limit: Duration },

    #[error("Ingest of {file_name} was cancelled")]
    Cancelled { file_name: String },

    // Metadata errors
    #[error("EXIF error: {0}")]
    Exif(String),

    // Configuration errors
    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    // Rendering errors
    #[error("Render error: {0}")]
    Render(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type Result<T> = std::result::Result<T, PhotomapError>;
