use bytes::Bytes;
use std::path::{Path, PathBuf};

use super::Coordinates;

/// A located photo: the durable unit of session state
#[derive(Debug, Clone, PartialEq)]
pub struct PhotoRecord {
    /// Encoded image payload, shared between map popup and gallery
    pub image_data: Bytes,

    /// Content type of `image_data` (e.g. "image/jpeg")
    pub mime: String,

    /// Signed decimal degrees, [-90, 90]
    pub latitude: f64,

    /// Signed decimal degrees, [-180, 180]
    pub longitude: f64,

    /// Original file name; display only, not unique
    pub file_name: String,
}

impl PhotoRecord {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }
}

/// One file handed to the ingest pipeline
#[derive(Debug, Clone)]
pub enum PhotoSource {
    /// File on disk, read by the pipeline
    Path(PathBuf),

    /// Content already in memory (e.g. a multipart upload)
    Upload { file_name: String, data: Bytes },
}

impl PhotoSource {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        PhotoSource::Path(path.into())
    }

    pub fn upload(file_name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        PhotoSource::Upload {
            file_name: file_name.into(),
            data: data.into(),
        }
    }

    /// Display name of the source
    pub fn file_name(&self) -> String {
        match self {
            PhotoSource::Path(path) => path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
            PhotoSource::Upload { file_name, .. } => file_name.clone(),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            PhotoSource::Path(path) => Some(path),
            PhotoSource::Upload { .. } => None,
        }
    }
}
