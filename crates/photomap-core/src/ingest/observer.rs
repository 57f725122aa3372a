use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::PhotomapError;

/// Why a file produced no record
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DropKind {
    /// The file could not be read
    FileRead,
    /// The content is not a decodable image
    Decode,
    /// Latitude or longitude triple absent, or outside the valid range
    MissingGeotag,
    /// Per-file time limit exceeded
    TimedOut,
    /// The batch was cancelled before this file finished
    Cancelled,
}

impl DropKind {
    /// Classify a pipeline error.
    ///
    /// Unparseable EXIF and out-of-range coordinates count as missing tags:
    /// the image itself was fine, it just carries no usable location.
    pub fn from_error(err: &PhotomapError) -> Self {
        match err {
            PhotomapError::FileRead { .. } | PhotomapError::Io(_) => DropKind::FileRead,
            PhotomapError::MissingGeotag { .. }
            | PhotomapError::OutOfRange { .. }
            | PhotomapError::Exif(_) => DropKind::MissingGeotag,
            PhotomapError::TimedOut { .. } => DropKind::TimedOut,
            PhotomapError::Cancelled { .. } => DropKind::Cancelled,
            PhotomapError::Decode { .. }
            | PhotomapError::ConfigInvalid { .. }
            | PhotomapError::Render(_)
            | PhotomapError::Serialization(_) => DropKind::Decode,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DropKind::FileRead => "file_read",
            DropKind::Decode => "decode",
            DropKind::MissingGeotag => "missing_geotag",
            DropKind::TimedOut => "timed_out",
            DropKind::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for DropKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opt-in visibility into files the pipeline drops.
///
/// Called once per dropped file. Dropping stays silent towards the
/// collection whether or not an observer is installed.
pub trait DropObserver: Send + Sync {
    fn on_drop(&self, file_name: &str, kind: DropKind);
}

impl<F> DropObserver for F
where
    F: Fn(&str, DropKind) + Send + Sync,
{
    fn on_drop(&self, file_name: &str, kind: DropKind) {
        self(file_name, kind)
    }
}
