//! Image format support
//!
//! This module decides which files the pipeline accepts, detects content
//! types, and provides the default adapters for the loader and geotag ports:
//! `ImageLoader` (filesystem read + `image` decode) and `ExifGeotagReader`
//! (`kamadak-exif`).

use std::path::Path;

pub mod decode;
pub mod exif_gps;

pub use decode::ImageLoader;
pub use exif_gps::ExifGeotagReader;

/// File extensions accepted when scanning for photos
pub const SUPPORTED_EXTENSIONS: &[&str] =
    &["jpg", "jpeg", "png", "tif", "tiff", "webp", "heic", "heif"];

/// Containers we read metadata from but cannot decode pixels for
const METADATA_ONLY_EXTENSIONS: &[&str] = &["heic", "heif"];

fn extension_of(file_name: &str) -> Option<String> {
    Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

/// Check whether a path has a supported photo extension
pub fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| SUPPORTED_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Check whether a file is only read for metadata (no pixel decode)
pub fn is_metadata_only(file_name: &str) -> bool {
    extension_of(file_name)
        .map(|e| METADATA_ONLY_EXTENSIONS.contains(&e.as_str()))
        .unwrap_or(false)
}

/// Detect the content type of a payload.
///
/// Magic bytes win; the file name is only consulted when the content is not
/// a format the `image` crate recognizes.
pub fn detect_mime(file_name: &str, data: &[u8]) -> String {
    if let Ok(format) = image::guess_format(data) {
        return format.to_mime_type().to_string();
    }

    mime_guess::from_path(file_name)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}
