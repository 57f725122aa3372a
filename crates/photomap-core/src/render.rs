//! Output renderers for a photo collection snapshot
//!
//! Renderers are pure functions of a `&[PhotoRecord]` slice. Callers take a
//! snapshot of the collection and re-render whenever its revision changes.

pub mod features;
pub mod gallery;
pub mod html;

pub use features::to_feature_collection;
pub use gallery::{format_coordinates, gallery, GalleryEntry};
pub use html::{escape_html, render_map_page, MapSettings};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Inline `data:` URL for an image payload
pub fn data_url(mime: &str, data: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(data))
}
