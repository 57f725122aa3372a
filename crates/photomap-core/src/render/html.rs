//! Standalone HTML map page
//!
//! The page loads Leaflet from a CDN, places one marker per record and lists
//! the same records in a gallery column. Popups and the gallery share the
//! embedded image payloads.

use serde::Serialize;

use super::gallery::{gallery, GalleryEntry};
use crate::config::{LayeredConfig, DEFAULT_MAP_CENTER, DEFAULT_MAP_ZOOM, DEFAULT_TILE_URL};
use crate::error::{PhotomapError, Result};
use crate::models::PhotoRecord;

const LEAFLET_VERSION: &str = "1.9.4";
const DEFAULT_ATTRIBUTION: &str = "&copy; OpenStreetMap contributors";

/// Map view and tile source
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapSettings {
    /// Initial `(latitude, longitude)`
    pub center: (f64, f64),
    pub zoom: u8,
    pub tile_url: String,
    /// Raw HTML shown in the map corner
    pub attribution: String,
    pub title: String,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            center: DEFAULT_MAP_CENTER,
            zoom: DEFAULT_MAP_ZOOM,
            tile_url: DEFAULT_TILE_URL.to_string(),
            attribution: DEFAULT_ATTRIBUTION.to_string(),
            title: "Photo Map".to_string(),
        }
    }
}

impl From<&LayeredConfig> for MapSettings {
    fn from(config: &LayeredConfig) -> Self {
        Self {
            center: config.map_center.value,
            zoom: config.map_zoom.value,
            tile_url: config.tile_url.value.clone(),
            ..Default::default()
        }
    }
}

#[derive(Serialize)]
struct MarkerData<'a> {
    lat: f64,
    lon: f64,
    name: &'a str,
    src: &'a str,
}

/// Render the full map page for a snapshot of the collection
pub fn render_map_page(records: &[PhotoRecord], settings: &MapSettings) -> Result<String> {
    let entries = gallery(records);

    let markers: Vec<MarkerData<'_>> = entries
        .iter()
        .map(|e| MarkerData {
            lat: e.latitude,
            lon: e.longitude,
            name: &e.file_name,
            src: &e.src,
        })
        .collect();

    let markers_json = script_json(&markers)?;
    let tile_url_json = script_json(&settings.tile_url)?;
    let attribution_json = script_json(&settings.attribution)?;
    let (lat, lon) = settings.center;

    let mut items = String::new();
    for entry in &entries {
        items.push_str(&gallery_item(entry));
    }

    let mut page = String::with_capacity(PAGE_HEAD.len() + items.len() + markers_json.len() + 512);
    page.push_str(
        &PAGE_HEAD
            .replace("{title}", &escape_html(&settings.title))
            .replace("{leaflet}", LEAFLET_VERSION),
    );
    page.push_str(&format!(
        "<div id=\"map\"></div>\n<aside id=\"gallery\">\n<h2>Photos ({})</h2>\n{}</aside>\n",
        entries.len(),
        items
    ));
    page.push_str(&format!(
        r#"<script src="https://unpkg.com/leaflet@{leaflet}/dist/leaflet.js"></script>
<script>
const map = L.map("map").setView([{lat}, {lon}], {zoom});
L.tileLayer({tiles}, {{ attribution: {attribution} }}).addTo(map);
const photos = {markers};
for (const p of photos) {{
  const popup = document.createElement("div");
  const img = document.createElement("img");
  img.src = p.src;
  img.width = 200;
  const caption = document.createElement("p");
  caption.textContent = p.name;
  popup.append(img, caption);
  L.marker([p.lat, p.lon]).addTo(map).bindPopup(popup);
}}
</script>
</body>
</html>
"#,
        leaflet = LEAFLET_VERSION,
        lat = lat,
        lon = lon,
        zoom = settings.zoom,
        tiles = tile_url_json,
        attribution = attribution_json,
        markers = markers_json,
    ));

    Ok(page)
}

fn gallery_item(entry: &GalleryEntry) -> String {
    format!(
        "<figure class=\"photo\">\n  <img src=\"{src}\" alt=\"{name}\" width=\"100\">\n  <figcaption><strong>{name}</strong><br>{coords}</figcaption>\n</figure>\n",
        src = escape_html(&entry.src),
        name = escape_html(&entry.file_name),
        coords = escape_html(&entry.coordinates),
    )
}

/// JSON safe to inline in a `<script>` element
fn script_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let json = serde_json::to_string(value)
        .map_err(|e| PhotomapError::Serialization(e.to_string()))?;
    Ok(json.replace("</", "<\\/").replace("<!--", "<\\!--"))
}

/// Escape text for HTML element content and quoted attributes
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

const PAGE_HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<link rel="stylesheet" href="https://unpkg.com/leaflet@{leaflet}/dist/leaflet.css">
<style>
  body { margin: 0; display: flex; height: 100vh; font-family: sans-serif; }
  #map { flex: 3; }
  #gallery { flex: 1; overflow-y: auto; padding: 0 1rem; }
  .photo { margin: 1rem 0; }
</style>
</head>
<body>
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    fn record(name: &str) -> PhotoRecord {
        PhotoRecord {
            image_data: Bytes::from_static(b"abc"),
            mime: "image/jpeg".to_string(),
            latitude: 40.5,
            longitude: -74.0,
            file_name: name.to_string(),
        }
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a<b>&\"c'"), "a&lt;b&gt;&amp;&quot;c&#39;");
        assert_eq!(escape_html("plain.jpg"), "plain.jpg");
    }

    #[test]
    fn test_default_settings() {
        let settings = MapSettings::default();
        assert_eq!(settings.center, (39.5, -98.35));
        assert_eq!(settings.zoom, 4);
        assert!(settings.tile_url.contains("tile.openstreetmap.org"));
    }

    #[test]
    fn test_page_contains_map_and_gallery() {
        let page = render_map_page(&[record("nyc.jpg")], &MapSettings::default()).unwrap();

        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("setView([39.5, -98.35], 4)"));
        assert!(page.contains("Photos (1)"));
        assert!(page.contains("Lat: 40.50000, Lon: -74.00000"));
        assert!(page.contains("data:image/jpeg;base64,YWJj"));
    }

    #[test]
    fn test_page_escapes_file_names() {
        let page = render_map_page(&[record("<script>alert(1)</script>.jpg")], &MapSettings::default()).unwrap();

        assert!(!page.contains("<script>alert(1)"));
        assert!(page.contains("&lt;script&gt;alert(1)&lt;/script&gt;.jpg"));
        // The marker payload cannot close the inline script either
        assert!(page.contains(r"<\/script>.jpg"));
    }

    #[test]
    fn test_settings_from_config() {
        let mut config = LayeredConfig::with_defaults();
        config.map_zoom.value = 12;
        config.map_center.value = (51.5, -0.12);

        let settings = MapSettings::from(&config);
        let page = render_map_page(&[], &settings).unwrap();
        assert!(page.contains("setView([51.5, -0.12], 12)"));
        assert!(page.contains("Photos (0)"));
    }
}
