use serde::Serialize;

use super::data_url;
use crate::models::PhotoRecord;

/// A gallery row: the image, its name and a readable coordinate pair
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GalleryEntry {
    pub index: usize,
    pub file_name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// `Lat: 40.50000, Lon: -74.00000`
    pub coordinates: String,
    /// Inline image source
    pub src: String,
}

impl GalleryEntry {
    pub fn from_record(index: usize, record: &PhotoRecord) -> Self {
        Self {
            index,
            file_name: record.file_name.clone(),
            latitude: record.latitude,
            longitude: record.longitude,
            coordinates: format_coordinates(record.latitude, record.longitude),
            src: data_url(&record.mime, &record.image_data),
        }
    }
}

/// Gallery entries in collection order
pub fn gallery(records: &[PhotoRecord]) -> Vec<GalleryEntry> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| GalleryEntry::from_record(index, record))
        .collect()
}

pub fn format_coordinates(latitude: f64, longitude: f64) -> String {
    format!("Lat: {:.5}, Lon: {:.5}", latitude, longitude)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    #[test]
    fn test_coordinates_have_five_decimals() {
        assert_eq!(format_coordinates(40.5, -74.0), "Lat: 40.50000, Lon: -74.00000");
        assert_eq!(format_coordinates(39.123456789, -98.35), "Lat: 39.12346, Lon: -98.35000");
    }

    #[test]
    fn test_gallery_entries() {
        let records = vec![PhotoRecord {
            image_data: Bytes::from_static(b"abc"),
            mime: "image/png".to_string(),
            latitude: -33.8688,
            longitude: 151.2093,
            file_name: "sydney.png".to_string(),
        }];

        let entries = gallery(&records);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].index, 0);
        assert_eq!(entries[0].file_name, "sydney.png");
        assert_eq!(entries[0].coordinates, "Lat: -33.86880, Lon: 151.20930");
        assert_eq!(entries[0].src, "data:image/png;base64,YWJj");
    }
}
