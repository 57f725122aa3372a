use geojson::{Feature, FeatureCollection, Geometry, JsonObject, JsonValue, Value};

use crate::models::PhotoRecord;

/// One `Point` feature per record, positions in `[longitude, latitude]` order
pub fn to_feature_collection(records: &[PhotoRecord]) -> FeatureCollection {
    let features = records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            let mut properties = JsonObject::new();
            properties.insert("file_name".to_string(), JsonValue::from(record.file_name.clone()));
            properties.insert("latitude".to_string(), JsonValue::from(record.latitude));
            properties.insert("longitude".to_string(), JsonValue::from(record.longitude));
            properties.insert("index".to_string(), JsonValue::from(index));

            Feature {
                geometry: Some(Geometry::new(Value::Point(vec![
                    record.longitude,
                    record.latitude,
                ]))),
                properties: Some(properties),
                id: None,
                bbox: None,
                foreign_members: None,
            }
        })
        .collect();

    FeatureCollection {
        features,
        bbox: None,
        foreign_members: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    fn record(name: &str, latitude: f64, longitude: f64) -> PhotoRecord {
        PhotoRecord {
            image_data: Bytes::from_static(b"img"),
            mime: "image/jpeg".to_string(),
            latitude,
            longitude,
            file_name: name.to_string(),
        }
    }

    #[test]
    fn test_points_are_lon_lat() {
        let fc = to_feature_collection(&[record("nyc.jpg", 40.5, -74.0)]);
        assert_eq!(fc.features.len(), 1);

        let geometry = fc.features[0].geometry.as_ref().unwrap();
        match &geometry.value {
            Value::Point(position) => assert_eq!(position.as_slice(), &[-74.0, 40.5]),
            other => panic!("expected a point, got {:?}", other),
        }
    }

    #[test]
    fn test_properties() {
        let fc = to_feature_collection(&[record("a.jpg", 1.0, 2.0), record("b.jpg", 3.0, 4.0)]);
        let props = fc.features[1].properties.as_ref().unwrap();

        assert_eq!(props["file_name"], "b.jpg");
        assert_eq!(props["latitude"], 3.0);
        assert_eq!(props["longitude"], 4.0);
        assert_eq!(props["index"], 1);
    }

    #[test]
    fn test_empty_collection() {
        let fc = to_feature_collection(&[]);
        assert!(fc.features.is_empty());
        let json = serde_json::to_value(&fc).unwrap();
        assert_eq!(json["type"], "FeatureCollection");
    }
}
