//! GPS tag extraction with `kamadak-exif`

use std::io::Cursor;

use exif::{Field, In, Reader, Tag, Value};

use crate::error::{PhotomapError, Result};
use crate::models::{Axis, Dms, HemisphereRef, RawGeotags};
use crate::ports::{DecodedPhoto, GeotagReader};

/// Reads the four GPS tags from the primary IFD of an EXIF container
#[derive(Debug, Clone, Copy, Default)]
pub struct ExifGeotagReader;

impl GeotagReader for ExifGeotagReader {
    fn read_geotags(&self, photo: &DecodedPhoto) -> Result<RawGeotags> {
        let mut cursor = Cursor::new(photo.data.as_ref());

        let exif = match Reader::new().read_from_container(&mut cursor) {
            Ok(exif) => exif,
            Err(exif::Error::NotFound(_)) => return Ok(RawGeotags::default()),
            Err(e) => return Err(PhotomapError::Exif(e.to_string())),
        };

        Ok(RawGeotags {
            latitude: exif.get_field(Tag::GPSLatitude, In::PRIMARY).and_then(parse_dms),
            longitude: exif.get_field(Tag::GPSLongitude, In::PRIMARY).and_then(parse_dms),
            latitude_ref: exif
                .get_field(Tag::GPSLatitudeRef, In::PRIMARY)
                .and_then(|f| parse_reference(f, Axis::Latitude)),
            longitude_ref: exif
                .get_field(Tag::GPSLongitudeRef, In::PRIMARY)
                .and_then(|f| parse_reference(f, Axis::Longitude)),
        })
    }
}

/// Parse a degrees/minutes/seconds triple from rational values.
///
/// Fewer than three components, a zero denominator or a negative component
/// count as "no triple".
fn parse_dms(field: &Field) -> Option<Dms> {
    let dms = match &field.value {
        Value::Rational(values) if values.len() >= 3 => Dms::new(
            values[0].to_f64(),
            values[1].to_f64(),
            values[2].to_f64(),
        ),
        Value::SRational(values) if values.len() >= 3 => Dms::new(
            values[0].to_f64(),
            values[1].to_f64(),
            values[2].to_f64(),
        ),
        _ => return None,
    };

    dms.is_valid().then_some(dms)
}

fn parse_reference(field: &Field, axis: Axis) -> Option<HemisphereRef> {
    match &field.value {
        Value::Ascii(values) => values
            .first()
            .and_then(|v| HemisphereRef::from_tag(axis, &String::from_utf8_lossy(v))),
        _ => Some(axis.positive_reference()),
    }
}
