//! Sexagesimal to decimal degree conversion

use crate::error::{PhotomapError, Result};
use crate::models::{Coordinates, Dms, HemisphereRef, RawGeotags};

/// Convert a degree/minute/second magnitude and hemisphere reference to
/// signed decimal degrees.
///
/// The magnitude is computed first and the sign applied once afterwards, so
/// S and W always yield the negation of N and E for the same triple. Input
/// components are expected to be non-negative; filtering malformed values is
/// the caller's job.
pub fn convert(dms: Dms, reference: HemisphereRef) -> f64 {
    let magnitude = dms.degrees + dms.minutes / 60.0 + dms.seconds / 3600.0;
    if reference.is_negative() {
        -magnitude
    } else {
        magnitude
    }
}

/// Resolve raw tags into coordinates, applying the per-axis reference defaults.
///
/// Fails with `MissingGeotag` when either magnitude triple is absent and
/// with `OutOfRange` when the converted pair is not a point on the globe.
pub fn resolve_coordinates(tags: &RawGeotags, file_name: &str) -> Result<Coordinates> {
    match (tags.latitude, tags.longitude) {
        (Some(latitude), Some(longitude)) => {
            let coordinates = Coordinates::new(
                convert(latitude, tags.latitude_ref_or_default()),
                convert(longitude, tags.longitude_ref_or_default()),
            );
            if !coordinates.in_range() {
                return Err(PhotomapError::OutOfRange {
                    file_name: file_name.to_string(),
                    latitude: coordinates.latitude,
                    longitude: coordinates.longitude,
                });
            }
            Ok(coordinates)
        }
        _ => Err(PhotomapError::MissingGeotag {
            file_name: file_name.to_string(),
            // is_complete() is false here, so an axis is always missing
            axis: tags.missing_axis().unwrap_or(crate::models::Axis::Latitude),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Axis;
    use proptest::prelude::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_zero() {
        assert_eq!(convert(Dms::new(0.0, 0.0, 0.0), HemisphereRef::North), 0.0);
    }

    #[test]
    fn test_half_degree() {
        let dms = Dms::new(39.0, 30.0, 0.0);
        assert!((convert(dms, HemisphereRef::North) - 39.5).abs() < EPS);
        assert!((convert(dms, HemisphereRef::South) + 39.5).abs() < EPS);
    }

    #[test]
    fn test_seconds_contribute() {
        // 12° 34' 56" = 12.582222...
        let dd = convert(Dms::new(12.0, 34.0, 56.0), HemisphereRef::East);
        assert!((dd - 12.582_222_222_222).abs() < 1e-9);
    }

    #[test]
    fn test_west_is_negative() {
        let dd = convert(Dms::new(74.0, 0.0, 0.0), HemisphereRef::West);
        assert!((dd + 74.0).abs() < EPS);
    }

    #[test]
    fn test_resolve_applies_defaults() {
        let tags = RawGeotags {
            latitude: Some(Dms::new(40.0, 30.0, 0.0)),
            longitude: Some(Dms::new(74.0, 0.0, 0.0)),
            latitude_ref: None,
            longitude_ref: None,
        };

        let coords = resolve_coordinates(&tags, "a.jpg").unwrap();
        assert!((coords.latitude - 40.5).abs() < EPS);
        assert!((coords.longitude + 74.0).abs() < EPS);
    }

    #[test]
    fn test_resolve_explicit_east() {
        let tags = RawGeotags {
            latitude: Some(Dms::new(48.0, 51.0, 29.0)),
            longitude: Some(Dms::new(2.0, 17.0, 40.0)),
            latitude_ref: Some(HemisphereRef::North),
            longitude_ref: Some(HemisphereRef::East),
        };

        let coords = resolve_coordinates(&tags, "paris.jpg").unwrap();
        assert!(coords.latitude > 48.85 && coords.latitude < 48.86);
        assert!(coords.longitude > 2.29 && coords.longitude < 2.30);
    }

    #[test]
    fn test_resolve_missing_longitude() {
        let tags = RawGeotags {
            latitude: Some(Dms::new(40.0, 30.0, 0.0)),
            ..Default::default()
        };

        match resolve_coordinates(&tags, "half.jpg") {
            Err(PhotomapError::MissingGeotag { file_name, axis }) => {
                assert_eq!(file_name, "half.jpg");
                assert_eq!(axis, Axis::Longitude);
            }
            other => panic!("expected MissingGeotag, got {:?}", other),
        }
    }

    #[test]
    fn test_resolve_rejects_out_of_range() {
        let tags = RawGeotags {
            latitude: Some(Dms::new(200.0, 0.0, 0.0)),
            longitude: Some(Dms::new(74.0, 0.0, 0.0)),
            latitude_ref: Some(HemisphereRef::North),
            longitude_ref: Some(HemisphereRef::West),
        };
        assert!(matches!(
            resolve_coordinates(&tags, "bad.jpg"),
            Err(PhotomapError::OutOfRange { .. })
        ));

        let tags = RawGeotags {
            latitude: Some(Dms::new(90.0, 0.0, 0.0)),
            longitude: Some(Dms::new(180.0, 0.0, 0.0)),
            ..Default::default()
        };
        let coords = resolve_coordinates(&tags, "edge.jpg").unwrap();
        assert_eq!(coords.latitude, 90.0);
        assert_eq!(coords.longitude, -180.0);
    }

    fn dms_strategy() -> impl Strategy<Value = Dms> {
        (0.0f64..180.0, 0.0f64..60.0, 0.0f64..60.0).prop_map(Dms::from)
    }

    fn reference_strategy() -> impl Strategy<Value = HemisphereRef> {
        prop_oneof![
            Just(HemisphereRef::North),
            Just(HemisphereRef::South),
            Just(HemisphereRef::East),
            Just(HemisphereRef::West),
        ]
    }

    proptest! {
        #[test]
        fn prop_opposite_reference_mirrors(dms in dms_strategy(), reference in reference_strategy()) {
            let a = convert(dms, reference);
            let b = convert(dms, reference.opposite());
            prop_assert_eq!(a.abs(), b.abs());
            prop_assert_eq!(a, -b);
        }

        #[test]
        fn prop_convert_is_pure(dms in dms_strategy(), reference in reference_strategy()) {
            prop_assert_eq!(convert(dms, reference), convert(dms, reference));
        }

        #[test]
        fn prop_sign_follows_reference(dms in dms_strategy(), reference in reference_strategy()) {
            let dd = convert(dms, reference);
            if reference.is_negative() {
                prop_assert!(dd <= 0.0);
            } else {
                prop_assert!(dd >= 0.0);
            }
        }
    }
}
