use serde::{Deserialize, Serialize};
use std::fmt;

/// Coordinate axis a geotag encodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Latitude,
    Longitude,
}

impl Axis {
    /// Reference assumed when the image carries a triple but no reference tag.
    ///
    /// Latitude falls back to north and longitude to west. The pair is not
    /// symmetric: an unreferenced longitude always plots west.
    pub fn default_reference(self) -> HemisphereRef {
        match self {
            Axis::Latitude => HemisphereRef::North,
            Axis::Longitude => HemisphereRef::West,
        }
    }

    /// Hemisphere whose decimal degrees are positive
    pub fn positive_reference(self) -> HemisphereRef {
        match self {
            Axis::Latitude => HemisphereRef::North,
            Axis::Longitude => HemisphereRef::East,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Latitude => write!(f, "latitude"),
            Axis::Longitude => write!(f, "longitude"),
        }
    }
}

/// Hemisphere reference tag (N/S for latitude, E/W for longitude)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HemisphereRef {
    #[serde(rename = "N")]
    North,
    #[serde(rename = "S")]
    South,
    #[serde(rename = "E")]
    East,
    #[serde(rename = "W")]
    West,
}

impl HemisphereRef {
    /// Interpret a reference tag read for `axis`.
    ///
    /// An empty value is absent, so the axis default applies. Only the exact
    /// uppercase letters name a hemisphere; any other text that is present
    /// leaves the magnitude positive.
    pub fn from_tag(axis: Axis, value: &str) -> Option<Self> {
        match value.trim_end_matches('\0') {
            "" => None,
            "N" => Some(HemisphereRef::North),
            "S" => Some(HemisphereRef::South),
            "E" => Some(HemisphereRef::East),
            "W" => Some(HemisphereRef::West),
            _ => Some(axis.positive_reference()),
        }
    }

    pub fn as_char(self) -> char {
        match self {
            HemisphereRef::North => 'N',
            HemisphereRef::South => 'S',
            HemisphereRef::East => 'E',
            HemisphereRef::West => 'W',
        }
    }

    /// True for the hemispheres whose decimal degrees are negative
    pub fn is_negative(self) -> bool {
        matches!(self, HemisphereRef::South | HemisphereRef::West)
    }

    /// Mirrored hemisphere on the same axis
    pub fn opposite(self) -> Self {
        match self {
            HemisphereRef::North => HemisphereRef::South,
            HemisphereRef::South => HemisphereRef::North,
            HemisphereRef::East => HemisphereRef::West,
            HemisphereRef::West => HemisphereRef::East,
        }
    }

    pub fn axis(self) -> Axis {
        match self {
            HemisphereRef::North | HemisphereRef::South => Axis::Latitude,
            HemisphereRef::East | HemisphereRef::West => Axis::Longitude,
        }
    }
}

impl fmt::Display for HemisphereRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Sexagesimal angle magnitude: degrees, minutes, seconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dms {
    pub degrees: f64,
    pub minutes: f64,
    pub seconds: f64,
}

impl Dms {
    pub fn new(degrees: f64, minutes: f64, seconds: f64) -> Self {
        Self { degrees, minutes, seconds }
    }

    /// All components finite and non-negative
    pub fn is_valid(&self) -> bool {
        [self.degrees, self.minutes, self.seconds]
            .iter()
            .all(|v| v.is_finite() && *v >= 0.0)
    }
}

impl From<(f64, f64, f64)> for Dms {
    fn from((degrees, minutes, seconds): (f64, f64, f64)) -> Self {
        Self::new(degrees, minutes, seconds)
    }
}

impl fmt::Display for Dms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}° {}' {}\"", self.degrees, self.minutes, self.seconds)
    }
}

/// The four GPS tags read from one image, before conversion
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawGeotags {
    pub latitude: Option<Dms>,
    pub longitude: Option<Dms>,
    pub latitude_ref: Option<HemisphereRef>,
    pub longitude_ref: Option<HemisphereRef>,
}

impl RawGeotags {
    /// Latitude reference, falling back to the axis default
    pub fn latitude_ref_or_default(&self) -> HemisphereRef {
        self.latitude_ref.unwrap_or(Axis::Latitude.default_reference())
    }

    /// Longitude reference, falling back to the axis default
    pub fn longitude_ref_or_default(&self) -> HemisphereRef {
        self.longitude_ref.unwrap_or(Axis::Longitude.default_reference())
    }

    /// Both magnitude triples are present
    pub fn is_complete(&self) -> bool {
        self.latitude.is_some() && self.longitude.is_some()
    }

    /// First axis whose magnitude triple is missing, latitude checked first
    pub fn missing_axis(&self) -> Option<Axis> {
        if self.latitude.is_none() {
            Some(Axis::Latitude)
        } else if self.longitude.is_none() {
            Some(Axis::Longitude)
        } else {
            None
        }
    }
}

/// Signed decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Latitude in [-90, 90] and longitude in [-180, 180]
    pub fn in_range(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_from_tag() {
        use Axis::{Latitude, Longitude};

        assert_eq!(HemisphereRef::from_tag(Latitude, "N"), Some(HemisphereRef::North));
        assert_eq!(HemisphereRef::from_tag(Latitude, "S\0"), Some(HemisphereRef::South));
        assert_eq!(HemisphereRef::from_tag(Longitude, "W"), Some(HemisphereRef::West));
        assert_eq!(HemisphereRef::from_tag(Longitude, ""), None);
        assert_eq!(HemisphereRef::from_tag(Latitude, "\0"), None);
    }

    #[test]
    fn test_unrecognised_reference_stays_positive() {
        use Axis::{Latitude, Longitude};

        assert_eq!(HemisphereRef::from_tag(Longitude, "X"), Some(HemisphereRef::East));
        assert_eq!(HemisphereRef::from_tag(Longitude, "w"), Some(HemisphereRef::East));
        assert_eq!(HemisphereRef::from_tag(Latitude, "South"), Some(HemisphereRef::North));
        assert_eq!(HemisphereRef::from_tag(Latitude, " S"), Some(HemisphereRef::North));
    }

    #[test]
    fn test_axis_defaults_are_asymmetric() {
        assert_eq!(Axis::Latitude.default_reference(), HemisphereRef::North);
        assert_eq!(Axis::Longitude.default_reference(), HemisphereRef::West);
    }

    #[test]
    fn test_opposite_stays_on_axis() {
        for r in [
            HemisphereRef::North,
            HemisphereRef::South,
            HemisphereRef::East,
            HemisphereRef::West,
        ] {
            assert_eq!(r.opposite().axis(), r.axis());
            assert_ne!(r.opposite().is_negative(), r.is_negative());
            assert_eq!(r.opposite().opposite(), r);
        }
    }

    #[test]
    fn test_raw_geotags_defaults() {
        let tags = RawGeotags {
            latitude: Some(Dms::new(1.0, 0.0, 0.0)),
            longitude: Some(Dms::new(2.0, 0.0, 0.0)),
            latitude_ref: None,
            longitude_ref: None,
        };

        assert_eq!(tags.latitude_ref_or_default(), HemisphereRef::North);
        assert_eq!(tags.longitude_ref_or_default(), HemisphereRef::West);
        assert!(tags.is_complete());
        assert_eq!(tags.missing_axis(), None);
    }

    #[test]
    fn test_missing_axis() {
        let tags = RawGeotags {
            latitude: Some(Dms::new(1.0, 0.0, 0.0)),
            ..Default::default()
        };
        assert_eq!(tags.missing_axis(), Some(Axis::Longitude));
        assert_eq!(RawGeotags::default().missing_axis(), Some(Axis::Latitude));
    }

    #[test]
    fn test_dms_validity() {
        assert!(Dms::new(0.0, 0.0, 0.0).is_valid());
        assert!(!Dms::new(-1.0, 0.0, 0.0).is_valid());
        assert!(!Dms::new(1.0, f64::NAN, 0.0).is_valid());
    }
}
