use crate::error::Result;
use crate::models::RawGeotags;

use super::DecodedPhoto;

/// Port for reading GPS tags out of a decoded photo
pub trait GeotagReader: Send + Sync {
    /// Read the latitude/longitude triples and their reference tags.
    ///
    /// Absent tags are `None`; an image with no metadata container at all
    /// yields `RawGeotags::default()` rather than an error.
    fn read_geotags(&self, photo: &DecodedPhoto) -> Result<RawGeotags>;
}
