pub mod geotag;
pub mod photo;

pub use geotag::{Axis, Coordinates, Dms, HemisphereRef, RawGeotags};
pub use photo::{PhotoRecord, PhotoSource};
