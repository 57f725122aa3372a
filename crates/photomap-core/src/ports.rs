//! Port trait definitions
//!
//! These traits define the interfaces that adapters must implement.

pub mod extraction;
pub mod loader;

pub use extraction::GeotagReader;
pub use loader::{DecodedPhoto, PhotoLoader};
