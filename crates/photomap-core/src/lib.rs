//! Photomap Core - geotag conversion, photo ingest and rendering
//!
//! This crate contains the domain logic shared by the Photomap CLI and API:
//! the DMS converter, the per-file ingest pipeline, the session photo
//! collection and the map/gallery renderers.

pub mod collection;
pub mod config;
pub mod convert;
pub mod error;
pub mod formats;
pub mod ingest;
pub mod models;
pub mod ports;
pub mod render;

#[cfg(any(test, feature = "test-fixtures"))]
pub mod fixtures;

pub use collection::PhotoCollection;
pub use convert::{convert, resolve_coordinates};
pub use error::{PhotomapError, Result};
pub use ingest::{DropKind, DropObserver, IngestOptions, IngestPipeline, IngestReport};
