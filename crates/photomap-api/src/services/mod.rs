mod ingest;

pub use ingest::{IngestService, Upload};
