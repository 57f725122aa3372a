use async_trait::async_trait;
use bytes::Bytes;

use crate::error::Result;
use crate::models::PhotoSource;

/// A photo whose content has been fully read and decoded
#[derive(Debug, Clone)]
pub struct DecodedPhoto {
    /// Display name of the source
    pub file_name: String,

    /// Encoded payload exactly as read
    pub data: Bytes,

    /// Detected content type
    pub mime: String,

    /// Pixel dimensions, when the pixels were decoded
    pub dimensions: Option<(u32, u32)>,
}

/// Port for the two suspending steps of the ingest pipeline
#[async_trait]
pub trait PhotoLoader: Send + Sync {
    /// Read the full binary content of a source
    async fn read(&self, source: &PhotoSource) -> Result<Bytes>;

    /// Decode content far enough that metadata extraction can run
    async fn decode(&self, file_name: &str, data: Bytes) -> Result<DecodedPhoto>;
}
