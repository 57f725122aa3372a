//! Default photo loader: filesystem read + `image` decode

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::{PhotomapError, Result};
use crate::formats::{detect_mime, is_metadata_only};
use crate::models::PhotoSource;
use crate::ports::{DecodedPhoto, PhotoLoader};

/// Reads sources with `tokio::fs` and decodes pixels on the blocking pool
#[derive(Debug, Clone)]
pub struct ImageLoader {
    verify_decode: bool,
}

impl ImageLoader {
    /// Loader that fully decodes every image before extraction
    pub fn new() -> Self {
        Self { verify_decode: true }
    }

    /// Toggle the pixel decode; when off, only the format is sniffed
    pub fn with_verify_decode(mut self, verify_decode: bool) -> Self {
        self.verify_decode = verify_decode;
        self
    }
}

impl Default for ImageLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PhotoLoader for ImageLoader {
    async fn read(&self, source: &PhotoSource) -> Result<Bytes> {
        match source {
            PhotoSource::Path(path) => tokio::fs::read(path)
                .await
                .map(Bytes::from)
                .map_err(|e| PhotomapError::FileRead {
                    path: path.clone(),
                    source: e,
                }),
            PhotoSource::Upload { data, .. } => Ok(data.clone()),
        }
    }

    async fn decode(&self, file_name: &str, data: Bytes) -> Result<DecodedPhoto> {
        let mime = detect_mime(file_name, &data);

        if is_metadata_only(file_name) {
            return Ok(DecodedPhoto {
                file_name: file_name.to_string(),
                data,
                mime,
                dimensions: None,
            });
        }

        if !self.verify_decode {
            image::guess_format(&data).map_err(|e| PhotomapError::Decode {
                file_name: file_name.to_string(),
                reason: e.to_string(),
            })?;

            return Ok(DecodedPhoto {
                file_name: file_name.to_string(),
                data,
                mime,
                dimensions: None,
            });
        }

        let payload = data.clone();
        let decoded = tokio::task::spawn_blocking(move || {
            image::load_from_memory(&payload).map(|img| (img.width(), img.height()))
        })
        .await
        .map_err(|e| PhotomapError::Decode {
            file_name: file_name.to_string(),
            reason: format!("decode task failed: {}", e),
        })?;

        let dimensions = decoded.map_err(|e| PhotomapError::Decode {
            file_name: file_name.to_string(),
            reason: e.to_string(),
        })?;

        Ok(DecodedPhoto {
            file_name: file_name.to_string(),
            data,
            mime,
            dimensions: Some(dimensions),
        })
    }
}
