use serde::Deserialize;

/// Query string for photo uploads
#[derive(Debug, Default, Deserialize)]
pub struct UploadQuery {
    /// Include per-file drop details in the response
    #[serde(default)]
    pub report: bool,
}
