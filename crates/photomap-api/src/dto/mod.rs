mod request;
mod response;

pub use request::UploadQuery;
pub use response::{HealthResponse, PhotoResponse, UploadResponse};
