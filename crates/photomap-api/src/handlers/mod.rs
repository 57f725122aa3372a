mod health;
mod map;
mod photos;

pub use health::health_check;
pub use map::map_page;
pub use photos::{list_photos, photo_image, photos_geojson, upload_photos};
