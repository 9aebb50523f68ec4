pub mod blob;
pub mod normalize;
pub mod star;
pub mod threshold;

pub use blob::{combine, find_blobs, Blob};
pub use star::{stars_from_blobs, Star};
pub use threshold::{binarize, detect_stars, DetectedStars};
