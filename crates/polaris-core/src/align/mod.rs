pub mod kdtree;
pub mod line;
pub mod matcher;
pub mod score;
pub mod transform;
pub mod warp;

pub use kdtree::KdTree;
pub use line::{lines_between, Line};
pub use matcher::{find_transform, MatchConfig};
pub use transform::AffineTransform;
pub use warp::{bilinear_sample, warp_affine};
