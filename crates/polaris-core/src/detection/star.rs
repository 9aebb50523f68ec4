use std::cmp::Ordering;

use super::blob::Blob;

/// A detected star: centroid position plus an effective radius derived
/// from the blob area assuming a circular disk.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Star {
    pub x: f64,
    pub y: f64,
    pub r: f64,
}

impl Star {
    pub fn from_blob(blob: &Blob) -> Self {
        Self {
            x: blob.x,
            y: blob.y,
            r: (blob.area / std::f64::consts::PI).sqrt(),
        }
    }

    /// Total order: radius ascending, ties broken by x.
    pub fn cmp_radius(&self, other: &Self) -> Ordering {
        self.r
            .total_cmp(&other.r)
            .then_with(|| self.x.total_cmp(&other.x))
    }
}

/// Convert blobs to stars, sorted by the star order.
pub fn stars_from_blobs(blobs: &[Blob]) -> Vec<Star> {
    let mut stars: Vec<Star> = blobs.iter().map(Star::from_blob).collect();
    stars.sort_unstable_by(Star::cmp_radius);
    stars
}
