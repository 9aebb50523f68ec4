use ndarray::Array2;
use tracing::debug;

use super::blob::find_blobs;
use super::star::{stars_from_blobs, Star};
use crate::consts::THRESHOLD_AUTO;

/// Binarize 8-bit pixels: foreground where `pixel >= t`.
pub fn binarize(pixels: &Array2<u8>, t: u8) -> Array2<bool> {
    pixels.mapv(|v| v >= t)
}

/// Outcome of the adaptive threshold search.
#[derive(Clone, Debug)]
pub struct DetectedStars {
    /// The last threshold tried. Callers thread this into the next frame's
    /// search as the seed; it is not written back anywhere.
    pub threshold: i32,
    /// Stars detected at that threshold, in radius order.
    pub stars: Vec<Star>,
}

/// Binary-search the gray threshold so that the detected star count lands
/// within ±20% of `star_count`.
///
/// The count is monotone in the threshold wherever real stars dominate
/// noise, so bisection converges in at most 8 probes. Each probe runs the
/// blob finder with a `2 * star_count` ceiling: a threshold low enough to
/// flood the image is abandoned after a bounded amount of work and simply
/// reads as "too many stars".
///
/// A `seed` of [`THRESHOLD_AUTO`] starts at mid-range; otherwise the
/// search brackets the previous frame's threshold. Non-convergence is not
/// an error: the last threshold tried wins.
pub fn detect_stars(pixels: &Array2<u8>, seed: i32, star_count: usize) -> DetectedStars {
    let (mut lo, mut hi) = if seed <= THRESHOLD_AUTO {
        (0, 256)
    } else if seed < 128 {
        (0, 2 * seed)
    } else {
        (2 * seed - 256, 255)
    };

    let target = star_count as i64;
    let limit = 2 * star_count;

    let mut threshold;
    let mut blobs;

    loop {
        let t = (lo + hi) / 2;
        let mask = binarize(pixels, t as u8);
        let found = find_blobs(&mask, limit);
        let count = found.len() as i64;

        threshold = t;
        blobs = found;
        debug!(threshold = t, count, target, "threshold probe");

        if (count - target).abs() < target / 5 {
            break;
        }
        if count < target {
            hi = t;
        } else {
            lo = t;
        }
        if lo + 1 >= hi {
            break;
        }
    }

    DetectedStars {
        threshold,
        stars: stars_from_blobs(&blobs),
    }
}
