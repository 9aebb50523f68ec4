pub mod config;

pub use config::StackConfig;

use std::path::PathBuf;

use tracing::{info, warn};

use crate::align::{find_transform, line, warp_affine, KdTree};
use crate::detection::normalize::log_stretch;
use crate::detection::threshold::detect_stars;
use crate::error::{PolarisError, Result};
use crate::frame::Frame;
use crate::io::image_io::{frame_from_pixels, load_grayscale, save_image};
use crate::stack::RunningMean;

/// What a stack run did, for the caller's summary line.
#[derive(Clone, Debug)]
pub struct StackSummary {
    /// Frames folded into the mean, reference included.
    pub stacked: usize,
    /// Frames that failed to align and were left out.
    pub dropped: usize,
    /// Stars detected on the reference frame.
    pub reference_stars: usize,
    /// Threshold in effect after the last frame.
    pub final_threshold: i32,
}

/// Align every input onto the middle frame and average.
///
/// The middle input is the reference: it seeds the accumulator and its
/// stars, nearest-neighbor index and line list are prepared once. Every
/// other frame is loaded, star-detected (reusing the previous frame's
/// threshold as the next search seed), matched, warped into reference
/// dimensions and folded into the running mean, in input order.
///
/// A frame that cannot be aligned is logged and skipped; only usage and
/// load errors abort the run. `progress` is called with the number of
/// non-reference frames finished so far.
pub fn run_stack<F>(
    paths: &[PathBuf],
    config: &StackConfig,
    mut progress: F,
) -> Result<(Frame, StackSummary)>
where
    F: FnMut(usize),
{
    if paths.len() < 2 {
        return Err(PolarisError::TooFewImages { got: paths.len() });
    }
    let ref_idx = paths.len() / 2;

    // Reference preparation: float copy seeds the accumulator, the
    // log-stretched copy exists only for detection.
    let ref_pixels = load_grayscale(&paths[ref_idx], config.subsample)?;
    let reference = frame_from_pixels(&ref_pixels);
    let ref_shape = reference.data.dim();

    let detected = detect_stars(
        &log_stretch(&ref_pixels),
        config.threshold,
        config.star_count,
    );
    let mut threshold = detected.threshold;
    let ref_stars = detected.stars;
    info!(
        path = %paths[ref_idx].display(),
        stars = ref_stars.len(),
        threshold,
        "reference frame prepared"
    );

    let ref_points: Vec<(f64, f64)> = ref_stars.iter().map(|s| (s.x, s.y)).collect();
    let ref_tree = KdTree::build(&ref_points);
    if ref_tree.is_none() {
        warn!("no stars detected on the reference; every frame will be dropped");
    }

    let mut ref_lines = line::lines_between(&ref_stars);
    line::sort_ascending(&mut ref_lines);

    let mut mean = RunningMean::seed(&reference);
    let mut dropped = 0usize;
    let mut done = 0usize;

    for (i, path) in paths.iter().enumerate() {
        if i == ref_idx {
            continue;
        }

        let pixels = load_grayscale(path, config.subsample)?;
        let det = detect_stars(&log_stretch(&pixels), threshold, config.star_count);
        threshold = det.threshold;

        let mut src_lines = line::lines_between(&det.stars);
        line::sort_descending(&mut src_lines);

        let transform = ref_tree.as_ref().and_then(|tree| {
            find_transform(
                &det.stars,
                &src_lines,
                &ref_lines,
                tree,
                &config.match_config(),
            )
        });

        match transform {
            Some(t) => match warp_affine(&frame_from_pixels(&pixels), &t, ref_shape) {
                Ok(warped) => {
                    mean.add(&warped);
                    info!(
                        path = %path.display(),
                        stars = det.stars.len(),
                        threshold,
                        "frame aligned and stacked"
                    );
                }
                Err(e) => {
                    dropped += 1;
                    warn!(path = %path.display(), error = %e, "warp failed; frame dropped");
                }
            },
            None => {
                dropped += 1;
                warn!(
                    path = %path.display(),
                    stars = det.stars.len(),
                    "no alignment found; frame dropped"
                );
            }
        }

        done += 1;
        progress(done);
    }

    let stacked = mean.count();
    let result = mean.into_frame();

    if let Some(out) = &config.outfile {
        save_image(&result, out)?;
        info!(output = %out.display(), "stacked image written");
    }

    Ok((
        result,
        StackSummary {
            stacked,
            dropped,
            reference_stars: ref_stars.len(),
            final_threshold: threshold,
        },
    ))
}
