use std::path::PathBuf;

use crate::align::MatchConfig;
use crate::consts::{
    DEFAULT_LENGTH_TOLERANCE, DEFAULT_MIN_LINE_LENGTH, DEFAULT_PERCENT_STARS_REQUIRED,
    DEFAULT_STAR_COUNT, DEFAULT_STAR_DIST_CUTOFF, DEFAULT_SUBSAMPLE, THRESHOLD_AUTO,
};

/// Configuration for a full stack run.
#[derive(Clone, Debug)]
pub struct StackConfig {
    /// Initial gray threshold seed; [`THRESHOLD_AUTO`] autodetects.
    pub threshold: i32,
    /// Scale factor in (0, 1] applied when loading each frame.
    pub subsample: f64,
    /// Shortest source line admitted into matching.
    pub min_line_length: f64,
    /// Fractional length tolerance for pairing lines.
    pub relative_length_tolerance: f64,
    /// Minimum percentage (0-100) of source stars that must land near a
    /// reference star for a transform to be accepted.
    pub percent_stars_required: u32,
    /// Maximum pixel distance at which a star counts as matched.
    pub star_dist_cutoff: f64,
    /// Target star population per frame.
    pub star_count: usize,
    /// Where to write the stacked image; `None` leaves writing to the
    /// caller.
    pub outfile: Option<PathBuf>,
}

impl Default for StackConfig {
    fn default() -> Self {
        Self {
            threshold: THRESHOLD_AUTO,
            subsample: DEFAULT_SUBSAMPLE,
            min_line_length: DEFAULT_MIN_LINE_LENGTH,
            relative_length_tolerance: DEFAULT_LENGTH_TOLERANCE,
            percent_stars_required: DEFAULT_PERCENT_STARS_REQUIRED,
            star_dist_cutoff: DEFAULT_STAR_DIST_CUTOFF,
            star_count: DEFAULT_STAR_COUNT,
            outfile: None,
        }
    }
}

impl StackConfig {
    pub(crate) fn match_config(&self) -> MatchConfig {
        MatchConfig {
            min_line_length: self.min_line_length,
            relative_length_tolerance: self.relative_length_tolerance,
            star_dist_cutoff: self.star_dist_cutoff,
            percent_stars_required: self.percent_stars_required,
        }
    }
}
