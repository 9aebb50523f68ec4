/// Subsample factor applied when loading frames.
pub const DEFAULT_SUBSAMPLE: f64 = 0.5;

/// Shortest star-pair line admitted into matching, in subsampled pixels.
pub const DEFAULT_MIN_LINE_LENGTH: f64 = 100.0;

/// Minimum percentage of source stars that must land near a reference star.
pub const DEFAULT_PERCENT_STARS_REQUIRED: u32 = 66;

/// Fractional length tolerance when pairing source and reference lines.
pub const DEFAULT_LENGTH_TOLERANCE: f64 = 0.01;

/// Maximum pixel distance at which a transformed star counts as matched.
pub const DEFAULT_STAR_DIST_CUTOFF: f64 = 10.0;

/// Target star population per frame for the adaptive thresholder.
pub const DEFAULT_STAR_COUNT: usize = 20;

/// Threshold seed meaning "no previous estimate, autodetect from scratch".
pub const THRESHOLD_AUTO: i32 = -1;

/// Gain of the logarithmic contrast stretch: v -> round(gain * log2(v)).
pub const LOG_STRETCH_GAIN: f64 = 31.0;
