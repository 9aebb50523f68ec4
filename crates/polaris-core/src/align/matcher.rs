use tracing::debug;

use super::kdtree::KdTree;
use super::line::Line;
use super::score::score_transform;
use super::transform::{control_point, AffineTransform};
use crate::detection::star::Star;

/// Tunables for the line-pair matcher.
#[derive(Clone, Copy, Debug)]
pub struct MatchConfig {
    /// Shortest source line still worth probing.
    pub min_line_length: f64,
    /// Fractional length tolerance when pairing lines.
    pub relative_length_tolerance: f64,
    /// Maximum pixel distance at which a star counts as matched.
    pub star_dist_cutoff: f64,
    /// Minimum percentage of source stars that must be matched.
    pub percent_stars_required: u32,
}

/// Search for the affine transform mapping `src_stars` onto the reference
/// star field.
///
/// Source lines are walked longest-first; for each one, the ascending
/// reference line list is bisected to the window of lines whose length
/// agrees within the relative tolerance. Each pairing determines an
/// affine (in both endpoint orders), which is scored by nearest-neighbor
/// agreement. The best strictly-positive score wins; `None` means no
/// candidate scored above zero.
pub fn find_transform(
    src_stars: &[Star],
    src_lines: &[Line],
    ref_lines: &[Line],
    reference: &KdTree,
    config: &MatchConfig,
) -> Option<AffineTransform> {
    let mut best_score = 0.0;
    let mut best: Option<AffineTransform> = None;

    for xline in src_lines {
        // Descending order: everything past this point is shorter still.
        if xline.length < config.min_line_length {
            break;
        }

        let window = xline.length * config.relative_length_tolerance;
        let start = ref_lines.partition_point(|l| l.length < xline.length - window);
        let end = ref_lines.partition_point(|l| l.length <= xline.length + window);

        for yline in &ref_lines[start..end] {
            for candidate in [
                affine_between(xline, yline),
                affine_between(xline, &yline.swapped()),
            ] {
                let Some(t) = candidate else { continue };
                let score = score_transform(
                    &t,
                    src_stars,
                    reference,
                    config.star_dist_cutoff,
                    config.percent_stars_required,
                );
                if score > best_score {
                    best_score = score;
                    best = Some(t);
                }
            }
        }
    }

    debug!(best_score, found = best.is_some(), "line-pair search done");
    best
}

/// The affine carrying line `a` onto line `b`: endpoint to endpoint, plus
/// a synthesized control point on each side to fix the remaining degree
/// of freedom.
fn affine_between(a: &Line, b: &Line) -> Option<AffineTransform> {
    let sa = (a.a.x, a.a.y);
    let sb = (a.b.x, a.b.y);
    let da = (b.a.x, b.a.y);
    let db = (b.b.x, b.b.y);
    AffineTransform::from_point_pairs(
        [sa, sb, control_point(sa, sb)],
        [da, db, control_point(da, db)],
    )
}
