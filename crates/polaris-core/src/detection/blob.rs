use ndarray::Array2;

/// A maximal 4-connected set of foreground pixels, summarized by its
/// area-weighted centroid and pixel count.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Blob {
    /// Centroid column, in [0, width).
    pub x: f64,
    /// Centroid row, in [0, height).
    pub y: f64,
    /// Foreground pixel count. Always positive.
    pub area: f64,
}

/// Merge two blobs into one, weighting each centroid by its area.
/// Associative and commutative.
pub fn combine(a: Blob, b: Blob) -> Blob {
    debug_assert!(a.area > 0.0 && b.area > 0.0);
    let area = a.area + b.area;
    Blob {
        x: (a.area * a.x + b.area * b.x) / area,
        y: (a.area * a.y + b.area * b.y) / area,
        area,
    }
}

/// A contiguous foreground run on the previous scanline, carrying the
/// partial blob accumulated for its component so far.
struct ScanRun {
    left: usize,
    right: usize,
    blob: Blob,
}

/// Find all 4-connected foreground components in a binary mask.
///
/// Streams one row at a time: runs on the current row are matched against
/// the previous row's runs by horizontal overlap, merging their partial
/// centroids; a previous-row run with no descendant is emitted as a
/// finished blob.
///
/// If the emitted blob count exceeds `limit` the scan aborts and the
/// incomplete result is returned (at most `limit + 1` blobs). Callers use
/// this as a cheap "threshold is far too low" signal, not as an error.
pub fn find_blobs(mask: &Array2<bool>, limit: usize) -> Vec<Blob> {
    let (h, w) = mask.dim();

    let mut blobs = Vec::new();
    // Runs inherited from the previous row and runs being built on the
    // current row. Swapped and cleared each row; never reallocated.
    let mut prev: Vec<ScanRun> = Vec::new();
    let mut next: Vec<ScanRun> = Vec::new();

    for row in 0..h {
        let mut it = 0;
        let mut col = 0;

        while col < w {
            if !mask[[row, col]] {
                col += 1;
                continue;
            }

            // Extent of the foreground run starting at `col`.
            let l = col;
            while col < w && mask[[row, col]] {
                col += 1;
            }
            let r = col - 1;

            // Previous-row runs ending left of this run have no descendant
            // on this row: their components are complete.
            while it < prev.len() && prev[it].right < l {
                blobs.push(prev[it].blob);
                if blobs.len() > limit {
                    return blobs;
                }
                it += 1;
            }

            let mut cur = Blob {
                x: (l + r) as f64 / 2.0,
                y: row as f64,
                area: (r - l + 1) as f64,
            };

            // Fold in every previous-row run this run overlaps. A shared
            // column means the two runs are 4-connected across the rows.
            while it < prev.len() && prev[it].left <= r {
                cur = combine(cur, prev[it].blob);
                it += 1;
            }

            next.push(ScanRun {
                left: l,
                right: r,
                blob: cur,
            });
        }

        // Whatever the cursor never reached had no descendant either.
        while it < prev.len() {
            blobs.push(prev[it].blob);
            if blobs.len() > limit {
                return blobs;
            }
            it += 1;
        }

        std::mem::swap(&mut prev, &mut next);
        next.clear();
    }

    // End of image: all live runs are complete components.
    for run in prev {
        blobs.push(run.blob);
        if blobs.len() > limit {
            return blobs;
        }
    }

    blobs
}
