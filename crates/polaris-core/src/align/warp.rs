use ndarray::Array2;

use super::transform::AffineTransform;
use crate::error::{PolarisError, Result};
use crate::frame::Frame;

/// Warp a frame by an affine transform into an output of the given shape.
///
/// `t` maps source coordinates into the output (reference) frame, so each
/// output pixel is inverse-mapped and sampled bilinearly from the source.
/// Pixels falling outside the source read as 0.
pub fn warp_affine(frame: &Frame, t: &AffineTransform, out_shape: (usize, usize)) -> Result<Frame> {
    let inv = t.inverse().ok_or(PolarisError::DegenerateTransform)?;

    let (h, w) = out_shape;
    let mut result = Array2::<f32>::zeros((h, w));

    for row in 0..h {
        for col in 0..w {
            let (src_x, src_y) = inv.apply(col as f64, row as f64);
            result[[row, col]] = bilinear_sample(&frame.data, src_y, src_x);
        }
    }

    Ok(Frame::new(result))
}

/// Sample `data` at a fractional position by blending the 2x2 pixel
/// neighborhood under it. Neighbors outside the buffer contribute zero,
/// so samples fade out at the edges instead of clamping.
pub fn bilinear_sample(data: &Array2<f32>, y: f64, x: f64) -> f32 {
    let base_row = y.floor();
    let base_col = x.floor();
    let wy = (y - base_row) as f32;
    let wx = (x - base_col) as f32;

    let corners = [
        (0, 0, (1.0 - wy) * (1.0 - wx)),
        (0, 1, (1.0 - wy) * wx),
        (1, 0, wy * (1.0 - wx)),
        (1, 1, wy * wx),
    ];

    let mut acc = 0.0;
    for (dr, dc, weight) in corners {
        let row = base_row as i64 + dr;
        let col = base_col as i64 + dc;
        if row < 0 || col < 0 {
            continue;
        }
        if let Some(&v) = data.get([row as usize, col as usize]) {
            acc += weight * v;
        }
    }
    acc
}
