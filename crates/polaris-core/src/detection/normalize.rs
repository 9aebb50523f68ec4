use ndarray::Array2;

use crate::consts::LOG_STRETCH_GAIN;

/// Logarithmic contrast stretch used only for star detection:
/// `v -> round(31 * log2(v))` clamped to [0, 255], with 0 -> 0.
///
/// Bright star cores are compressed relative to their halos so the blob
/// detector sees compact, well-centered spots. The float copy used for
/// stacking is never run through this.
pub fn log_stretch(pixels: &Array2<u8>) -> Array2<u8> {
    let lut = log_lut();
    pixels.mapv(|v| lut[v as usize])
}

fn log_lut() -> [u8; 256] {
    let mut lut = [0u8; 256];
    for (v, out) in lut.iter_mut().enumerate().skip(1) {
        let stretched = (LOG_STRETCH_GAIN * (v as f64).log2()).round();
        *out = stretched.clamp(0.0, 255.0) as u8;
    }
    lut
}
