use std::path::Path;

use image::imageops::FilterType;
use image::{GrayImage, ImageBuffer, ImageFormat, Luma};
use ndarray::Array2;

use crate::error::{PolarisError, Result};
use crate::frame::Frame;

/// Load a grayscale image file as 8-bit pixels, downscaled by `subsample`.
///
/// Any raster format the `image` crate can decode is accepted; color input
/// is collapsed to luma before resizing. A `subsample` of 1.0 skips the
/// resize entirely.
pub fn load_grayscale(path: &Path, subsample: f64) -> Result<Array2<u8>> {
    let img = image::open(path)?;
    let mut gray = img.to_luma8();

    let (w, h) = gray.dimensions();
    if w == 0 || h == 0 {
        return Err(PolarisError::InvalidDimensions {
            width: w,
            height: h,
        });
    }

    if subsample < 1.0 {
        let nw = ((w as f64 * subsample).round() as u32).max(1);
        let nh = ((h as f64 * subsample).round() as u32).max(1);
        gray = image::imageops::resize(&gray, nw, nh, FilterType::Triangle);
    }

    let (w, h) = gray.dimensions();
    let mut data = Array2::<u8>::zeros((h as usize, w as usize));
    for row in 0..h as usize {
        for col in 0..w as usize {
            data[[row, col]] = gray.get_pixel(col as u32, row as u32).0[0];
        }
    }

    Ok(data)
}

/// Convert 8-bit pixels to a float frame in [0, 1].
pub fn frame_from_pixels(pixels: &Array2<u8>) -> Frame {
    Frame::new(pixels.mapv(|v| v as f32 / 255.0))
}

/// Quantize a unit-range sample to an integer gray level.
fn quantize(v: f32, full_scale: f32) -> f32 {
    v.clamp(0.0, 1.0) * full_scale
}

/// Write a frame as 16-bit grayscale TIFF, the full-precision output.
pub fn save_tiff(frame: &Frame, path: &Path) -> Result<()> {
    let img = ImageBuffer::<Luma<u16>, Vec<u16>>::from_fn(
        frame.width() as u32,
        frame.height() as u32,
        |x, y| Luma([quantize(frame.data[[y as usize, x as usize]], 65535.0) as u16]),
    );
    img.save(path)?;
    Ok(())
}

/// Write a frame as 8-bit grayscale PNG.
pub fn save_png(frame: &Frame, path: &Path) -> Result<()> {
    let img = GrayImage::from_fn(frame.width() as u32, frame.height() as u32, |x, y| {
        Luma([quantize(frame.data[[y as usize, x as usize]], 255.0) as u8])
    });
    img.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}

/// Save a frame, choosing format from the file extension.
pub fn save_image(frame: &Frame, path: &Path) -> Result<()> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("tiff" | "tif") => save_tiff(frame, path),
        _ => save_png(frame, path),
    }
}
