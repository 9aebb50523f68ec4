#![allow(dead_code)]

use std::path::Path;

use image::{GrayImage, ImageFormat, Luma};

/// Render a synthetic star field: `size x size` black sky with a filled
/// bright square of side `star_size` at each given top-left position.
pub fn star_field(size: u32, positions: &[(u32, u32)], star_size: u32) -> GrayImage {
    let mut img = GrayImage::new(size, size);
    for &(x, y) in positions {
        for dy in 0..star_size {
            for dx in 0..star_size {
                if x + dx < size && y + dy < size {
                    img.put_pixel(x + dx, y + dy, Luma([255u8]));
                }
            }
        }
    }
    img
}

/// The same field with every star shifted by `(dx, dy)` pixels.
pub fn shifted(positions: &[(u32, u32)], dx: i32, dy: i32) -> Vec<(u32, u32)> {
    positions
        .iter()
        .map(|&(x, y)| ((x as i32 + dx) as u32, (y as i32 + dy) as u32))
        .collect()
}

/// Write a grayscale image as PNG into `dir`, returning its path.
pub fn write_png(dir: &Path, name: &str, img: &GrayImage) -> std::path::PathBuf {
    let path = dir.join(name);
    img.save_with_format(&path, ImageFormat::Png)
        .expect("write test PNG");
    path
}

/// Spread-out star positions used by the alignment tests. Irregular on
/// purpose: no two pairwise distances agree within the matcher's default
/// tolerance.
pub const FIELD_POSITIONS: [(u32, u32); 8] = [
    (30, 40),
    (150, 30),
    (60, 120),
    (160, 160),
    (100, 80),
    (40, 170),
    (170, 101),
    (90, 20),
];
