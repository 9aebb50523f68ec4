use thiserror::Error;

#[derive(Error, Debug)]
pub enum PolarisError {
    #[error("Image format error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("No point in aligning fewer than two images (got {got})")]
    TooFewImages { got: usize },

    #[error("Transform is singular and cannot be inverted")]
    DegenerateTransform,
}

pub type Result<T> = std::result::Result<T, PolarisError>;
