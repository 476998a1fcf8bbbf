use image::{DynamicImage, RgbImage};
use std::path::Path;
use tracing::debug;

use crate::error::{MatcherError, Result};

/// Decode encoded image bytes (PNG, JPEG, ...) into an RGB pixel buffer.
///
/// Any alpha channel is dropped; the only validation is that the bytes decode.
pub fn decode_image(bytes: &[u8]) -> Result<RgbImage> {
    let img = image::load_from_memory(bytes)?;
    debug!("Decoded {}x{} image from {} bytes", img.width(), img.height(), bytes.len());
    Ok(to_rgb_buffer(&img))
}

/// Open and decode an image file into an RGB pixel buffer
pub fn load_image(path: &Path) -> Result<RgbImage> {
    let img = image::open(path).map_err(|source| MatcherError::ImageLoad {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("Loaded {}x{} image from {:?}", img.width(), img.height(), path);
    Ok(to_rgb_buffer(&img))
}

/// Convert an already decoded image, stripping alpha
pub fn to_rgb_buffer(img: &DynamicImage) -> RgbImage {
    img.to_rgb8()
}
