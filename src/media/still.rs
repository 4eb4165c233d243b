use std::path::Path;

use image::{ImageError, RgbImage};

use super::MediaError;

/// Decode a still image into an RGB frame.
pub fn decode_still(path: &Path) -> Result<RgbImage, MediaError> {
    let decoded = image::open(path).map_err(|source| match source {
        ImageError::IoError(source) => MediaError::Open {
            path: path.to_path_buf(),
            source,
        },
        source => MediaError::Decode {
            path: path.to_path_buf(),
            source,
        },
    })?;
    Ok(decoded.to_rgb8())
}
