use std::fs::File;
use std::path::{Path, PathBuf};

use image::codecs::gif::GifEncoder;
use image::{Delay, Frame, Rgb, RgbImage, Rgba, RgbaImage};

pub fn write_png(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    RgbImage::from_pixel(24, 24, Rgb([90, 120, 150]))
        .save(&path)
        .expect("write png");
    path
}

/// Animated GIF with one solid frame per shade.
pub fn write_gif(dir: &Path, name: &str, shades: &[u8], delay_ms: u32) -> PathBuf {
    let path = dir.join(name);
    let file = File::create(&path).expect("create gif");
    let mut encoder = GifEncoder::new(file);
    let frames = shades.iter().map(|shade| {
        Frame::from_parts(
            RgbaImage::from_pixel(8, 8, Rgba([*shade, *shade, *shade, 255])),
            0,
            0,
            Delay::from_numer_denom_ms(delay_ms, 1),
        )
    });
    encoder.encode_frames(frames).expect("encode gif");
    path
}
