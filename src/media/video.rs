use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Duration;

use image::codecs::gif::GifDecoder;
use image::{AnimationDecoder, DynamicImage, ImageError, RgbImage};

use super::MediaError;

/// Frame delay used when a GIF frame declares none.
const DEFAULT_FRAME_DELAY: Duration = Duration::from_millis(100);

/// A decoded clip that can hand out the frame shown at a given time.
///
/// Dropping the source releases every decoder resource it holds.
pub trait VideoSource {
    fn duration(&self) -> Duration;

    /// Seek to `at` and capture the frame rendered there. Times past the end
    /// return the final frame.
    fn frame_at(&mut self, at: Duration) -> Result<RgbImage, MediaError>;
}

/// Opens clips for sampling.
pub trait VideoOpener: Send + Sync {
    fn open(&self, path: &Path) -> Result<Box<dyn VideoSource>, MediaError>;
}

/// Decodes animated GIF clips; every other container is reported as unsupported.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnimatedGifOpener;

impl VideoOpener for AnimatedGifOpener {
    fn open(&self, path: &Path) -> Result<Box<dyn VideoSource>, MediaError> {
        let is_gif = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("gif"));
        if !is_gif {
            return Err(MediaError::UnsupportedVideo {
                path: path.to_path_buf(),
            });
        }
        Ok(Box::new(GifVideo::open(path)?))
    }
}

/// Fully decoded GIF timeline.
pub struct GifVideo {
    path: PathBuf,
    /// Start offset of each frame, ascending.
    starts: Vec<Duration>,
    frames: Vec<RgbImage>,
    duration: Duration,
}

impl GifVideo {
    pub fn open(path: &Path) -> Result<Self, MediaError> {
        let file = File::open(path).map_err(|source| MediaError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let decode_error = |source: ImageError| MediaError::Decode {
            path: path.to_path_buf(),
            source,
        };
        let decoder = GifDecoder::new(BufReader::new(file)).map_err(decode_error)?;
        let decoded = decoder
            .into_frames()
            .collect_frames()
            .map_err(decode_error)?;
        if decoded.is_empty() {
            return Err(MediaError::EmptyVideo {
                path: path.to_path_buf(),
            });
        }

        let mut starts = Vec::with_capacity(decoded.len());
        let mut frames = Vec::with_capacity(decoded.len());
        let mut elapsed = Duration::ZERO;
        for frame in decoded {
            let (numer, denom) = frame.delay().numer_denom_ms();
            let delay = if numer == 0 || denom == 0 {
                DEFAULT_FRAME_DELAY
            } else {
                Duration::from_nanos(u64::from(numer) * 1_000_000 / u64::from(denom))
            };
            starts.push(elapsed);
            frames.push(DynamicImage::ImageRgba8(frame.into_buffer()).to_rgb8());
            elapsed += delay;
        }
        tracing::debug!(
            "Decoded {} GIF frames ({} ms) from {}",
            frames.len(),
            elapsed.as_millis(),
            path.display()
        );
        Ok(Self {
            path: path.to_path_buf(),
            starts,
            frames,
            duration: elapsed,
        })
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    fn index_at(&self, at: Duration) -> usize {
        self.starts
            .partition_point(|start| *start <= at)
            .saturating_sub(1)
    }
}

impl VideoSource for GifVideo {
    fn duration(&self) -> Duration {
        self.duration
    }

    fn frame_at(&mut self, at: Duration) -> Result<RgbImage, MediaError> {
        self.frames
            .get(self.index_at(at))
            .cloned()
            .ok_or_else(|| MediaError::EmptyVideo {
                path: self.path.clone(),
            })
    }
}
