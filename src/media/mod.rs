//! Uploaded media: classification, still decoding and timed video frames.

mod still;
mod video;

pub use still::decode_still;
pub use video::{AnimatedGifOpener, GifVideo, VideoOpener, VideoSource};

use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Still-image extensions (lowercase, without dots).
pub const IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "webp", "bmp"];
/// Clip extensions (lowercase, without dots).
pub const VIDEO_EXTENSIONS: [&str; 5] = ["gif", "mp4", "mov", "m4v", "webm"];

/// Whether an upload is analyzed as a single frame or as a sampled clip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    /// Classify by file extension, case-insensitively.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension().and_then(|ext| ext.to_str())?;
        let matches = |list: &[&str]| list.iter().any(|known| ext.eq_ignore_ascii_case(known));
        if matches(&IMAGE_EXTENSIONS) {
            Some(Self::Image)
        } else if matches(&VIDEO_EXTENSIONS) {
            Some(Self::Video)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
        }
    }

    /// Capitalized form for display.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Image => "Image",
            Self::Video => "Video",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user-supplied file together with how it will be analyzed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaFile {
    pub path: PathBuf,
    pub kind: MediaKind,
}

impl MediaFile {
    /// Classify `path`, failing for extensions that are neither stills nor clips.
    pub fn from_path(path: impl Into<PathBuf>) -> Result<Self, MediaError> {
        let path = path.into();
        match MediaKind::from_path(&path) {
            Some(kind) => Ok(Self { path, kind }),
            None => Err(MediaError::Unsupported { path }),
        }
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// Media could not be read or decoded.
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("Unsupported media type: {path}")]
    Unsupported { path: PathBuf },
    #[error("Failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },
    #[error("Video has no frames: {path}")]
    EmptyVideo { path: PathBuf },
    #[error("No decoder available for video {path}")]
    UnsupportedVideo { path: PathBuf },
}
