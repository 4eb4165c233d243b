//! Reduce an uploaded still or clip to one representative landmark set.
//!
//! Stills get a single detection pass. Clips are sampled at a few instants
//! (in increasing time order), every instant where a person is found
//! contributes, and the contributions are averaged index by index.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use crate::config::SamplingSettings;
use crate::media::{self, MediaError, MediaFile, MediaKind, VideoOpener};
use crate::pose::{DetectionError, DetectorProvider, LandmarkSet};

/// Hard failures while sampling. Finding nobody is `Ok(None)`, not an error.
#[derive(Debug, Error)]
pub enum SamplerError {
    #[error("Pose detection unavailable: {0}")]
    DetectionUnavailable(#[source] DetectionError),
    #[error(transparent)]
    MediaDecode(#[from] MediaError),
    #[error("Sample time {seconds}s cannot be represented")]
    InvalidSampleTime { seconds: f64 },
    /// The detector or decoder panicked mid-run.
    #[error("Analysis crashed: {0}")]
    Crashed(String),
}

pub struct LandmarkSampler {
    detectors: Arc<DetectorProvider>,
    videos: Arc<dyn VideoOpener>,
    settings: SamplingSettings,
}

impl LandmarkSampler {
    pub fn new(
        detectors: Arc<DetectorProvider>,
        videos: Arc<dyn VideoOpener>,
        settings: SamplingSettings,
    ) -> Self {
        Self {
            detectors,
            videos,
            settings: settings.normalized(),
        }
    }

    pub fn sample(&self, media: &MediaFile) -> Result<Option<LandmarkSet>, SamplerError> {
        match media.kind {
            MediaKind::Image => self.sample_image(&media.path),
            MediaKind::Video => self.sample_video(&media.path),
        }
    }

    pub fn sample_image(&self, path: &Path) -> Result<Option<LandmarkSet>, SamplerError> {
        let detector = self
            .detectors
            .get()
            .map_err(SamplerError::DetectionUnavailable)?;
        let frame = media::decode_still(path)?;
        detector
            .detect(&frame)
            .map_err(SamplerError::DetectionUnavailable)
    }

    pub fn sample_video(&self, path: &Path) -> Result<Option<LandmarkSet>, SamplerError> {
        let detector = self
            .detectors
            .get()
            .map_err(SamplerError::DetectionUnavailable)?;
        let mut video = self.videos.open(path)?;
        let instants = sample_instants(video.duration(), &self.settings)?;
        let mut found = Vec::with_capacity(instants.len());
        for at in instants {
            let frame = video.frame_at(at)?;
            match detector
                .detect(&frame)
                .map_err(SamplerError::DetectionUnavailable)?
            {
                Some(landmarks) => found.push(landmarks),
                None => tracing::debug!(
                    "No person at {} ms in {}",
                    at.as_millis(),
                    path.display()
                ),
            }
        }
        tracing::debug!(
            "Sampled {} with {} successful instant(s)",
            path.display(),
            found.len()
        );
        Ok(LandmarkSet::mean(&found))
    }
}

/// Instants to sample for a clip of `duration`, ascending.
///
/// Each instant is a fraction of the duration, floored at the minimum offset
/// so the very first (often blank) frame is skipped, and never past the end.
pub fn sample_instants(
    duration: Duration,
    settings: &SamplingSettings,
) -> Result<Vec<Duration>, SamplerError> {
    let min_offset = settings.min_offset_seconds.max(0.0);
    let total = duration.as_secs_f64();
    let mut instants = settings
        .sample_fractions
        .iter()
        .filter(|fraction| fraction.is_finite())
        .map(|fraction| {
            let seconds = (total * fraction.clamp(0.0, 1.0)).max(min_offset).min(total);
            Duration::try_from_secs_f64(seconds)
                .map(|at| at.min(duration))
                .map_err(|_| SamplerError::InvalidSampleTime { seconds })
        })
        .collect::<Result<Vec<_>, _>>()?;
    instants.sort();
    Ok(instants)
}
