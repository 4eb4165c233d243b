use std::sync::{Arc, Mutex};

use image::RgbImage;
use thiserror::Error;

use super::LandmarkSet;

/// Failures raised by the pose detection capability itself.
#[derive(Debug, Clone, Error)]
pub enum DetectionError {
    /// Model download, load or warm-up failed.
    #[error("pose detector failed to initialize: {0}")]
    Init(String),
    /// Inference crashed on a frame.
    #[error("pose inference failed: {0}")]
    Inference(String),
}

/// Locates body landmarks in a single RGB frame.
///
/// `Ok(None)` means the frame was processed and nobody was found.
pub trait PoseDetector: Send + Sync {
    fn detect(&self, frame: &RgbImage) -> Result<Option<LandmarkSet>, DetectionError>;
}

type DetectorFactory = dyn Fn() -> Result<Arc<dyn PoseDetector>, DetectionError> + Send + Sync;

/// Lazily builds one detector and hands the same instance to every caller.
///
/// A failed build is not remembered, so the next caller tries again; a
/// successful build is kept until the provider is dropped.
pub struct DetectorProvider {
    factory: Box<DetectorFactory>,
    slot: Mutex<Option<Arc<dyn PoseDetector>>>,
}

impl DetectorProvider {
    pub fn new<F>(factory: F) -> Self
    where
        F: Fn() -> Result<Arc<dyn PoseDetector>, DetectionError> + Send + Sync + 'static,
    {
        Self {
            factory: Box::new(factory),
            slot: Mutex::new(None),
        }
    }

    /// Wrap an already constructed detector.
    pub fn ready(detector: Arc<dyn PoseDetector>) -> Self {
        Self {
            factory: Box::new(|| Err(DetectionError::Init("detector factory unused".into()))),
            slot: Mutex::new(Some(detector)),
        }
    }

    /// Return the shared detector, building it on first use.
    pub fn get(&self) -> Result<Arc<dyn PoseDetector>, DetectionError> {
        // A factory that panicked leaves the slot empty, which is still valid.
        let mut slot = self
            .slot
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(detector) = slot.as_ref() {
            return Ok(Arc::clone(detector));
        }
        tracing::info!("Initializing pose detector");
        let detector = (self.factory)().inspect_err(|err| {
            tracing::warn!("Pose detector initialization failed: {err}");
        })?;
        *slot = Some(Arc::clone(&detector));
        Ok(detector)
    }

    pub fn is_initialized(&self) -> bool {
        self.slot.lock().map(|slot| slot.is_some()).unwrap_or(false)
    }
}
