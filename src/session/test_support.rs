use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use image::{Rgb, RgbImage};

use crate::config::AppSettings;
use crate::media::{AnimatedGifOpener, MediaFile};
use crate::pose::{
    DetectionError, DetectorProvider, Landmark, LandmarkIndex, LandmarkSet, PoseDetector,
};

use super::{PreviewHandle, PreviewRegistry, PreviewStore, Screen, SessionController};

pub(super) const WAIT: Duration = Duration::from_secs(5);

#[derive(Debug, Default)]
pub(super) struct PreviewLog {
    pub created: Vec<PreviewHandle>,
    pub released: Vec<PreviewHandle>,
}

impl PreviewLog {
    pub fn release_count(&self, handle: PreviewHandle) -> usize {
        self.released.iter().filter(|h| **h == handle).count()
    }
}

/// Registry that records every create/release.
pub(super) struct RecordingPreviews {
    inner: PreviewRegistry,
    log: Rc<RefCell<PreviewLog>>,
}

impl RecordingPreviews {
    pub fn new() -> (Self, Rc<RefCell<PreviewLog>>) {
        let log = Rc::new(RefCell::new(PreviewLog::default()));
        (
            Self {
                inner: PreviewRegistry::new(),
                log: Rc::clone(&log),
            },
            log,
        )
    }
}

impl PreviewStore for RecordingPreviews {
    fn create(&mut self, media: &MediaFile) -> PreviewHandle {
        let handle = self.inner.create(media);
        self.log.borrow_mut().created.push(handle);
        handle
    }

    fn release(&mut self, handle: PreviewHandle) {
        self.log.borrow_mut().released.push(handle);
        self.inner.release(handle);
    }

    fn resolve(&self, handle: PreviewHandle) -> Option<&Path> {
        self.inner.resolve(handle)
    }
}

/// Detector answering every frame with the same result.
pub(super) struct FixedDetector {
    landmarks: Option<LandmarkSet>,
    pub calls: AtomicUsize,
}

impl FixedDetector {
    pub fn finds(landmarks: LandmarkSet) -> Arc<Self> {
        Arc::new(Self {
            landmarks: Some(landmarks),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn finds_nobody() -> Arc<Self> {
        Arc::new(Self {
            landmarks: None,
            calls: AtomicUsize::new(0),
        })
    }
}

impl PoseDetector for FixedDetector {
    fn detect(&self, _frame: &RgbImage) -> Result<Option<LandmarkSet>, DetectionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.landmarks.clone())
    }
}

/// Detector that blocks each call until the test opens the gate.
pub(super) struct GatedDetector {
    gate: Mutex<Receiver<()>>,
    pub calls: AtomicUsize,
}

impl GatedDetector {
    pub fn new() -> (Arc<Self>, Sender<()>) {
        let (tx, rx) = mpsc::channel();
        (
            Arc::new(Self {
                gate: Mutex::new(rx),
                calls: AtomicUsize::new(0),
            }),
            tx,
        )
    }
}

impl PoseDetector for GatedDetector {
    fn detect(&self, _frame: &RgbImage) -> Result<Option<LandmarkSet>, DetectionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let gate = self.gate.lock().unwrap();
        gate.recv_timeout(WAIT)
            .map_err(|_| DetectionError::Inference("gate closed".into()))?;
        Ok(Some(standing_pose()))
    }
}

/// Upright, level, straight-legged pose that fires no coaching rule.
pub(super) fn standing_pose() -> LandmarkSet {
    let mut set = LandmarkSet::default();
    for (index, x, y) in [
        (LandmarkIndex::LeftShoulder, 0.4, 0.3),
        (LandmarkIndex::RightShoulder, 0.6, 0.3),
        (LandmarkIndex::LeftHip, 0.4, 0.55),
        (LandmarkIndex::RightHip, 0.6, 0.55),
        (LandmarkIndex::LeftKnee, 0.4, 0.75),
        (LandmarkIndex::RightKnee, 0.6, 0.75),
        (LandmarkIndex::LeftAnkle, 0.4, 0.95),
        (LandmarkIndex::RightAnkle, 0.6, 0.95),
    ] {
        set.set(index, Landmark::new(x, y, 0.0));
    }
    set
}

pub(super) fn write_png(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    RgbImage::from_pixel(16, 16, Rgb([180, 160, 140]))
        .save(&path)
        .unwrap();
    path
}

pub(super) fn controller_with(
    detectors: DetectorProvider,
) -> (SessionController, Rc<RefCell<PreviewLog>>) {
    let (previews, log) = RecordingPreviews::new();
    let controller = SessionController::new(
        AppSettings::default(),
        Arc::new(detectors),
        Arc::new(AnimatedGifOpener),
        Box::new(previews),
    );
    (controller, log)
}

pub(super) fn controller_on_video(
    detector: Arc<dyn PoseDetector>,
) -> (SessionController, Rc<RefCell<PreviewLog>>) {
    let (mut controller, log) = controller_with(DetectorProvider::ready(detector));
    controller.submit_login().unwrap();
    controller.navigate(Screen::Video).unwrap();
    (controller, log)
}
