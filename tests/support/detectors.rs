use std::sync::Mutex;

use formcheck::pose::{DetectionError, Landmark, LandmarkIndex, LandmarkSet, PoseDetector};
use image::RgbImage;

/// Places the athlete according to frame brightness so each sampled
/// instant of a clip yields a distinguishable pose.
pub struct BrightnessDetector {
    pub seen: Mutex<Vec<u8>>,
}

impl BrightnessDetector {
    pub fn new() -> Self {
        Self {
            seen: Mutex::new(Vec::new()),
        }
    }
}

impl PoseDetector for BrightnessDetector {
    fn detect(&self, frame: &RgbImage) -> Result<Option<LandmarkSet>, DetectionError> {
        let shade = frame.get_pixel(0, 0).0[0];
        self.seen.lock().unwrap().push(shade);
        if shade < 32 {
            return Ok(None);
        }
        Ok(Some(standing_pose(f64::from(shade) / 255.0 * 0.1)))
    }
}

/// Level, straight-legged pose shifted right by `dx`.
pub fn standing_pose(dx: f64) -> LandmarkSet {
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
        set.set(index, Landmark::new(x + dx, y, 0.0));
    }
    set
}
