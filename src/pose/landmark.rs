use super::geometry::Point2;

/// Anatomical index into the 33-point body pose layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum LandmarkIndex {
    Nose = 0,
    LeftEyeInner = 1,
    LeftEye = 2,
    LeftEyeOuter = 3,
    RightEyeInner = 4,
    RightEye = 5,
    RightEyeOuter = 6,
    LeftEar = 7,
    RightEar = 8,
    MouthLeft = 9,
    MouthRight = 10,
    LeftShoulder = 11,
    RightShoulder = 12,
    LeftElbow = 13,
    RightElbow = 14,
    LeftWrist = 15,
    RightWrist = 16,
    LeftPinky = 17,
    RightPinky = 18,
    LeftIndex = 19,
    RightIndex = 20,
    LeftThumb = 21,
    RightThumb = 22,
    LeftHip = 23,
    RightHip = 24,
    LeftKnee = 25,
    RightKnee = 26,
    LeftAnkle = 27,
    RightAnkle = 28,
    LeftHeel = 29,
    RightHeel = 30,
    LeftFootIndex = 31,
    RightFootIndex = 32,
}

impl LandmarkIndex {
    pub const COUNT: usize = 33;
}

/// One detected body point.
///
/// `x` and `y` are normalized to the frame (0.0..1.0, y grows downward); `z`
/// is a relative depth proxy with no fixed unit.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Landmark {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Landmark {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Projection onto the image plane.
    pub fn xy(&self) -> Point2 {
        Point2::new(self.x, self.y)
    }
}

/// Full landmark layout for one person at one instant, or averaged across instants.
#[derive(Debug, Clone, PartialEq)]
pub struct LandmarkSet {
    landmarks: [Landmark; LandmarkIndex::COUNT],
}

impl LandmarkSet {
    pub fn new(landmarks: [Landmark; LandmarkIndex::COUNT]) -> Self {
        Self { landmarks }
    }

    /// Build from detector output, rejecting anything that is not exactly 33 points.
    pub fn from_slice(landmarks: &[Landmark]) -> Option<Self> {
        let landmarks: [Landmark; LandmarkIndex::COUNT] = landmarks.try_into().ok()?;
        Some(Self { landmarks })
    }

    pub fn get(&self, index: LandmarkIndex) -> &Landmark {
        &self.landmarks[index as usize]
    }

    pub fn set(&mut self, index: LandmarkIndex, landmark: Landmark) {
        self.landmarks[index as usize] = landmark;
    }

    /// Index-by-index arithmetic mean of every coordinate across `sets`.
    ///
    /// Returns `None` for an empty input.
    pub fn mean(sets: &[LandmarkSet]) -> Option<LandmarkSet> {
        if sets.is_empty() {
            return None;
        }
        let count = sets.len() as f64;
        let mut sum = [Landmark::default(); LandmarkIndex::COUNT];
        for set in sets {
            for (acc, landmark) in sum.iter_mut().zip(set.landmarks.iter()) {
                acc.x += landmark.x;
                acc.y += landmark.y;
                acc.z += landmark.z;
            }
        }
        for acc in &mut sum {
            acc.x /= count;
            acc.y /= count;
            acc.z /= count;
        }
        Some(LandmarkSet::new(sum))
    }
}

impl Default for LandmarkSet {
    fn default() -> Self {
        Self {
            landmarks: [Landmark::default(); LandmarkIndex::COUNT],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform(value: f64) -> LandmarkSet {
        LandmarkSet::new([Landmark::new(value, value * 2.0, -value); LandmarkIndex::COUNT])
    }

    #[test]
    fn lower_body_indices_match_pose_layout() {
        assert_eq!(LandmarkIndex::LeftShoulder as usize, 11);
        assert_eq!(LandmarkIndex::RightHip as usize, 24);
        assert_eq!(LandmarkIndex::LeftKnee as usize, 25);
        assert_eq!(LandmarkIndex::RightAnkle as usize, 28);
        assert_eq!(LandmarkIndex::RightFootIndex as usize, LandmarkIndex::COUNT - 1);
    }

    #[test]
    fn from_slice_requires_full_layout() {
        assert!(LandmarkSet::from_slice(&[Landmark::default(); 17]).is_none());
        let set = LandmarkSet::from_slice(&[Landmark::new(0.5, 0.25, 0.0); 33]).unwrap();
        assert_eq!(set.get(LandmarkIndex::Nose).y, 0.25);
    }

    #[test]
    fn mean_of_nothing_is_none() {
        assert!(LandmarkSet::mean(&[]).is_none());
    }

    #[test]
    fn mean_averages_each_coordinate_independently() {
        let mut first = uniform(0.1);
        first.set(LandmarkIndex::LeftKnee, Landmark::new(0.3, 0.6, 0.9));
        let second = uniform(0.2);
        let third = uniform(0.6);

        let mean = LandmarkSet::mean(&[first, second, third]).unwrap();

        let nose = mean.get(LandmarkIndex::Nose);
        assert!((nose.x - 0.3).abs() < 1e-9);
        assert!((nose.y - 0.6).abs() < 1e-9);
        assert!((nose.z + 0.3).abs() < 1e-9);
        let knee = mean.get(LandmarkIndex::LeftKnee);
        assert!((knee.x - (0.3 + 0.2 + 0.6) / 3.0).abs() < 1e-9);
        assert!((knee.y - (0.6 + 0.4 + 1.2) / 3.0).abs() < 1e-9);
        assert!((knee.z - (0.9 - 0.2 - 0.6) / 3.0).abs() < 1e-9);
    }
}
