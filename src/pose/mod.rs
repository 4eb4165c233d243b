//! Body landmarks and the geometry used to score them.
//!
//! # Components
//! - `landmark.rs`: 33-point landmark layout and temporal averaging
//! - `geometry.rs`: joint angles and score clamping
//! - `detector.rs`: detector trait plus the lazily built shared instance

pub mod detector;
pub mod geometry;
pub mod landmark;

pub use detector::{DetectionError, DetectorProvider, PoseDetector};
pub use geometry::{MAX_SCORE, MIN_SCORE, Point2, angle_degrees, clamp_score};
pub use landmark::{Landmark, LandmarkIndex, LandmarkSet};
