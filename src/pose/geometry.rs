/// Lowest reportable skill score.
pub const MIN_SCORE: u8 = 1;
/// Highest reportable skill score.
pub const MAX_SCORE: u8 = 99;

/// Point on the image plane, in normalized frame units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Round to the nearest integer and clamp into `MIN_SCORE..=MAX_SCORE`.
///
/// NaN maps to `MIN_SCORE`.
pub fn clamp_score(value: f64) -> u8 {
    if value.is_nan() {
        return MIN_SCORE;
    }
    value
        .round()
        .clamp(f64::from(MIN_SCORE), f64::from(MAX_SCORE)) as u8
}

/// Angle at `b` between the rays `b->a` and `b->c`, in degrees (0..=180).
///
/// A zero-length ray yields 0.
pub fn angle_degrees(a: Point2, b: Point2, c: Point2) -> f64 {
    let ba = (a.x - b.x, a.y - b.y);
    let bc = (c.x - b.x, c.y - b.y);
    let magnitude = ba.0.hypot(ba.1) * bc.0.hypot(bc.1);
    if magnitude == 0.0 {
        return 0.0;
    }
    let dot = ba.0 * bc.0 + ba.1 * bc.1;
    (dot / magnitude).clamp(-1.0, 1.0).acos().to_degrees()
}
