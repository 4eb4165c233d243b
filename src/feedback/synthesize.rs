//! Landmark-to-feedback rules.
//!
//! The formulas are coaching heuristics, not a biomechanical model: tilt is the
//! vertical gap between paired joints in percent of frame height, and every
//! score is clamped into the reportable range.

use crate::media::MediaKind;
use crate::pose::{LandmarkIndex, LandmarkSet, angle_degrees, clamp_score};

use super::report::{
    AlertLevel, FeedbackReport, InjuryAlert, SkillScore, UNMEASURED_SKILLS, weekly_progress,
};

/// Tilt (percent of frame height) above which shoulders or hips count as uneven.
pub const TILT_LIMIT: f64 = 6.0;
/// Degrees of left/right knee angle difference tolerated.
pub const KNEE_SYMMETRY_LIMIT: f64 = 12.0;
/// Mobility scores below this are flagged.
pub const MOBILITY_FLOOR: u8 = 60;
/// Knee angle treated as full, healthy extension.
pub const TARGET_KNEE_ANGLE: f64 = 170.0;
/// Flat score used for every skill when no pose was found.
pub const UNDETECTED_SCORE: u8 = 40;

/// Raw posture measurements taken from one landmark set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoseMetrics {
    pub shoulder_tilt: f64,
    pub hip_tilt: f64,
    pub left_knee_angle: f64,
    pub right_knee_angle: f64,
    pub knee_symmetry: f64,
}

impl PoseMetrics {
    pub fn measure(landmarks: &LandmarkSet) -> Self {
        let point = |index: LandmarkIndex| landmarks.get(index);
        let tilt = |left: LandmarkIndex, right: LandmarkIndex| {
            (point(left).y - point(right).y).abs() * 100.0
        };
        let left_knee_angle = angle_degrees(
            point(LandmarkIndex::LeftHip).xy(),
            point(LandmarkIndex::LeftKnee).xy(),
            point(LandmarkIndex::LeftAnkle).xy(),
        );
        let right_knee_angle = angle_degrees(
            point(LandmarkIndex::RightHip).xy(),
            point(LandmarkIndex::RightKnee).xy(),
            point(LandmarkIndex::RightAnkle).xy(),
        );
        Self {
            shoulder_tilt: tilt(LandmarkIndex::LeftShoulder, LandmarkIndex::RightShoulder),
            hip_tilt: tilt(LandmarkIndex::LeftHip, LandmarkIndex::RightHip),
            left_knee_angle,
            right_knee_angle,
            knee_symmetry: (left_knee_angle - right_knee_angle).abs(),
        }
    }

    pub fn average_knee_angle(&self) -> f64 {
        (self.left_knee_angle + self.right_knee_angle) / 2.0
    }
}

/// The four reported skill scores, each in 1..=99.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MovementScores {
    pub balance: u8,
    pub form: u8,
    pub mobility: u8,
    pub stability: u8,
}

impl MovementScores {
    pub fn from_metrics(metrics: &PoseMetrics) -> Self {
        let balance = clamp_score(95.0 - metrics.shoulder_tilt * 2.2 - metrics.hip_tilt * 2.2);
        let form = clamp_score(96.0 - metrics.knee_symmetry * 1.4 - metrics.shoulder_tilt * 1.5);
        let mobility =
            clamp_score(100.0 - (TARGET_KNEE_ANGLE - metrics.average_knee_angle()).abs() * 1.2);
        let stability =
            clamp_score((f64::from(balance) + f64::from(form) + f64::from(mobility)) / 3.0);
        Self {
            balance,
            form,
            mobility,
            stability,
        }
    }

    fn skill_scores(&self) -> Vec<SkillScore> {
        vec![
            SkillScore::new("Balance", self.balance),
            SkillScore::new("Form Consistency", self.form),
            SkillScore::new("Mobility Pattern", self.mobility),
            SkillScore::new("Stability", self.stability),
        ]
    }
}

/// A coaching rule: when it fires it contributes a mistake, a drill and
/// optionally an injury alert.
pub struct Rule {
    pub name: &'static str,
    pub mistake: &'static str,
    pub drill: &'static str,
    pub alert: Option<(AlertLevel, &'static str)>,
    fires: fn(&PoseMetrics, &MovementScores) -> bool,
}

impl Rule {
    pub fn fires(&self, metrics: &PoseMetrics, scores: &MovementScores) -> bool {
        (self.fires)(metrics, scores)
    }
}

/// Evaluated in this order; report entries keep it.
pub static RULES: [Rule; 4] = [
    Rule {
        name: "upper-body-tilt",
        mistake: "Upper body tilt: shoulders are not level through the movement.",
        drill: "Single-leg RDL hold - 3 x 30 seconds per side",
        alert: None,
        fires: |metrics, _| metrics.shoulder_tilt > TILT_LIMIT,
    },
    Rule {
        name: "hip-drop",
        mistake: "Hip drop/asymmetry: one side of the pelvis sits lower than the other.",
        drill: "Lateral band walks - 3 x 15 steps each direction",
        alert: Some((
            AlertLevel::Warning,
            "Pelvic asymmetry detected; it can overload the hips and lower back.",
        )),
        fires: |metrics, _| metrics.hip_tilt > TILT_LIMIT,
    },
    Rule {
        name: "knee-mechanics",
        mistake: "Inconsistent knee mechanics between the left and right legs.",
        drill: "Split squat tempo reps - 3 x 8 per leg",
        alert: None,
        fires: |metrics, _| metrics.knee_symmetry > KNEE_SYMMETRY_LIMIT,
    },
    Rule {
        name: "limited-mobility",
        mistake: "Limited extension/mobility through the knees and hips.",
        drill: "Ankle/hamstring mobility sequence - 10 minutes before sessions",
        alert: Some((
            AlertLevel::Danger,
            "Reduced mobility raises strain risk during high-intensity work.",
        )),
        fires: |_, scores| scores.mobility < MOBILITY_FLOOR,
    },
];

const ALL_CLEAR_MISTAKE: &str = "Strong mechanics: no major posture or symmetry issues detected.";
const ALL_CLEAR_DRILL: &str = "Progress to plyometric bounds - 3 x 6 reps to build on solid form";
const ALL_CLEAR_ALERT: &str = "No elevated injury risk detected in this session.";

const UNDETECTED_MISTAKE: &str =
    "No full-body pose detected. Retake the photo or video with your whole body visible.";
const UNDETECTED_DRILL: &str =
    "Retake media: film from the side at hip height with head to feet in frame.";
const UNDETECTED_ALERT: &str =
    "Low detection confidence: injury risk could not be assessed from this upload.";

/// Rules that fire for the given measurements, in evaluation order.
pub fn fired_rules<'a>(
    metrics: &'a PoseMetrics,
    scores: &'a MovementScores,
) -> impl Iterator<Item = &'static Rule> + 'a {
    RULES.iter().filter(move |rule| rule.fires(metrics, scores))
}

/// Turn an optional landmark set into a feedback report.
///
/// A missing set yields the low-confidence report regardless of why
/// detection came back empty.
pub fn synthesize(
    athlete: &str,
    landmarks: Option<&LandmarkSet>,
    media_kind: MediaKind,
) -> FeedbackReport {
    let Some(landmarks) = landmarks else {
        return undetected_report(athlete, media_kind);
    };

    let metrics = PoseMetrics::measure(landmarks);
    let scores = MovementScores::from_metrics(&metrics);
    let mut mistakes = Vec::new();
    let mut drills = Vec::new();
    let mut injury_alerts = Vec::new();
    for rule in fired_rules(&metrics, &scores) {
        mistakes.push(rule.mistake.to_string());
        drills.push(rule.drill.to_string());
        if let Some((level, text)) = rule.alert {
            injury_alerts.push(InjuryAlert::new(level, text));
        }
    }
    if mistakes.is_empty() {
        mistakes.push(ALL_CLEAR_MISTAKE.to_string());
        drills.push(ALL_CLEAR_DRILL.to_string());
    }
    if injury_alerts.is_empty() {
        injury_alerts.push(InjuryAlert::new(AlertLevel::Success, ALL_CLEAR_ALERT));
    }
    tracing::debug!(
        "Pose metrics {:?} -> scores {:?}, {} rule(s) fired",
        metrics,
        scores,
        mistakes.len()
    );

    let skill_scores = scores.skill_scores();
    let weekly_progress = weekly_progress(&skill_scores, mistakes.len(), &injury_alerts, media_kind);
    FeedbackReport {
        athlete: athlete.to_string(),
        session: format!("Pose analysis from uploaded {media_kind}"),
        skill_scores,
        mistakes,
        drills,
        injury_alerts,
        weekly_progress,
    }
}

fn undetected_report(athlete: &str, media_kind: MediaKind) -> FeedbackReport {
    let skill_scores: Vec<SkillScore> = UNMEASURED_SKILLS
        .iter()
        .map(|name| SkillScore::new(*name, UNDETECTED_SCORE))
        .collect();
    let injury_alerts = vec![InjuryAlert::new(AlertLevel::Warning, UNDETECTED_ALERT)];
    let weekly_progress = weekly_progress(&skill_scores, 1, &injury_alerts, media_kind);
    FeedbackReport {
        athlete: athlete.to_string(),
        session: format!("No pose detected in uploaded {media_kind}"),
        skill_scores,
        mistakes: vec![UNDETECTED_MISTAKE.to_string()],
        drills: vec![UNDETECTED_DRILL.to_string()],
        injury_alerts,
        weekly_progress,
    }
}
