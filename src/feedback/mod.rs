//! Feedback reports and the rules that produce them from landmarks.

pub mod report;
pub mod synthesize;

pub use report::{AlertLevel, FeedbackReport, InjuryAlert, ProgressMetric, SkillScore};
pub use synthesize::{MovementScores, PoseMetrics, RULES, Rule, fired_rules, synthesize};
