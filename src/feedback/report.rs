use std::fmt;

use crate::media::MediaKind;

/// Severity attached to an injury alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AlertLevel {
    Success,
    Warning,
    Danger,
}

impl AlertLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Danger => "danger",
        }
    }

    /// Upper-case badge label.
    pub fn badge(&self) -> &'static str {
        match self {
            Self::Success => "SUCCESS",
            Self::Warning => "WARNING",
            Self::Danger => "DANGER",
        }
    }
}

impl fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillScore {
    pub name: String,
    pub score: u8,
}

impl SkillScore {
    pub fn new(name: impl Into<String>, score: u8) -> Self {
        Self {
            name: name.into(),
            score,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InjuryAlert {
    pub level: AlertLevel,
    pub text: String,
}

impl InjuryAlert {
    pub fn new(level: AlertLevel, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
        }
    }
}

/// One dashboard metric, already formatted for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressMetric {
    pub label: String,
    pub value: String,
}

impl ProgressMetric {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Structured outcome of one analysis run.
///
/// Reports produced by the synthesizer always carry at least one mistake,
/// drill and injury alert, and every skill score lies in 1..=99.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackReport {
    pub athlete: String,
    pub session: String,
    pub skill_scores: Vec<SkillScore>,
    pub mistakes: Vec<String>,
    pub drills: Vec<String>,
    pub injury_alerts: Vec<InjuryAlert>,
    pub weekly_progress: Vec<ProgressMetric>,
}

pub(crate) const UNMEASURED_SKILLS: [&str; 4] = ["Footwork", "Balance", "Posture", "Explosiveness"];

impl FeedbackReport {
    /// Stand-in shown before any analysis has completed.
    ///
    /// Scores are 0 so the views read as "not measured" rather than as a
    /// poor result.
    pub fn placeholder(athlete: &str) -> Self {
        Self {
            athlete: athlete.to_string(),
            session: "No analysis yet".to_string(),
            skill_scores: UNMEASURED_SKILLS
                .iter()
                .map(|name| SkillScore::new(*name, 0))
                .collect(),
            mistakes: vec![
                "Nothing analyzed yet. Upload a training photo or video to see detected mistakes."
                    .to_string(),
            ],
            drills: vec!["Recommended drills appear after your first analysis.".to_string()],
            injury_alerts: vec![InjuryAlert::new(
                AlertLevel::Warning,
                "No injury risk data yet. Run an analysis to check your mechanics.",
            )],
            weekly_progress: vec![
                ProgressMetric::new(AVERAGE_SCORE_LABEL, "--"),
                ProgressMetric::new(MISTAKES_LABEL, "--"),
                ProgressMetric::new(RISK_ALERTS_LABEL, "--"),
                ProgressMetric::new(SOURCE_LABEL, "--"),
            ],
        }
    }

    pub fn risk_alert_count(&self) -> usize {
        count_risk_alerts(&self.injury_alerts)
    }

    pub fn worst_alert_level(&self) -> Option<AlertLevel> {
        self.injury_alerts.iter().map(|alert| alert.level).max()
    }
}

pub(crate) const AVERAGE_SCORE_LABEL: &str = "Average Score";
pub(crate) const MISTAKES_LABEL: &str = "Mistakes Flagged";
pub(crate) const RISK_ALERTS_LABEL: &str = "Risk Alerts";
pub(crate) const SOURCE_LABEL: &str = "Analysis Source";

/// Alerts that signal risk, i.e. anything but `Success`.
fn count_risk_alerts(alerts: &[InjuryAlert]) -> usize {
    alerts
        .iter()
        .filter(|alert| alert.level != AlertLevel::Success)
        .count()
}

fn mean_score(scores: &[SkillScore]) -> f64 {
    if scores.is_empty() {
        return 0.0;
    }
    let total: u32 = scores.iter().map(|s| u32::from(s.score)).sum();
    f64::from(total) / scores.len() as f64
}

/// Summary rows for the weekly dashboard.
pub(crate) fn weekly_progress(
    skill_scores: &[SkillScore],
    mistakes: usize,
    injury_alerts: &[InjuryAlert],
    media_kind: MediaKind,
) -> Vec<ProgressMetric> {
    let average = mean_score(skill_scores).round() as u32;
    let risk_alerts = count_risk_alerts(injury_alerts);
    vec![
        ProgressMetric::new(AVERAGE_SCORE_LABEL, format!("{average}/100")),
        ProgressMetric::new(MISTAKES_LABEL, mistakes.to_string()),
        ProgressMetric::new(RISK_ALERTS_LABEL, risk_alerts.to_string()),
        ProgressMetric::new(SOURCE_LABEL, media_kind.label()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_has_report_shape_with_unmeasured_values() {
        let report = FeedbackReport::placeholder("Jordan Lee");
        assert_eq!(report.athlete, "Jordan Lee");
        assert_eq!(report.skill_scores.len(), 4);
        assert!(report.skill_scores.iter().all(|s| s.score == 0));
        assert_eq!(report.mistakes.len(), 1);
        assert_eq!(report.drills.len(), 1);
        assert_eq!(report.injury_alerts.len(), 1);
        assert!(report.weekly_progress.iter().all(|m| m.value == "--"));
    }

    #[test]
    fn weekly_progress_summarizes_scores_and_alerts() {
        let scores = [
            SkillScore::new("Balance", 80),
            SkillScore::new("Form Consistency", 71),
            SkillScore::new("Mobility Pattern", 90),
            SkillScore::new("Stability", 80),
        ];
        let alerts = [
            InjuryAlert::new(AlertLevel::Warning, "a"),
            InjuryAlert::new(AlertLevel::Danger, "b"),
        ];
        let rows = weekly_progress(&scores, 3, &alerts, MediaKind::Video);
        assert_eq!(rows[0], ProgressMetric::new("Average Score", "80/100"));
        assert_eq!(rows[1], ProgressMetric::new("Mistakes Flagged", "3"));
        assert_eq!(rows[2], ProgressMetric::new("Risk Alerts", "2"));
        assert_eq!(rows[3], ProgressMetric::new("Analysis Source", "Video"));
    }

    #[test]
    fn worst_alert_level_orders_danger_highest() {
        let mut report = FeedbackReport::placeholder("x");
        report.injury_alerts = vec![
            InjuryAlert::new(AlertLevel::Success, "ok"),
            InjuryAlert::new(AlertLevel::Danger, "bad"),
            InjuryAlert::new(AlertLevel::Warning, "meh"),
        ];
        assert_eq!(report.worst_alert_level(), Some(AlertLevel::Danger));
        assert_eq!(report.risk_alert_count(), 2);
    }
}
