//! Helpers to convert session state into presentation-facing view structs.

use crate::feedback::{AlertLevel, FeedbackReport, ProgressMetric};
use crate::media::MediaKind;
use crate::session::{PreviewHandle, Screen, SessionController, StatusNotice, sports};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderView {
    pub title: &'static str,
    pub athlete: String,
    pub status: StatusNotice,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SportChipView {
    pub name: &'static str,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadView {
    pub file_name: Option<String>,
    pub kind: Option<MediaKind>,
    pub preview: Option<PreviewHandle>,
    pub analyzing: bool,
    pub can_analyze: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricView {
    pub label: String,
    /// Score rendered as `NN/100`.
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertView {
    pub level: AlertLevel,
    pub badge: &'static str,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisView {
    pub athlete: String,
    pub session: String,
    pub metrics: Vec<MetricView>,
    pub mistakes: Vec<String>,
    pub drills: Vec<String>,
    pub alerts: Vec<AlertView>,
    /// True when nothing has been analyzed yet.
    pub placeholder: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardView {
    pub athlete: String,
    pub progress: Vec<ProgressMetric>,
    pub coach_note: &'static str,
    pub badge: &'static str,
    pub placeholder: bool,
}

const PLACEHOLDER_NOTE: &str = "Run your first analysis to unlock this week's coaching notes.";
const PLACEHOLDER_BADGE: &str = "No Data";

pub fn header(controller: &SessionController) -> HeaderView {
    HeaderView {
        title: controller.screen().title(),
        athlete: controller.athlete_name().to_string(),
        status: controller.status().clone(),
    }
}

/// One chip per catalog sport, in catalog order.
pub fn sport_chips(controller: &SessionController) -> Vec<SportChipView> {
    sports::SPORTS
        .iter()
        .copied()
        .map(|name| SportChipView {
            name,
            selected: controller.is_sport_selected(name),
        })
        .collect()
}

pub fn upload_view(controller: &SessionController) -> UploadView {
    let media = controller.media();
    UploadView {
        file_name: media.map(|file| file.file_name()),
        kind: media.map(|file| file.kind),
        preview: controller.preview_handle(),
        analyzing: controller.is_analyzing(),
        can_analyze: media.is_some()
            && !controller.is_analyzing()
            && controller.screen() == Screen::Video,
    }
}

/// Render the stored report, or the "nothing analyzed yet" placeholder.
pub fn analysis_view(report: Option<&FeedbackReport>, athlete: &str) -> AnalysisView {
    let is_placeholder = report.is_none();
    let fallback;
    let report = match report {
        Some(report) => report,
        None => {
            fallback = FeedbackReport::placeholder(athlete);
            &fallback
        }
    };
    AnalysisView {
        athlete: report.athlete.clone(),
        session: report.session.clone(),
        metrics: report
            .skill_scores
            .iter()
            .map(|skill| MetricView {
                label: skill.name.clone(),
                value: format_score(skill.score),
            })
            .collect(),
        mistakes: report.mistakes.clone(),
        drills: report.drills.clone(),
        alerts: report
            .injury_alerts
            .iter()
            .map(|alert| AlertView {
                level: alert.level,
                badge: alert.level.badge(),
                text: alert.text.clone(),
            })
            .collect(),
        placeholder: is_placeholder,
    }
}

pub fn dashboard_view(report: Option<&FeedbackReport>, athlete: &str) -> DashboardView {
    let Some(report) = report else {
        return DashboardView {
            athlete: athlete.to_string(),
            progress: FeedbackReport::placeholder(athlete).weekly_progress,
            coach_note: PLACEHOLDER_NOTE,
            badge: PLACEHOLDER_BADGE,
            placeholder: true,
        };
    };
    let level = report.worst_alert_level().unwrap_or(AlertLevel::Success);
    DashboardView {
        athlete: report.athlete.clone(),
        progress: report.weekly_progress.clone(),
        coach_note: coach_note(level),
        badge: status_badge(level),
        placeholder: false,
    }
}

pub fn format_score(score: u8) -> String {
    format!("{score}/100")
}

/// Dashboard badge for the most severe alert of the week.
pub fn status_badge(level: AlertLevel) -> &'static str {
    match level {
        AlertLevel::Success => "On Track",
        AlertLevel::Warning => "Monitor",
        AlertLevel::Danger => "Needs Attention",
    }
}

pub fn coach_note(level: AlertLevel) -> &'static str {
    match level {
        AlertLevel::Success => {
            "Mechanics look solid. Keep layering volume on top of clean, repeatable form."
        }
        AlertLevel::Warning => {
            "Asymmetry showed up this week. Keep the corrective drills in every warm-up."
        }
        AlertLevel::Danger => {
            "Ease off high-intensity work until the mobility sequence restores your range."
        }
    }
}
