use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::time::Duration;

use crate::config::{self, AppSettings};
use crate::feedback::FeedbackReport;
use crate::media::{MediaFile, VideoOpener};
use crate::pose::DetectorProvider;
use crate::sampler::LandmarkSampler;

use super::events::EventHub;
use super::jobs::{self, AnalysisJob, AnalysisJobResult};
use super::preview::{PreviewHandle, PreviewStore};
use super::{Screen, SessionError, SessionEvent, StatusNotice, StatusTone, sports};

struct UploadedMedia {
    file: MediaFile,
    preview: PreviewHandle,
}

struct PendingAnalysis {
    request_id: u64,
    file_name: String,
}

struct AnalysisChannel {
    tx: Sender<AnalysisJob>,
    rx: Receiver<AnalysisJobResult>,
}

/// Owns the whole session: screen, selection, upload slot and last report.
///
/// Driven from a single thread. Analyses run on a worker thread and are
/// applied by [`SessionController::poll_analysis`].
pub struct SessionController {
    screen: Screen,
    settings: AppSettings,
    config_path: Option<PathBuf>,
    selected_sports: HashSet<&'static str>,
    media: Option<UploadedMedia>,
    /// Bumped whenever the upload slot changes so late results can be told apart.
    media_generation: u64,
    report: Option<FeedbackReport>,
    pending: Option<PendingAnalysis>,
    next_request_id: u64,
    status: StatusNotice,
    previews: Box<dyn PreviewStore>,
    events: EventHub,
    sampler: Arc<LandmarkSampler>,
    analysis: AnalysisChannel,
}

impl SessionController {
    pub fn new(
        settings: AppSettings,
        detectors: Arc<DetectorProvider>,
        videos: Arc<dyn VideoOpener>,
        previews: Box<dyn PreviewStore>,
    ) -> Self {
        let settings = settings.normalized();
        let sampler = Arc::new(LandmarkSampler::new(
            detectors,
            videos,
            settings.sampling.clone(),
        ));
        let (tx, rx) = jobs::spawn_analysis_worker(Arc::clone(&sampler));
        let selected_sports = settings
            .profile
            .selected_sports
            .iter()
            .filter_map(|name| sports::catalog_name(name))
            .collect();
        Self {
            screen: Screen::Login,
            settings,
            config_path: None,
            selected_sports,
            media: None,
            media_generation: 0,
            report: None,
            pending: None,
            next_request_id: 1,
            status: StatusNotice::idle(),
            previews,
            events: EventHub::default(),
            sampler,
            analysis: AnalysisChannel { tx, rx },
        }
    }

    /// Build a controller from the settings file in the app directory.
    pub fn from_default_config(
        detectors: Arc<DetectorProvider>,
        videos: Arc<dyn VideoOpener>,
        previews: Box<dyn PreviewStore>,
    ) -> Result<Self, SessionError> {
        let path = config::config_path()?;
        let settings = config::load_from(&path)?;
        Ok(Self::new(settings, detectors, videos, previews).with_config_path(path))
    }

    /// Persist saved sport selections to `path`.
    pub fn with_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    pub fn subscribe(&mut self) -> Receiver<SessionEvent> {
        self.events.subscribe()
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }

    pub fn athlete_name(&self) -> &str {
        &self.settings.profile.athlete_name
    }

    /// Selected sports in catalog order.
    pub fn selected_sports(&self) -> Vec<&'static str> {
        sports::in_catalog_order(self.selected_sports.iter().copied())
    }

    pub fn is_sport_selected(&self, name: &str) -> bool {
        self.selected_sports.contains(name)
    }

    pub fn media(&self) -> Option<&MediaFile> {
        self.media.as_ref().map(|media| &media.file)
    }

    pub fn preview_handle(&self) -> Option<PreviewHandle> {
        self.media.as_ref().map(|media| media.preview)
    }

    pub fn preview_path(&self) -> Option<&Path> {
        self.previews.resolve(self.preview_handle()?)
    }

    /// Last completed report, if any analysis finished for the current upload.
    pub fn report(&self) -> Option<&FeedbackReport> {
        self.report.as_ref()
    }

    pub fn is_analyzing(&self) -> bool {
        self.pending.is_some()
    }

    pub fn status(&self) -> &StatusNotice {
        &self.status
    }

    pub fn submit_login(&mut self) -> Result<(), SessionError> {
        self.require_screen("submit_login", Screen::Login)?;
        tracing::info!("Athlete {} logged in", self.athlete_name());
        self.set_screen(Screen::Sports);
        Ok(())
    }

    /// Flip membership of `name`; returns whether it is now selected.
    pub fn toggle_sport(&mut self, name: &str) -> Result<bool, SessionError> {
        self.require_screen("toggle_sport", Screen::Sports)?;
        let Some(sport) = sports::catalog_name(name) else {
            tracing::warn!("Ignoring unknown sport {name}");
            return Err(SessionError::UnknownSport(name.to_string()));
        };
        let selected = if self.selected_sports.remove(sport) {
            false
        } else {
            self.selected_sports.insert(sport);
            true
        };
        tracing::debug!("Sport {sport} selected: {selected}");
        self.events
            .emit(SessionEvent::SportsChanged(self.selected_sports()));
        Ok(selected)
    }

    /// Store the selection in settings, and on disk when a config path is set.
    pub fn save_sports(&mut self) -> Result<(), SessionError> {
        self.require_screen("save_sports", Screen::Sports)?;
        let names = self.selected_sports();
        self.settings.profile.selected_sports = names.iter().map(|name| name.to_string()).collect();
        if let Some(path) = self.config_path.as_deref() {
            if let Err(err) = config::save_to_path(&self.settings, path) {
                tracing::warn!("Failed to save sports: {err}");
                self.set_status(format!("Could not save sports: {err}"), StatusTone::Error);
                return Err(err.into());
            }
        }
        let summary = if names.is_empty() {
            "none".to_string()
        } else {
            names.join(", ")
        };
        tracing::info!("Saved sports: {summary}");
        self.set_status(format!("Saved: {summary}"), StatusTone::Info);
        Ok(())
    }

    /// Replace the upload slot with `path`, dropping any report for the old upload.
    pub fn select_media(&mut self, path: impl Into<PathBuf>) -> Result<(), SessionError> {
        self.require_screen("select_media", Screen::Video)?;
        let file = MediaFile::from_path(path).inspect_err(|err| {
            tracing::warn!("Rejected upload: {err}");
        })?;
        self.release_media();
        let preview = self.previews.create(&file);
        let file_name = file.file_name();
        tracing::info!("Selected {} {}", file.kind, file.path.display());
        self.media = Some(UploadedMedia { file, preview });
        self.events
            .emit(SessionEvent::MediaChanged(Some(file_name.clone())));
        self.set_status(format!("Selected {file_name}"), StatusTone::Info);
        Ok(())
    }

    pub fn clear_media(&mut self) -> Result<(), SessionError> {
        self.require_screen("clear_media", Screen::Video)?;
        self.release_media();
        tracing::info!("Cleared upload");
        self.events.emit(SessionEvent::MediaChanged(None));
        self.set_status("Upload cleared", StatusTone::Idle);
        Ok(())
    }

    /// Queue an analysis of the current upload.
    ///
    /// Rejected without side effects while another run is in flight.
    pub fn run_analysis(&mut self) -> Result<(), SessionError> {
        self.require_screen("run_analysis", Screen::Video)?;
        if self.pending.is_some() {
            tracing::warn!("Analysis already running; ignoring request");
            return Err(SessionError::AnalysisInFlight);
        }
        let Some(media) = self.media.as_ref() else {
            tracing::warn!("Analysis requested without an upload");
            self.set_status("Select a photo or video first", StatusTone::Warning);
            return Err(SessionError::NoMedia);
        };
        let request_id = self.next_request_id;
        self.next_request_id = self.next_request_id.wrapping_add(1);
        let file_name = media.file.file_name();
        let job = AnalysisJob {
            request_id,
            media_generation: self.media_generation,
            athlete: self.settings.profile.athlete_name.clone(),
            media: media.file.clone(),
        };
        if let Err(returned) = self.analysis.tx.send(job) {
            tracing::warn!("Analysis worker is gone; restarting it");
            self.restart_worker();
            if self.analysis.tx.send(returned.0).is_err() {
                self.set_status(
                    "Analysis is unavailable. Restart and try again.",
                    StatusTone::Error,
                );
                return Err(SessionError::WorkerUnavailable);
            }
        }
        tracing::info!("Analysis {request_id} started for {file_name}");
        self.pending = Some(PendingAnalysis {
            request_id,
            file_name: file_name.clone(),
        });
        self.events.emit(SessionEvent::AnalysisStarted {
            file_name: file_name.clone(),
        });
        self.set_status(format!("Analyzing {file_name}..."), StatusTone::Busy);
        Ok(())
    }

    /// Apply finished analyses. Returns true when session state changed.
    pub fn poll_analysis(&mut self) -> bool {
        let mut changed = false;
        loop {
            match self.analysis.rx.try_recv() {
                Ok(message) => changed |= self.apply_analysis_result(message),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    changed |= self.abandon_pending();
                    break;
                }
            }
        }
        changed
    }

    /// Block up to `timeout` for the in-flight analysis and apply it.
    ///
    /// For hosts without a frame loop. Returns true when session state changed.
    pub fn wait_for_analysis(&mut self, timeout: Duration) -> bool {
        if self.pending.is_none() {
            return self.poll_analysis();
        }
        match self.analysis.rx.recv_timeout(timeout) {
            Ok(message) => self.apply_analysis_result(message) | self.poll_analysis(),
            Err(RecvTimeoutError::Timeout) => false,
            Err(RecvTimeoutError::Disconnected) => self.abandon_pending(),
        }
    }

    /// Change screen after login. The login screen itself is not reachable.
    pub fn navigate(&mut self, screen: Screen) -> Result<(), SessionError> {
        if self.screen == Screen::Login {
            tracing::warn!("Navigation to {screen} before login ignored");
            return Err(SessionError::NotLoggedIn);
        }
        if screen == Screen::Login {
            tracing::warn!("Navigation back to login ignored");
            return Err(SessionError::LoginNotNavigable);
        }
        self.set_screen(screen);
        Ok(())
    }

    fn require_screen(&self, command: &'static str, expected: Screen) -> Result<(), SessionError> {
        if self.screen == expected {
            return Ok(());
        }
        tracing::warn!("Ignoring {command} on the {} screen", self.screen);
        Err(SessionError::WrongScreen {
            command,
            screen: self.screen,
        })
    }

    fn set_screen(&mut self, screen: Screen) {
        if self.screen == screen {
            return;
        }
        tracing::info!("Screen {} -> {}", self.screen, screen);
        self.screen = screen;
        self.events.emit(SessionEvent::ScreenChanged(screen));
    }

    fn set_status(&mut self, text: impl Into<String>, tone: StatusTone) {
        self.status = StatusNotice::new(text, tone);
        self.events.emit(SessionEvent::Status(self.status.clone()));
    }

    /// Release the preview before the slot is reused or emptied.
    fn release_media(&mut self) {
        if let Some(media) = self.media.take() {
            self.previews.release(media.preview);
        }
        self.media_generation = self.media_generation.wrapping_add(1);
        self.report = None;
    }

    fn apply_analysis_result(&mut self, message: AnalysisJobResult) -> bool {
        let Some(pending) = self.pending.take_if(|pending| pending.request_id == message.request_id)
        else {
            tracing::debug!("Dropping result for unknown analysis {}", message.request_id);
            return false;
        };
        if message.media_generation != self.media_generation {
            tracing::info!(
                "Discarding analysis {} for replaced upload {}",
                message.request_id,
                pending.file_name
            );
            self.set_status(
                format!("Discarded analysis of {}: upload changed", pending.file_name),
                StatusTone::Info,
            );
            return true;
        }
        match message.result {
            Ok(report) => {
                tracing::info!(
                    "Analysis {} finished for {}: {}",
                    message.request_id,
                    message.media.path.display(),
                    report.session
                );
                self.report = Some(report);
                self.events.emit(SessionEvent::AnalysisFinished {
                    file_name: pending.file_name.clone(),
                });
                self.set_status(
                    format!("Analysis complete for {}", pending.file_name),
                    StatusTone::Info,
                );
                self.set_screen(Screen::Analysis);
            }
            Err(err) => self.fail_analysis(&pending, &err.to_string()),
        }
        true
    }

    /// The worker hung up; fail the in-flight run and start a fresh worker.
    fn abandon_pending(&mut self) -> bool {
        self.restart_worker();
        let Some(pending) = self.pending.take() else {
            return false;
        };
        self.fail_analysis(&pending, "analysis worker stopped");
        true
    }

    fn restart_worker(&mut self) {
        tracing::info!("Starting analysis worker");
        let (tx, rx) = jobs::spawn_analysis_worker(Arc::clone(&self.sampler));
        self.analysis = AnalysisChannel { tx, rx };
    }

    /// Leave the screen and any prior report as they were.
    fn fail_analysis(&mut self, pending: &PendingAnalysis, reason: &str) {
        tracing::warn!("Analysis of {} failed: {reason}", pending.file_name);
        let message =
            format!("Analysis failed: {reason}. Check your connection and try again.");
        self.events.emit(SessionEvent::AnalysisFailed {
            message: message.clone(),
        });
        self.set_status(message, StatusTone::Error);
    }
}

impl Drop for SessionController {
    fn drop(&mut self) {
        if let Some(media) = self.media.take() {
            self.previews.release(media.preview);
        }
    }
}
