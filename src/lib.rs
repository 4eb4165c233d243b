//! Movement analysis core for athlete training sessions.
//!
//! Turns uploaded photos and clips into body landmarks, and landmarks into a
//! scored feedback report, behind a command-driven session controller that a
//! UI layer renders from.
/// Application directory resolution.
pub mod app_dirs;
/// Persisted settings.
pub mod config;
/// Feedback report types and the landmark-to-feedback synthesizer.
pub mod feedback;
/// Tracing subscriber setup.
pub mod logging;
/// Media kinds, still-image decoding and video sources.
pub mod media;
/// Body landmarks, joint geometry and the pose detector seam.
pub mod pose;
/// Representative landmark extraction from stills and clips.
pub mod sampler;
/// Session state machine and background analysis.
pub mod session;
/// Read-only view structs for the presentation layer.
pub mod view_model;
