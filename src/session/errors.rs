use thiserror::Error;

use crate::config::ConfigError;
use crate::media::MediaError;

use super::Screen;

/// Commands the session refused. State is left untouched whenever one is
/// returned.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("{command} is not available on the {screen} screen")]
    WrongScreen {
        command: &'static str,
        screen: Screen,
    },
    #[error("Log in before navigating")]
    NotLoggedIn,
    #[error("The login screen cannot be reopened")]
    LoginNotNavigable,
    #[error("Unknown sport: {0}")]
    UnknownSport(String),
    #[error("Select a photo or video before running analysis")]
    NoMedia,
    #[error("An analysis is already running")]
    AnalysisInFlight,
    #[error("Analysis worker is unavailable")]
    WorkerUnavailable,
    #[error(transparent)]
    Media(#[from] MediaError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}
