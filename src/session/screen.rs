use std::fmt;

/// Screens of the session flow. `Login` is the only initial screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Screen {
    #[default]
    Login,
    Sports,
    Video,
    Analysis,
    Dashboard,
}

impl Screen {
    pub fn title(&self) -> &'static str {
        match self {
            Self::Login => "Athlete Login",
            Self::Sports => "Sports Selection",
            Self::Video => "Training Video",
            Self::Analysis => "AI Analysis",
            Self::Dashboard => "Weekly Dashboard",
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}
