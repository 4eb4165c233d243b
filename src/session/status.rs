/// Tone of the status line, mapped to a badge by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusTone {
    #[default]
    Idle,
    Busy,
    Info,
    Warning,
    Error,
}

/// Non-blocking notice shown alongside the current screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusNotice {
    pub text: String,
    pub tone: StatusTone,
}

impl StatusNotice {
    pub fn new(text: impl Into<String>, tone: StatusTone) -> Self {
        Self {
            text: text.into(),
            tone,
        }
    }

    pub fn idle() -> Self {
        Self::new("Ready", StatusTone::Idle)
    }
}

impl Default for StatusNotice {
    fn default() -> Self {
        Self::idle()
    }
}
