use std::sync::mpsc::{self, Receiver, Sender};

use super::{Screen, StatusNotice};

/// State changes broadcast to the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    ScreenChanged(Screen),
    SportsChanged(Vec<&'static str>),
    /// `None` once the upload slot is cleared.
    MediaChanged(Option<String>),
    AnalysisStarted { file_name: String },
    AnalysisFinished { file_name: String },
    AnalysisFailed { message: String },
    Status(StatusNotice),
}

/// Fan-out of events to every live subscriber.
#[derive(Debug, Default)]
pub(crate) struct EventHub {
    subscribers: Vec<Sender<SessionEvent>>,
}

impl EventHub {
    pub(crate) fn subscribe(&mut self) -> Receiver<SessionEvent> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    /// Deliver `event`, forgetting subscribers whose receiver was dropped.
    pub(crate) fn emit(&mut self, event: SessionEvent) {
        self.subscribers
            .retain(|subscriber| subscriber.send(event.clone()).is_ok());
    }

    pub(crate) fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}
