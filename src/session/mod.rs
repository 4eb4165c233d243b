//! Screen flow, upload slot and analysis orchestration.

mod controller;
mod errors;
mod events;
mod jobs;
pub mod preview;
mod screen;
pub mod sports;
mod status;

#[cfg(test)]
mod test_support;

pub use controller::SessionController;
pub use errors::SessionError;
pub use events::SessionEvent;
pub use preview::{PreviewHandle, PreviewRegistry, PreviewStore};
pub use screen::Screen;
pub use status::{StatusNotice, StatusTone};
