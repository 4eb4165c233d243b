use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::media::MediaFile;

/// Opaque token the presentation layer uses to show an uploaded file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PreviewHandle(Uuid);

impl PreviewHandle {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PreviewHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PreviewHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "preview-{}", self.0)
    }
}

/// Issues and releases preview handles for uploaded media.
///
/// The session owns at most one live handle and always releases it before
/// asking for another.
pub trait PreviewStore {
    fn create(&mut self, media: &MediaFile) -> PreviewHandle;
    fn release(&mut self, handle: PreviewHandle);
    fn resolve(&self, handle: PreviewHandle) -> Option<&Path>;
}

/// In-memory store mapping handles to the uploaded file path.
#[derive(Debug, Default)]
pub struct PreviewRegistry {
    entries: HashMap<PreviewHandle, PathBuf>,
}

impl PreviewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PreviewStore for PreviewRegistry {
    fn create(&mut self, media: &MediaFile) -> PreviewHandle {
        let handle = PreviewHandle::new();
        self.entries.insert(handle, media.path.clone());
        handle
    }

    fn release(&mut self, handle: PreviewHandle) {
        if self.entries.remove(&handle).is_none() {
            tracing::warn!("Released unknown preview handle {handle}");
        }
    }

    fn resolve(&self, handle: PreviewHandle) -> Option<&Path> {
        self.entries.get(&handle).map(PathBuf::as_path)
    }
}
