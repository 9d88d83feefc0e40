use crate::collab::CollabRecorder;
use crate::settings::SettingsStore;
use std::sync::Arc;

/// Shared application state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Room creation
    pub recorder: Arc<CollabRecorder>,

    /// Persisted plugin settings
    pub settings: Arc<SettingsStore>,
}

impl AppState {
    pub fn new(recorder: CollabRecorder, settings: SettingsStore) -> Self {
        Self {
            recorder: Arc::new(recorder),
            settings: Arc::new(settings),
        }
    }
}
