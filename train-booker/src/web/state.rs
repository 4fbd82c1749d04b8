//! Application state for the web layer.

use std::sync::Arc;

use crate::domain::ProfileStore;
use crate::search::TrainSearch;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Train search service
    pub search: Arc<TrainSearch>,

    /// Saved traveller profiles
    pub profiles: Arc<ProfileStore>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(search: TrainSearch, profiles: ProfileStore) -> Self {
        Self {
            search: Arc::new(search),
            profiles: Arc::new(profiles),
        }
    }
}
