//! Application state for the web layer.

use std::sync::Arc;
use std::time::Duration;

use crate::cache::CachedTraClient;
use crate::config::Settings;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Cached TRA client
    pub tra: Arc<CachedTraClient>,

    /// Per-direction thresholds and board routes
    pub settings: Arc<Settings>,

    /// How long clients may cache query results
    pub max_age: Duration,
}

impl AppState {
    /// Create a new app state.
    pub fn new(tra: CachedTraClient, settings: Settings, max_age: Duration) -> Self {
        Self {
            tra: Arc::new(tra),
            settings: Arc::new(settings),
            max_age,
        }
    }
}
