//! Application state for the web layer.

use std::sync::Arc;

use crate::planner::SearchConfig;
use crate::timetable::Timetable;

/// Shared application state.
///
/// The timetable is read-only, so every request can search it at once.
#[derive(Clone)]
pub struct AppState {
    /// Loaded transport network
    pub timetable: Arc<Timetable>,

    /// Route search configuration
    pub config: Arc<SearchConfig>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(timetable: Timetable, config: SearchConfig) -> Self {
        Self {
            timetable: Arc::new(timetable),
            config: Arc::new(config),
        }
    }
}
