//! Application state for the web layer.

use std::sync::Arc;

use crate::connections::SegmentTable;
use crate::store::ScheduleStore;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Lines, routes and timetable entries
    pub store: Arc<ScheduleStore>,

    /// Direction → segment routes for connection queries
    pub segments: Arc<SegmentTable>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(store: ScheduleStore, segments: SegmentTable) -> Self {
        Self {
            store: Arc::new(store),
            segments: Arc::new(segments),
        }
    }
}
