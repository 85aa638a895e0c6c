//! Application state for the HTTP server.

use slot_engine::SchedulingService;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub scheduling: SchedulingService,
}

impl AppState {
    pub fn new(scheduling: SchedulingService) -> Self {
        Self { scheduling }
    }
}
