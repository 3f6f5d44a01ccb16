use std::sync::Arc;

use service::queue::VolunteerService;
use service::storage::VolunteerStore;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub volunteers: Arc<VolunteerService>,
}

impl AppState {
    pub fn new(store: Arc<dyn VolunteerStore>) -> Self {
        Self { volunteers: Arc::new(VolunteerService::new(store)) }
    }
}
