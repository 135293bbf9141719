use std::sync::Arc;

use crate::services::WorkloadService;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<WorkloadService>,
}
