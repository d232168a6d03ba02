use std::sync::Arc;

use crate::orchestrator::TranslateLlm;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<TranslateLlm>,
}

impl AppState {
    pub fn new(service: TranslateLlm) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}
