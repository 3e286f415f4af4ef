use std::time::Instant;

use crate::services::RagService;

/// Shared state handed to every handler, created once at startup.
pub struct GatewayState {
    pub rag: RagService,
    pub started_at: Instant,
}

impl GatewayState {
    pub fn new(rag: RagService) -> Self {
        Self {
            rag,
            started_at: Instant::now(),
        }
    }
}
