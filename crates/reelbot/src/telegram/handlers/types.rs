//! Handler types and dependencies

use std::sync::Arc;

use reelcore::ProfileClient;

/// Error type for handlers
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Dependencies required by handlers
#[derive(Clone)]
pub struct HandlerDeps {
    pub profiles: Arc<dyn ProfileClient>,
}

impl HandlerDeps {
    pub fn new(profiles: Arc<dyn ProfileClient>) -> Self {
        Self { profiles }
    }
}
