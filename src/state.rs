//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::MiniUrlService;

#[derive(Clone)]
pub struct AppState {
    pub mini_url_service: Arc<MiniUrlService>,
}

impl AppState {
    pub fn new(mini_url_service: Arc<MiniUrlService>) -> Self {
        Self { mini_url_service }
    }
}
