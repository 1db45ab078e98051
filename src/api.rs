//! HTTP API for the store assistant

mod handlers;
mod sse;
mod types;

pub use handlers::create_router;

use crate::llm::ChatService;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<dyn ChatService>,
}

impl AppState {
    pub fn new(service: Arc<dyn ChatService>) -> Self {
        Self { service }
    }
}
