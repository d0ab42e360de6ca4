//! Application state shared by the HTTP handlers

use std::sync::Arc;

use crate::api::latency::Latency;
use crate::core::service::ConsoleService;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ConsoleService>,
    pub latency: Latency,
}

impl AppState {
    pub fn new(service: ConsoleService, latency: Latency) -> Self {
        Self {
            service: Arc::new(service),
            latency,
        }
    }
}
