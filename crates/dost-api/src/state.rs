//! Application state shared across all route handlers.

use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use dost_chat::ResponseResolver;
use dost_core::config::ApiConfig;

/// Shared application state.
///
/// Cloned per request; everything inside is reference-counted and read-only.
#[derive(Clone)]
pub struct AppState {
    /// Local resolver answering `/chat`.
    pub resolver: ResponseResolver,
    /// HTTP service settings.
    pub config: Arc<ApiConfig>,
    /// Server start time for uptime calculation.
    pub start_time: Instant,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(resolver: ResponseResolver, config: ApiConfig) -> Self {
        Self {
            resolver,
            config: Arc::new(config),
            start_time: Instant::now(),
            started_at: Utc::now(),
        }
    }
}
