use std::sync::Arc;

use opus_db::StyleStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; both fields are behind `Arc`. The store is a trait
/// object so tests can inject an in-memory backend.
#[derive(Clone)]
pub struct AppState {
    /// Data store gateway.
    pub store: Arc<dyn StyleStore>,
    /// Server configuration (read by the API key extractor).
    pub config: Arc<ServerConfig>,
}
