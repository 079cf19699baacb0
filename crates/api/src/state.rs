use std::sync::Arc;

use crate::config::ServerConfig;
use crate::coordinator::Coordinator;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// The single linearization point: queue, registry, assignments, and
    /// parked responses.
    pub coordinator: Arc<Coordinator>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
