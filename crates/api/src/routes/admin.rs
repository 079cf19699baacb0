//! Coordinator state snapshot for operators.
//!
//! Authentication for the admin surface lives with the external dashboard
//! collaborator; this endpoint only reads coordinator state.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use crate::coordinator::CoordinatorStats;
use crate::state::AppState;

/// ```text
/// GET /admin/stats -> stats
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/admin/stats", get(stats))
}

/// GET /admin/stats — workers, queued jobs, and completion totals.
async fn stats(State(state): State<AppState>) -> Json<CoordinatorStats> {
    Json(state.coordinator.stats())
}
