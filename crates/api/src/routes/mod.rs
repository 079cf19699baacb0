//! HTTP route definitions.

use axum::Router;

use crate::state::AppState;

pub mod admin;
pub mod agent;
pub mod health;
pub mod music;
pub mod videos;

/// All coordinator routes, mounted at the root.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(agent::router())
        .merge(videos::router())
        .merge(music::router())
        .merge(admin::router())
}
