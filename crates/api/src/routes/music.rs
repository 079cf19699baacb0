//! Built-in music library listing.

use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

use slidecast_core::music::LIBRARY;

use crate::state::AppState;

/// ```text
/// GET /music-library -> list_music
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/music-library", get(list_music))
}

/// GET /music-library — the curated background-track list.
async fn list_music() -> Json<serde_json::Value> {
    Json(json!({
        "success": true,
        "music": LIBRARY,
    }))
}
