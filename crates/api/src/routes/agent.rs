//! Worker agent endpoints: task polling, result intake, failure reports.
//!
//! These endpoints are unauthenticated by design — worker agents call them.
//! Polling is the only channel from agent to coordinator; there is no push
//! delivery and no cancellation message.

use axum::body::Bytes;
use axum::extract::{DefaultBodyLimit, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;

use slidecast_core::job::{JobId, JobPayload};

use crate::coordinator::Delivery;
use crate::state::AppState;

/// Rendered videos can be large; match the reference 500 MB intake cap.
const MAX_RESULT_BYTES: usize = 500 * 1024 * 1024;

/// ```text
/// GET  /tasks?workerId=ID -> poll_task
/// POST /results/{job_id}  -> submit_result
/// POST /errors/{job_id}   -> report_error
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/tasks", get(poll_task))
        .route("/results/{job_id}", post(submit_result))
        .route("/errors/{job_id}", post(report_error))
        .layer(DefaultBodyLimit::max(MAX_RESULT_BYTES))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TaskQuery {
    worker_id: Option<String>,
}

/// GET /tasks — one poll cycle for a worker agent.
///
/// Registers or refreshes the worker, then atomically hands it the queue
/// head. A `null` body means "no job right now" and is the expected idle
/// answer, not an error. Polls without a `workerId` never dispatch.
async fn poll_task(
    State(state): State<AppState>,
    Query(query): Query<TaskQuery>,
) -> Json<Option<JobPayload>> {
    let Some(worker_id) = query.worker_id else {
        return Json(None);
    };
    Json(state.coordinator.poll(&worker_id))
}

/// POST /results/{job_id} — raw rendered video bytes from a worker.
///
/// Frees the worker either way; 404 tells the agent the original caller is
/// no longer waiting (disconnected or timed out), which needs no follow-up.
async fn submit_result(
    State(state): State<AppState>,
    Path(job_id): Path<JobId>,
    body: Bytes,
) -> impl IntoResponse {
    tracing::info!(%job_id, bytes = body.len(), "Result received");

    match state.coordinator.resolve(job_id, body) {
        Delivery::Delivered => (StatusCode::OK, Json(json!({ "success": true }))),
        Delivery::NoRecipient => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "client disconnected" })),
        ),
    }
}

#[derive(Debug, Deserialize)]
struct ErrorReport {
    error: String,
}

/// POST /errors/{job_id} — a worker reporting a fatal job failure.
///
/// Acknowledged unconditionally; delivery to the parked caller is
/// best-effort.
async fn report_error(
    State(state): State<AppState>,
    Path(job_id): Path<JobId>,
    Json(report): Json<ErrorReport>,
) -> Json<serde_json::Value> {
    tracing::error!(%job_id, error = %report.error, "Job failed");

    let _ = state.coordinator.fail(job_id, report.error);
    Json(json!({ "received": true }))
}
