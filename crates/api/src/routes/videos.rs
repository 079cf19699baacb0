//! The create-video collaborator endpoint.
//!
//! The response is intentionally long-held: it parks until the assigned
//! worker reports success or failure, bounded only by the configured park
//! timeout. This is why the router carries no global timeout layer.

use std::time::Duration;

use axum::extract::{DefaultBodyLimit, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::json;

use slidecast_core::job::{CreateVideoRequest, JobId, JobPayload};
use slidecast_core::music::resolve_music_url;
use slidecast_core::slug::title_slug;

use crate::coordinator::RenderOutcome;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Submission bodies are JSON image lists; generous but bounded.
const MAX_REQUEST_BYTES: usize = 50 * 1024 * 1024;

/// ```text
/// POST /videos -> create_video
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/videos", post(create_video))
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BYTES))
}

/// POST /videos — enqueue a rendering job and wait for its outcome.
///
/// The call stays open until a worker resolves or fails the job, or the
/// park timeout expires. Success returns the raw video with a filename
/// suggested by a slug of the title; worker failures are forwarded as a
/// 500 with the reported message.
async fn create_video(
    State(state): State<AppState>,
    Json(request): Json<CreateVideoRequest>,
) -> AppResult<Response> {
    if request.images.is_empty() {
        return Err(AppError::BadRequest(
            "at least one input image is required".into(),
        ));
    }

    let slug = title_slug(request.title.as_deref().unwrap_or_default());
    let payload = JobPayload {
        job_id: JobId::new(),
        images: request.images,
        config: request.config,
        music_url: request.music_url.as_deref().map(resolve_music_url),
        title: request.title,
    };
    let job_id = payload.job_id;
    let image_count = payload.images.len();

    let receiver = state
        .coordinator
        .submit(payload, slug)
        .map_err(|err| AppError::InternalError(err.to_string()))?;

    tracing::info!(%job_id, image_count, "Job queued");

    let ceiling = Duration::from_secs(state.config.park_timeout_secs);
    match tokio::time::timeout(ceiling, receiver).await {
        Ok(Ok(RenderOutcome::Video { bytes, filename })) => Ok((
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "video/mp4".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{filename}\""),
                ),
            ],
            bytes,
        )
            .into_response()),

        Ok(Ok(RenderOutcome::Failed { message })) => Ok((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": message })),
        )
            .into_response()),

        // The sender was dropped without an outcome; only reachable if the
        // parked entry was discarded out from under us.
        Ok(Err(_)) => Err(AppError::InternalError(format!(
            "job {job_id} was abandoned without an outcome"
        ))),

        Err(_) => {
            state.coordinator.discard_parked(job_id);
            tracing::warn!(%job_id, "Create-video call timed out waiting for a worker");
            Ok((
                StatusCode::GATEWAY_TIMEOUT,
                Json(json!({ "error": "rendering timed out" })),
            )
                .into_response())
        }
    }
}
