//! The per-job execution pipeline.
//!
//! One assigned job runs through fetch → compose → render → deliver, with a
//! phase state machine for observability. Per-asset failures degrade the
//! output (fewer frames, or a silent video); fatal conditions abort the job
//! and are reported to the coordinator. The job workspace is purged on both
//! paths, unconditionally.

pub mod compose;
pub mod fetch;
pub mod render;

use std::path::PathBuf;

use futures::future::join_all;

use slidecast_core::job::JobPayload;

use crate::client::{ClientError, CoordinatorClient, SubmitAck};
use crate::config::WorkerConfig;
use crate::workspace::JobWorkspace;

/// Lifecycle of one assigned job inside the agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobPhase {
    Received,
    Fetching,
    Transforming,
    Rendering,
    Delivering,
    Done,
    Failed,
}

impl std::fmt::Display for JobPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            JobPhase::Received => "received",
            JobPhase::Fetching => "fetching",
            JobPhase::Transforming => "transforming",
            JobPhase::Rendering => "rendering",
            JobPhase::Delivering => "delivering",
            JobPhase::Done => "done",
            JobPhase::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Fatal pipeline conditions. Everything else degrades rather than aborts.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Every source failed to download or compose.
    #[error("no frames produced from {attempted} source image(s)")]
    NoFrames { attempted: usize },

    /// The encode/mux stage failed.
    #[error("rendering failed: {0}")]
    Render(#[from] slidecast_core::ffmpeg::FfmpegError),

    /// Submitting the finished video failed.
    #[error("result delivery failed: {0}")]
    Delivery(#[source] ClientError),

    /// Workspace I/O failed.
    #[error("workspace I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Execute one assigned job end to end.
///
/// Fatal errors are reported to the coordinator's error endpoint
/// (best-effort) so the parked caller is failed rather than left hanging.
pub async fn process(
    client: &CoordinatorClient,
    http: &reqwest::Client,
    config: &WorkerConfig,
    payload: JobPayload,
) {
    let job_id = payload.job_id;
    tracing::info!(%job_id, images = payload.images.len(), phase = %JobPhase::Received, "Job accepted");

    let workspace = match JobWorkspace::create(&config.work_dir, job_id).await {
        Ok(workspace) => workspace,
        Err(err) => {
            tracing::error!(%job_id, error = %err, "Failed to create job workspace");
            report(client, &payload, &PipelineError::Io(err)).await;
            return;
        }
    };

    match run(client, http, &workspace, &payload).await {
        Ok(()) => {
            tracing::info!(%job_id, phase = %JobPhase::Done, "Job completed");
        }
        Err(err) => {
            tracing::error!(%job_id, phase = %JobPhase::Failed, error = %err, "Job failed");
            report(client, &payload, &err).await;
        }
    }

    // Cleanup happens regardless of outcome.
    workspace.purge().await;
}

/// The fallible stages of the pipeline.
async fn run(
    client: &CoordinatorClient,
    http: &reqwest::Client,
    workspace: &JobWorkspace,
    payload: &JobPayload,
) -> Result<(), PipelineError> {
    let job_id = payload.job_id;
    let canvas = payload.config.ratio.canvas();
    let style = payload.config.style;
    let duration = payload.config.duration_per_img;

    // Fetch + compose, concurrently across assets. join_all keeps results
    // in submission order, so frame order is deterministic by source index
    // (and slice index within a source) no matter which download wins.
    tracing::info!(%job_id, phase = %JobPhase::Fetching, "Downloading source images");
    let raw_dir = workspace.raw_dir();
    let frames_dir = workspace.frames_dir();

    let per_source = payload.images.iter().enumerate().map(|(index, source)| {
        let raw_dir = raw_dir.clone();
        let frames_dir = frames_dir.clone();
        async move {
            let raw = match fetch::download_image(http, source, &raw_dir, index).await {
                Ok(path) => path,
                Err(err) => {
                    tracing::warn!(%job_id, index, url = %source.url, error = %err, "Skipping image: download failed");
                    return Vec::new();
                }
            };

            let compose_result = tokio::task::spawn_blocking(move || {
                compose::compose_source(&raw, &frames_dir, index, style, canvas)
            })
            .await;

            match compose_result {
                Ok(Ok(frames)) => frames,
                Ok(Err(err)) => {
                    tracing::warn!(%job_id, index, error = %err, "Skipping image: compose failed");
                    Vec::new()
                }
                Err(join_err) => {
                    tracing::warn!(%job_id, index, error = %join_err, "Skipping image: compose task panicked");
                    Vec::new()
                }
            }
        }
    });

    tracing::info!(%job_id, phase = %JobPhase::Transforming, style = %style, "Composing frames");
    let frames: Vec<PathBuf> = join_all(per_source).await.into_iter().flatten().collect();

    if frames.is_empty() {
        return Err(PipelineError::NoFrames {
            attempted: payload.images.len(),
        });
    }

    // Optional audio; a failure here just means a silent video.
    let audio = match payload.music_url.as_deref().filter(|url| url.starts_with("http")) {
        Some(url) => match fetch::download_audio(http, url, &workspace.raw_dir()).await {
            Ok(path) => Some(path),
            Err(err) => {
                tracing::warn!(%job_id, url, error = %err, "Proceeding without audio: download failed");
                None
            }
        },
        None => None,
    };

    tracing::info!(%job_id, phase = %JobPhase::Rendering, frames = frames.len(), "Encoding video");
    let output = render::render_video(
        workspace,
        &frames,
        style,
        canvas,
        duration,
        audio.as_deref(),
    )
    .await?;

    tracing::info!(%job_id, phase = %JobPhase::Delivering, "Uploading result");
    let video = tokio::fs::read(&output).await?;
    match client
        .submit_result(job_id, video)
        .await
        .map_err(PipelineError::Delivery)?
    {
        SubmitAck::Delivered => {}
        SubmitAck::NoRecipient => {
            tracing::warn!(%job_id, "Caller no longer waiting; result discarded by coordinator");
        }
    }

    Ok(())
}

/// Best-effort failure report; a delivery failure here is only logged, the
/// job is over either way.
async fn report(client: &CoordinatorClient, payload: &JobPayload, err: &PipelineError) {
    if let Err(report_err) = client.report_error(payload.job_id, &err.to_string()).await {
        tracing::error!(
            job_id = %payload.job_id,
            error = %report_err,
            "Failed to report job failure to coordinator",
        );
    }
}
