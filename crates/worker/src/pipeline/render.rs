//! Render stage: manifest write + ffmpeg encode.

use std::path::{Path, PathBuf};

use slidecast_core::ffmpeg::{self, EncodeRequest, FfmpegError};
use slidecast_core::manifest::ConcatManifest;
use slidecast_core::render::{motion_filter, Canvas, Style, FRAME_RATE};

use crate::workspace::JobWorkspace;

/// Concatenate the composed frames into a video.
///
/// Writes the concat manifest (each frame with its display duration, final
/// frame repeated as terminator), then encodes at the fixed frame rate with
/// the style's camera-motion filter. If audio is present it is looped over
/// the full video length and the mux is trimmed to the shorter track.
pub async fn render_video(
    workspace: &JobWorkspace,
    frames: &[PathBuf],
    style: Style,
    canvas: Canvas,
    duration_secs: f64,
    audio: Option<&Path>,
) -> Result<PathBuf, FfmpegError> {
    let manifest = ConcatManifest::from_frames(frames, duration_secs);
    let manifest_path = workspace.manifest_path();
    tokio::fs::write(&manifest_path, manifest.to_concat_format()).await?;

    let filter = motion_filter(style, canvas, duration_secs);
    let output = workspace.output_path();

    ffmpeg::encode_slideshow(&EncodeRequest {
        manifest: &manifest_path,
        audio,
        motion_filter: &filter,
        frame_rate: FRAME_RATE,
        output: &output,
    })
    .await?;

    Ok(output)
}
