//! FFmpeg slideshow-encode command layer.
//!
//! Argument assembly is a pure function so the exact command line is unit
//! testable; execution goes through [`tokio::process::Command`] and maps
//! failures into a typed error.

use std::path::Path;

/// Error type for ffmpeg invocations.
#[derive(Debug, thiserror::Error)]
pub enum FfmpegError {
    #[error("ffmpeg binary not found: {0}")]
    NotFound(std::io::Error),

    #[error("ffmpeg execution failed (exit code {exit_code:?}): {stderr}")]
    ExecutionFailed {
        exit_code: Option<i32>,
        stderr: String,
    },

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Everything needed to encode one slideshow.
#[derive(Debug)]
pub struct EncodeRequest<'a> {
    /// Concat-demuxer manifest file listing frames and durations.
    pub manifest: &'a Path,
    /// Optional background audio; looped and trimmed to the video length.
    pub audio: Option<&'a Path>,
    /// `zoompan` camera-motion filter for this job's style.
    pub motion_filter: &'a str,
    /// Output frame rate.
    pub frame_rate: u32,
    /// Where the encoded video is written.
    pub output: &'a Path,
}

/// Assemble the full ffmpeg argument list for an encode.
///
/// The concat manifest is input 0 and the (optional) audio is input 1 with
/// infinite looping; `-shortest` then trims the mux to the video track. The
/// motion filter is applied to the video input and its labeled output is
/// mapped explicitly so the filtered stream is what gets encoded.
pub fn encode_args(request: &EncodeRequest<'_>) -> Vec<String> {
    let mut args: Vec<String> = vec![
        "-y".into(),
        "-f".into(),
        "concat".into(),
        "-safe".into(),
        "0".into(),
        "-i".into(),
        request.manifest.display().to_string(),
    ];

    if let Some(audio) = request.audio {
        args.extend([
            "-stream_loop".into(),
            "-1".into(),
            "-i".into(),
            audio.display().to_string(),
        ]);
    }

    args.extend([
        "-filter_complex".into(),
        format!("[0:v]{}[v]", request.motion_filter),
        "-map".into(),
        "[v]".into(),
    ]);

    if request.audio.is_some() {
        args.extend(["-map".into(), "1:a".into(), "-c:a".into(), "aac".into()]);
    }

    args.extend([
        "-c:v".into(),
        "libx264".into(),
        "-pix_fmt".into(),
        "yuv420p".into(),
        "-r".into(),
        request.frame_rate.to_string(),
        "-movflags".into(),
        "+faststart".into(),
    ]);

    if request.audio.is_some() {
        args.push("-shortest".into());
    }

    args.push(request.output.display().to_string());
    args
}

/// Run the encode, waiting for ffmpeg to exit.
pub async fn encode_slideshow(request: &EncodeRequest<'_>) -> Result<(), FfmpegError> {
    let args = encode_args(request);

    let output = tokio::process::Command::new("ffmpeg")
        .args(&args)
        .output()
        .await
        .map_err(FfmpegError::NotFound)?;

    if !output.status.success() {
        return Err(FfmpegError::ExecutionFailed {
            exit_code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn request<'a>(
        manifest: &'a Path,
        audio: Option<&'a Path>,
        output: &'a Path,
    ) -> EncodeRequest<'a> {
        EncodeRequest {
            manifest,
            audio,
            motion_filter: "zoompan=z=1.2:d=90:s=1280x720",
            frame_rate: 30,
            output,
        }
    }

    #[test]
    fn silent_encode_has_no_audio_flags() {
        let manifest = PathBuf::from("/tmp/job/frames.txt");
        let output = PathBuf::from("/tmp/job/output.mp4");
        let args = encode_args(&request(&manifest, None, &output));

        assert_eq!(args[0], "-y");
        assert!(args.contains(&"concat".to_string()));
        assert!(!args.contains(&"-stream_loop".to_string()));
        assert!(!args.contains(&"-shortest".to_string()));
        assert!(!args.contains(&"aac".to_string()));
        assert_eq!(args.last().unwrap(), "/tmp/job/output.mp4");
    }

    #[test]
    fn audio_encode_loops_and_trims() {
        let manifest = PathBuf::from("/tmp/job/frames.txt");
        let audio = PathBuf::from("/tmp/job/bgm.mp3");
        let output = PathBuf::from("/tmp/job/output.mp4");
        let args = encode_args(&request(&manifest, Some(&audio), &output));

        let loop_at = args.iter().position(|a| a == "-stream_loop").unwrap();
        assert_eq!(args[loop_at + 1], "-1");
        assert_eq!(args[loop_at + 2], "-i");
        assert_eq!(args[loop_at + 3], "/tmp/job/bgm.mp3");
        assert!(args.contains(&"-shortest".to_string()));
        assert!(args.contains(&"aac".to_string()));
        assert!(args.contains(&"1:a".to_string()));
    }

    #[test]
    fn motion_filter_is_labeled_and_mapped() {
        let manifest = PathBuf::from("/tmp/frames.txt");
        let output = PathBuf::from("/tmp/out.mp4");
        let args = encode_args(&request(&manifest, None, &output));

        let filter_at = args.iter().position(|a| a == "-filter_complex").unwrap();
        assert_eq!(args[filter_at + 1], "[0:v]zoompan=z=1.2:d=90:s=1280x720[v]");
        assert_eq!(args[filter_at + 2], "-map");
        assert_eq!(args[filter_at + 3], "[v]");
    }

    #[test]
    fn inputs_precede_codec_options() {
        let manifest = PathBuf::from("/tmp/frames.txt");
        let output = PathBuf::from("/tmp/out.mp4");
        let args = encode_args(&request(&manifest, None, &output));

        let input_at = args.iter().position(|a| a == "-i").unwrap();
        let codec_at = args.iter().position(|a| a == "-c:v").unwrap();
        assert!(input_at < codec_at);
    }
}
