//! Concatenation manifest consumed by the render stage.
//!
//! The manifest lists every composed frame with its display duration, in
//! source/slice order, and is serialized in the ffmpeg concat-demuxer text
//! format. The final frame appears once more at the end without a duration:
//! the demuxer otherwise drops the last entry's display time.

use std::path::{Path, PathBuf};

/// Ordered (frame, display duration) list for one job.
#[derive(Debug, Clone, PartialEq)]
pub struct ConcatManifest {
    entries: Vec<(PathBuf, f64)>,
}

impl ConcatManifest {
    /// Build a manifest giving every frame the same display duration.
    pub fn from_frames<P: AsRef<Path>>(frames: &[P], duration_secs: f64) -> Self {
        Self {
            entries: frames
                .iter()
                .map(|frame| (frame.as_ref().to_path_buf(), duration_secs))
                .collect(),
        }
    }

    /// Number of (frame, duration) entries, excluding the trailing repeat.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serialize to the concat-demuxer input format.
    pub fn to_concat_format(&self) -> String {
        let mut out = String::new();
        for (frame, duration) in &self.entries {
            out.push_str(&format!("file '{}'\n", demuxer_path(frame)));
            out.push_str(&format!("duration {duration}\n"));
        }
        // Terminator: repeat the last frame so its duration takes effect.
        if let Some((last, _)) = self.entries.last() {
            out.push_str(&format!("file '{}'\n", demuxer_path(last)));
        }
        out
    }
}

/// Forward-slashed path form accepted by the demuxer on every platform.
fn demuxer_path(path: &Path) -> String {
    path.display().to_string().replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn k_frames_yield_k_entries_plus_trailer() {
        let frames = vec!["/tmp/f0.jpg", "/tmp/f1.jpg", "/tmp/f2.jpg"];
        let manifest = ConcatManifest::from_frames(&frames, 3.0);
        assert_eq!(manifest.len(), 3);

        let text = manifest.to_concat_format();
        let file_lines: Vec<&str> = text
            .lines()
            .filter(|line| line.starts_with("file "))
            .collect();
        let duration_lines = text
            .lines()
            .filter(|line| line.starts_with("duration "))
            .count();

        assert_eq!(file_lines.len(), 4);
        assert_eq!(duration_lines, 3);
        // The trailer repeats the final frame.
        assert_eq!(file_lines[3], "file '/tmp/f2.jpg'");
    }

    #[test]
    fn durations_are_written_per_entry() {
        let manifest = ConcatManifest::from_frames(&["/tmp/a.jpg"], 2.5);
        let text = manifest.to_concat_format();
        assert!(text.contains("duration 2.5\n"), "{text}");
    }

    #[test]
    fn whole_second_durations_have_no_fraction() {
        let manifest = ConcatManifest::from_frames(&["/tmp/a.jpg"], 3.0);
        assert!(manifest.to_concat_format().contains("duration 3\n"));
    }

    #[test]
    fn empty_manifest_serializes_to_nothing() {
        let manifest = ConcatManifest::from_frames::<&str>(&[], 3.0);
        assert!(manifest.is_empty());
        assert_eq!(manifest.to_concat_format(), "");
    }
}
