//! Per-job scratch directory.
//!
//! Each job gets its own directory under the configured work dir, holding
//! downloaded assets, composed frames, the concat manifest, and the encoded
//! output. The pipeline purges it on both the success and failure paths.

use std::io;
use std::path::{Path, PathBuf};

use slidecast_core::job::JobId;

/// Filesystem layout for one in-flight job.
#[derive(Debug)]
pub struct JobWorkspace {
    root: PathBuf,
}

impl JobWorkspace {
    /// Create the job's directory tree under `base`.
    pub async fn create(base: &Path, job_id: JobId) -> io::Result<Self> {
        let root = base.join(job_id.to_string());
        tokio::fs::create_dir_all(root.join("raw")).await?;
        tokio::fs::create_dir_all(root.join("frames")).await?;
        Ok(Self { root })
    }

    /// Downloaded source assets.
    pub fn raw_dir(&self) -> PathBuf {
        self.root.join("raw")
    }

    /// Composed canvas-sized frames.
    pub fn frames_dir(&self) -> PathBuf {
        self.root.join("frames")
    }

    /// Concat-demuxer manifest file.
    pub fn manifest_path(&self) -> PathBuf {
        self.root.join("frames.txt")
    }

    /// Encoded output video.
    pub fn output_path(&self) -> PathBuf {
        self.root.join("output.mp4")
    }

    /// Remove the whole directory tree. Failure to clean up is logged, not
    /// propagated: the job outcome has already been decided by this point.
    pub async fn purge(self) {
        if let Err(err) = tokio::fs::remove_dir_all(&self.root).await {
            tracing::warn!(path = %self.root.display(), error = %err, "Failed to purge job workspace");
        }
    }
}
