//! Job identity and wire payload shapes.
//!
//! A job is one rendering request: an ordered list of image sources, a
//! render configuration, an optional background-music URL, and a title.
//! The JSON field names follow the coordinator's wire contract (camelCase).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::render::RenderConfig;

/// Unique identifier for a rendering job.
///
/// Assigned once at creation and never reused; random UUIDs make collisions
/// a non-concern for an in-memory queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(Uuid);

impl JobId {
    /// Generate a fresh job id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for JobId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::str::FromStr for JobId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// One source image reference in submission order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageSource {
    /// Where to fetch the image from.
    pub url: String,
    /// Display name, carried through for logging only.
    #[serde(default)]
    pub alt: Option<String>,
}

/// The job body handed to a worker agent from `GET /tasks`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPayload {
    pub job_id: JobId,
    pub images: Vec<ImageSource>,
    #[serde(default)]
    pub config: RenderConfig,
    #[serde(default)]
    pub music_url: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

/// A queued rendering request on the coordinator side.
#[derive(Debug, Clone)]
pub struct Job {
    pub id: JobId,
    pub payload: JobPayload,
    pub created_at: DateTime<Utc>,
}

/// Request body accepted from the create-video collaborator.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVideoRequest {
    #[serde(default)]
    pub images: Vec<ImageSource>,
    #[serde(default)]
    pub config: RenderConfig,
    #[serde(default)]
    pub music_url: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}
