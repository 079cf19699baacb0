//! HTTP client for the coordinator's worker endpoints.
//!
//! Wraps polling, result submission, and failure reporting using
//! [`reqwest`]. Polling is the only channel to the coordinator; there is no
//! push delivery and nothing to keep open between cycles.

use serde_json::json;

use slidecast_core::job::{JobId, JobPayload};

/// HTTP client for one coordinator.
pub struct CoordinatorClient {
    client: reqwest::Client,
    base_url: String,
}

/// Errors from the coordinator client layer.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The coordinator returned an unexpected non-2xx status code.
    #[error("coordinator API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

/// Outcome of a result submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitAck {
    /// A parked caller received the video.
    Delivered,
    /// The caller was gone (disconnected or timed out); nothing to do.
    NoRecipient,
}

impl CoordinatorClient {
    /// Create a new client for a coordinator.
    ///
    /// * `base_url` - Base HTTP URL, e.g. `http://host:3000`.
    pub fn new(base_url: String) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create a client reusing an existing [`reqwest::Client`] (useful to
    /// share the connection pool with asset fetching).
    pub fn with_client(client: reqwest::Client, base_url: String) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Poll for work.
    ///
    /// Sends `GET /tasks?workerId=...`. A JSON `null` body means nothing is
    /// queued and maps to `None`.
    pub async fn fetch_task(&self, worker_id: &str) -> Result<Option<JobPayload>, ClientError> {
        let response = self
            .client
            .get(format!("{}/tasks", self.base_url))
            .query(&[("workerId", worker_id)])
            .send()
            .await?;

        let response = Self::ensure_success(response).await?;
        Ok(response.json::<Option<JobPayload>>().await?)
    }

    /// Submit a rendered video as a job's result.
    ///
    /// Sends `POST /results/{job_id}` with the raw bytes. A 404 means the
    /// original caller is no longer waiting; the job is still complete from
    /// the worker's point of view.
    pub async fn submit_result(
        &self,
        job_id: JobId,
        video: Vec<u8>,
    ) -> Result<SubmitAck, ClientError> {
        let response = self
            .client
            .post(format!("{}/results/{}", self.base_url, job_id))
            .header(reqwest::header::CONTENT_TYPE, "video/mp4")
            .body(video)
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(SubmitAck::NoRecipient);
        }
        Self::ensure_success(response).await?;
        Ok(SubmitAck::Delivered)
    }

    /// Report a fatal job failure.
    ///
    /// Sends `POST /errors/{job_id}`; the coordinator acknowledges
    /// unconditionally.
    pub async fn report_error(&self, job_id: JobId, message: &str) -> Result<(), ClientError> {
        let response = self
            .client
            .post(format!("{}/errors/{}", self.base_url, job_id))
            .json(&json!({ "error": message }))
            .send()
            .await?;

        Self::ensure_success(response).await?;
        Ok(())
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code. Returns the response
    /// unchanged on success, or a [`ClientError::Api`] containing the
    /// status and body text on failure.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ClientError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}
