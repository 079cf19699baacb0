use std::path::PathBuf;

/// Worker agent configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// Coordinator base URL (default: `http://localhost:3000`).
    pub server_url: String,
    /// Stable identity for this agent within one run
    /// (default: `agent-<uuid>`).
    pub worker_id: String,
    /// Seconds between polls when idle (default: `2`).
    pub poll_interval_secs: u64,
    /// Where per-job scratch directories are created
    /// (default: `<tmp>/slidecast-worker`).
    pub work_dir: PathBuf,
}

impl WorkerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var              | Default                  |
    /// |----------------------|--------------------------|
    /// | `SERVER_URL`         | `http://localhost:3000`  |
    /// | `WORKER_ID`          | `agent-<uuid>`           |
    /// | `POLL_INTERVAL_SECS` | `2`                      |
    /// | `WORK_DIR`           | `<tmp>/slidecast-worker` |
    pub fn from_env() -> Self {
        let server_url =
            std::env::var("SERVER_URL").unwrap_or_else(|_| "http://localhost:3000".into());

        let worker_id = std::env::var("WORKER_ID")
            .unwrap_or_else(|_| format!("agent-{}", uuid::Uuid::new_v4()));

        let poll_interval_secs: u64 = std::env::var("POLL_INTERVAL_SECS")
            .unwrap_or_else(|_| "2".into())
            .parse()
            .expect("POLL_INTERVAL_SECS must be a valid u64");

        let work_dir = std::env::var("WORK_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| std::env::temp_dir().join("slidecast-worker"));

        Self {
            server_url,
            worker_id,
            poll_interval_secs,
            work_dir,
        }
    }
}
