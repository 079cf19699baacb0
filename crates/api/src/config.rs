/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// Ceiling on how long a create-video response stays parked waiting for
    /// a worker, in seconds (default: `600`). Past this the caller gets a
    /// timeout failure and the parked entry is released.
    pub park_timeout_secs: u64,
    /// Interval between worker liveness sweeps in seconds (default: `5`).
    pub sweep_interval_secs: u64,
    /// Idle workers silent longer than this are evicted, in seconds
    /// (default: `10`). Busy workers are never evicted.
    pub idle_eviction_secs: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var              | Default                 |
    /// |----------------------|-------------------------|
    /// | `HOST`               | `0.0.0.0`               |
    /// | `PORT`               | `3000`                  |
    /// | `CORS_ORIGINS`       | `http://localhost:5173` |
    /// | `PARK_TIMEOUT_SECS`  | `600`                   |
    /// | `SWEEP_INTERVAL_SECS`| `5`                     |
    /// | `IDLE_EVICTION_SECS` | `10`                    |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let park_timeout_secs: u64 = std::env::var("PARK_TIMEOUT_SECS")
            .unwrap_or_else(|_| "600".into())
            .parse()
            .expect("PARK_TIMEOUT_SECS must be a valid u64");

        let sweep_interval_secs: u64 = std::env::var("SWEEP_INTERVAL_SECS")
            .unwrap_or_else(|_| "5".into())
            .parse()
            .expect("SWEEP_INTERVAL_SECS must be a valid u64");

        let idle_eviction_secs: u64 = std::env::var("IDLE_EVICTION_SECS")
            .unwrap_or_else(|_| "10".into())
            .parse()
            .expect("IDLE_EVICTION_SECS must be a valid u64");

        Self {
            host,
            port,
            cors_origins,
            park_timeout_secs,
            sweep_interval_secs,
            idle_eviction_secs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_liveness_parameters() {
        // Protect against env leakage from the test harness.
        for var in ["SWEEP_INTERVAL_SECS", "IDLE_EVICTION_SECS", "PARK_TIMEOUT_SECS"] {
            std::env::remove_var(var);
        }
        let config = ServerConfig::from_env();
        assert_eq!(config.sweep_interval_secs, 5);
        assert_eq!(config.idle_eviction_secs, 10);
        assert_eq!(config.park_timeout_secs, 600);
    }
}
