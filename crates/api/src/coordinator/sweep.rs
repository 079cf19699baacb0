//! Background liveness sweep.
//!
//! A single long-lived task that periodically evicts Idle workers that have
//! stopped polling. Busy workers are exempt — see [`Coordinator::sweep`].

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use super::Coordinator;

/// Spawn the sweep loop.
///
/// Ticks every `interval`, evicting Idle workers silent for longer than
/// `stale_after`. Runs until the cancellation token is triggered; the
/// returned handle lets the caller await the drain during shutdown.
pub fn start_sweep(
    coordinator: Arc<Coordinator>,
    interval: Duration,
    stale_after: Duration,
    cancel: CancellationToken,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        tracing::info!(
            interval_secs = interval.as_secs(),
            stale_after_secs = stale_after.as_secs(),
            "Worker liveness sweep started",
        );

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("Worker liveness sweep shutting down");
                    break;
                }
                _ = ticker.tick() => {
                    coordinator.sweep(stale_after);
                }
            }
        }
    })
}
