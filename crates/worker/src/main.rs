use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use slidecast_worker::client::CoordinatorClient;
use slidecast_worker::config::WorkerConfig;
use slidecast_worker::pipeline;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "slidecast_worker=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = WorkerConfig::from_env();
    tracing::info!(
        worker_id = %config.worker_id,
        server_url = %config.server_url,
        "Worker agent starting",
    );

    // One connection pool shared between coordinator calls and asset fetches.
    let http = reqwest::Client::new();
    let client = CoordinatorClient::with_client(http.clone(), config.server_url.clone());

    let poll_interval = Duration::from_secs(config.poll_interval_secs);

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Received SIGINT (Ctrl-C), stopping worker");
                break;
            }
            _ = poll_cycle(&client, &http, &config, poll_interval) => {}
        }
    }
}

/// One poll cycle: ask for work, run it if assigned, then pause.
///
/// Coordinator errors (unreachable, restarting) are logged and retried on
/// the next cycle; the agent never gives up polling.
async fn poll_cycle(
    client: &CoordinatorClient,
    http: &reqwest::Client,
    config: &WorkerConfig,
    poll_interval: Duration,
) {
    match client.fetch_task(&config.worker_id).await {
        Ok(Some(payload)) => {
            pipeline::process(client, http, config, payload).await;
        }
        Ok(None) => {}
        Err(err) => {
            tracing::warn!(error = %err, "Poll failed, retrying");
        }
    }

    tokio::time::sleep(poll_interval).await;
}
