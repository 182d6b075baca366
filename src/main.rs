//! Nodewatch Monitor
//!
//! Run with: cargo run
//!
//! Environment variables:
//! - NODEWATCH_WEBHOOK_URL: Chat webhook destination (required)
//! - NODEWATCH_STATUS_URL: Network-status source URL
//! - NODEWATCH_CHECK_INTERVAL_HOURS: Hours between cycles (minimum 1, default 2)
//! - NODEWATCH_STATE_PATH: Baseline state file (default: nodewatch_state.json)
//! - RUST_LOG: Log level (default: info)

use std::sync::Arc;

use nodewatch::monitor::{Monitor, MonitorConfig, MonitorWorker};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nodewatch=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = MonitorConfig::from_env()?;

    tracing::info!("Nodewatch configuration:");
    tracing::info!("  Status source: {}", config.status_url);
    tracing::info!("  Check interval: {:?}", config.check_interval);
    tracing::info!(
        "  Fetch attempts: {} (timeout {:?}, backoff {:?})",
        config.fetch_attempts,
        config.fetch_timeout,
        config.retry_backoff
    );
    tracing::info!("  Churn threshold: {}", config.churn_threshold);
    tracing::info!("  State file: {}", config.state_path.display());

    println!(
        r#"
  _   _           _                    _       _
 | \ | | ___   __| | _____      ____ _| |_ ___| |__
 |  \| |/ _ \ / _` |/ _ \ \ /\ / / _` | __/ __| '_ \
 | |\  | (_) | (_| |  __/\ V  V / (_| | || (__| | | |
 |_| \_|\___/ \__,_|\___| \_/\_/ \__,_|\__\___|_| |_|

 Node Network Membership Monitor
 Version: {}
"#,
        env!("CARGO_PKG_VERSION")
    );

    let interval = config.check_interval;
    let monitor = Arc::new(Monitor::new(config));
    let mut worker = MonitorWorker::new(monitor, interval);
    let handle = worker.start();

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutdown signal received, stopping after current cycle");
    worker.stop().await;
    handle.await?;

    Ok(())
}
