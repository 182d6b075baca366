//! Background interval worker driving the monitor

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time;

use super::cycle::Monitor;

/// Interval-driven loop around [`Monitor::run_cycle`].
///
/// The first cycle runs immediately on start; after that one cycle runs
/// per interval, to completion, with no overlap. Shutdown waits for the
/// in-flight cycle to finish.
pub struct MonitorWorker {
    monitor: Arc<Monitor>,
    interval: Duration,
    shutdown_tx: Option<mpsc::Sender<()>>,
}

impl MonitorWorker {
    /// Create a worker over the given monitor
    pub fn new(monitor: Arc<Monitor>, interval: Duration) -> Self {
        Self {
            monitor,
            interval,
            shutdown_tx: None,
        }
    }

    /// Start the background loop
    pub fn start(&mut self) -> tokio::task::JoinHandle<()> {
        let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);
        self.shutdown_tx = Some(shutdown_tx);

        let monitor = Arc::clone(&self.monitor);
        let interval = self.interval;

        tokio::spawn(async move {
            tracing::info!("Monitor worker started with interval {:?}", interval);

            let mut ticker = time::interval(interval);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        let outcome = monitor.run_cycle().await;
                        tracing::info!(outcome = ?outcome, "Cycle complete");
                    }
                    _ = shutdown_rx.recv() => {
                        tracing::info!("Monitor worker shutting down");
                        break;
                    }
                }
            }
        })
    }

    /// Stop the loop after the current cycle completes
    pub async fn stop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(()).await;
        }
    }

    /// Whether start has been called and stop has not
    pub fn is_running(&self) -> bool {
        self.shutdown_tx.is_some()
    }
}
