//! Nodewatch: Node Network Membership Monitor
//!
//! Periodically samples the membership of a distributed node network from
//! a status endpoint, reconciles the observed node set against a persisted
//! baseline, and emits human-readable alerts to a chat webhook.
//!
//! # Features
//!
//! - **Consensus Sampling**: repeated fetches with majority agreement to
//!   damp flaky status reads
//! - **Churn Threshold**: mass membership changes are held back instead of
//!   overwriting the baseline
//! - **Zero-Node Escalation**: a persistent critical alert that repeats
//!   until the network recovers
//! - **Crash-Safe Baseline**: backup-then-rename persistence that falls
//!   back to the last good copy
//!
//! # Example
//!
//! ```no_run
//! use nodewatch::monitor::{Monitor, MonitorConfig};
//!
//! # async fn run() {
//! let config = MonitorConfig::new("https://chat.example.com/webhook")
//!     .with_status_url("http://127.0.0.1:3000/api/pods");
//!
//! let monitor = Monitor::new(config);
//! let outcome = monitor.run_cycle().await;
//! println!("Cycle finished: {:?}", outcome);
//! # }
//! ```

pub mod alerts;
pub mod monitor;
pub mod reconcile;
pub mod sampler;
pub mod state;

// Re-export commonly used types
pub use monitor::{CycleOutcome, Monitor, MonitorConfig, MonitorWorker};
pub use reconcile::{diff, validate, ChangeReport, Decision};
pub use state::{MonitorState, NodeSet, Snapshot, StateStore};
