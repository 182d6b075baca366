//! Monitor wiring: configuration, cycle orchestration, interval worker

pub mod config;
pub mod cycle;
pub mod worker;

pub use config::{ConfigError, MonitorConfig, DEFAULT_STATUS_URL};
pub use cycle::{CycleOutcome, Monitor};
pub use worker::MonitorWorker;
