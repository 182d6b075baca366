//! Alert rendering and delivery
//!
//! Formats the outcome of a monitoring cycle into one of several chat
//! message variants and delivers it to the configured webhook.

pub mod notifier;
pub mod report;

pub use notifier::{Notifier, NotifierError};
pub use report::{Message, MAX_LISTED};
