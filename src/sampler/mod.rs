//! Consensus-based sampling of the network-status source
//!
//! Issues repeated queries against the status endpoint and resolves a
//! canonical node set via majority agreement, damping transient API
//! inconsistency without a quorum protocol.

pub mod client;
pub mod consensus;

pub use client::{FetchError, StatusClient};
pub use consensus::{Sampler, SampleError};
