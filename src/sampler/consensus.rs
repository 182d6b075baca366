//! Repeated sampling with majority-consensus resolution

use std::future::Future;
use std::time::Duration;

use crate::state::{NodeSet, Snapshot};

use super::client::{FetchError, StatusClient};

/// Samples the status source and resolves a canonical node set.
///
/// A single flaky read must not be mistaken for real membership change:
/// every cycle issues several fetches and takes the node set that a strict
/// majority of the successful attempts agree on.
pub struct Sampler {
    client: StatusClient,
    attempts: u32,
    backoff: Duration,
}

impl Sampler {
    /// Create a sampler over the given client
    pub fn new(client: StatusClient, attempts: u32, backoff: Duration) -> Self {
        Self {
            client,
            attempts,
            backoff,
        }
    }

    /// Sample the network and resolve one canonical snapshot.
    ///
    /// Returns [`SampleError::Exhausted`] when every attempt failed; the
    /// caller must skip the cycle without mutating any state.
    pub async fn sample(&self) -> Result<Snapshot, SampleError> {
        let candidates =
            collect_attempts(self.attempts, self.backoff, || self.client.fetch_nodes()).await;

        let successes = candidates.len();
        match resolve(candidates) {
            Some(nodes) => {
                tracing::debug!(
                    nodes = nodes.len(),
                    successes,
                    attempts = self.attempts,
                    "Sample resolved"
                );
                Ok(Snapshot::now(nodes))
            }
            None => Err(SampleError::Exhausted {
                attempts: self.attempts,
            }),
        }
    }
}

/// Run up to `attempts` fetches, sleeping `backoff` after each failure,
/// and collect every successful candidate node list.
///
/// Generic over the fetch so tests can drive it with a mock transport and
/// zero delay.
pub async fn collect_attempts<F, Fut>(
    attempts: u32,
    backoff: Duration,
    mut fetch: F,
) -> Vec<Vec<String>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Vec<String>, FetchError>>,
{
    let mut successes = Vec::new();

    for attempt in 1..=attempts {
        match fetch().await {
            Ok(nodes) => successes.push(nodes),
            Err(e) => {
                tracing::warn!(
                    attempt,
                    max_attempts = attempts,
                    error = %e,
                    "Status fetch failed"
                );
                if attempt < attempts {
                    tokio::time::sleep(backoff).await;
                }
            }
        }
    }

    successes
}

/// Resolve the canonical node set from the successful attempts.
///
/// A candidate identical (as a set) across a strict majority of attempts
/// wins; with no majority, the most recent successful attempt wins. No
/// successful attempts resolves to `None`.
pub fn resolve(candidates: Vec<Vec<String>>) -> Option<NodeSet> {
    let mut sets: Vec<NodeSet> = candidates
        .into_iter()
        .map(|nodes| nodes.into_iter().collect())
        .collect();

    let total = sets.len();
    if total == 0 {
        return None;
    }

    for candidate in &sets {
        let votes = sets.iter().filter(|s| *s == candidate).count();
        if votes * 2 > total {
            return Some(candidate.clone());
        }
    }

    tracing::debug!(samples = total, "No majority between samples, using most recent");
    sets.pop()
}

/// Sampling errors surfaced to the cycle
#[derive(Debug, thiserror::Error)]
pub enum SampleError {
    #[error("All {attempts} sampling attempts exhausted")]
    Exhausted { attempts: u32 },
}
